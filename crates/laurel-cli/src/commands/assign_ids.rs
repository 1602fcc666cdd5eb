//! Assign-ids command implementation.

use std::path::Path;

use anyhow::Result;

use laurel_core::certificate;
use laurel_core::roster::Role;
use laurel_core::Error;

use super::AssignIdsArgs;

/// Run the assign-ids command.
///
/// With `--role` the named roster is processed and any failure is fatal.
/// Without it, every roster is processed; a roster file that does not exist
/// is skipped with a warning so a campaign without, say, an evangelist
/// roster still gets the rest assigned.
pub fn run(config_path: &Path, args: AssignIdsArgs) -> Result<()> {
    let config = super::load_config(config_path);

    if let Some(role) = args.role {
        let role = Role::from(role);
        let assigned = certificate::assign_ids(&config, role)?;
        print_summary(role, assigned);
        return Ok(());
    }

    for role in Role::ALL {
        match certificate::assign_ids(&config, role) {
            Ok(assigned) => print_summary(role, assigned),
            Err(err @ Error::RosterUnavailable { .. }) => {
                tracing::warn!("skipping {role}: {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn print_summary(role: Role, assigned: usize) {
    if assigned == 0 {
        println!("{role}: all rows already have certificate IDs");
    } else {
        println!("{role}: assigned {assigned} new certificate ID(s)");
    }
}
