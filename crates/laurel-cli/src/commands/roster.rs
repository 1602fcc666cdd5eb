//! Roster command implementation.

use std::path::Path;

use anyhow::Result;

use laurel_core::roster::{Role, Roster};

use super::RosterArgs;

/// Run the roster command.
pub fn run(config_path: &Path, args: RosterArgs) -> Result<()> {
    let config = super::load_config(config_path);
    let role = Role::from(args.role);
    let roster = Roster::load(role, config.rosters.path_for(role))?;

    if args.json {
        output_json(&roster);
        return Ok(());
    }

    println!("{role} roster ({} entries):", roster.len());
    println!("{}", "─".repeat(64));
    println!("  {:28}  {:22}  {:7}", "Name", "Team", "ID");
    println!("{}", "─".repeat(64));
    for record in roster.records() {
        println!(
            "  {:28}  {:22}  {:7}",
            record.name,
            record.team,
            record.cert_id.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

/// Output roster entries as JSON.
fn output_json(roster: &Roster) {
    let output = serde_json::json!({
        "role": roster.role().to_string(),
        "entries": roster.records().iter().map(|r| serde_json::json!({
            "name": r.name,
            "team": r.team,
            "cert_id": r.cert_id,
        })).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
