//! Generate command implementation.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use laurel_core::certificate;
use laurel_core::roster::Role;

use super::GenerateArgs;

/// Run the generate command.
pub fn run(config_path: &Path, args: GenerateArgs) -> Result<()> {
    let config = super::load_config(config_path);
    let role = Role::from(args.role);

    if role.team_is_user_selected() && args.team.is_none() {
        bail!("--team is required for {role} certificates");
    }
    if !role.team_is_user_selected() && args.team.is_some() {
        tracing::warn!("--team is ignored for {role} certificates; the roster derives it from the name");
    }

    let cert = certificate::generate(&config, role, &args.name, args.team.as_deref())?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create output directory {}", args.output.display()))?;
    let path = args.output.join(&cert.file_name);
    fs::write(&path, &cert.png).with_context(|| format!("failed to write {}", path.display()))?;

    if args.json {
        let output = serde_json::json!({
            "file": path.to_string_lossy(),
            "cert_id": cert.cert_id.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("Certificate written to {}", path.display());
        println!("Certificate ID: {}", cert.cert_id);
    }

    Ok(())
}
