//! CLI command definitions and handlers.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use laurel_core::config::Config;
use laurel_core::roster::Role;

pub mod assign_ids;
pub mod completions;
pub mod config;
pub mod generate;
pub mod roster;

/// Load configuration with graceful fallback to defaults.
///
/// A missing file is normal (everything has a default); a file that exists
/// but cannot be parsed is reported and ignored.
pub fn load_config(path: &Path) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(err) => {
            if path.exists() {
                tracing::warn!("ignoring unreadable config {}: {err}", path.display());
            }
            Config::default()
        }
    }
}

/// Laurel - hackathon certificate generation
#[derive(Parser)]
#[command(name = "laurel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the campaign configuration file
    #[arg(long, global = true, default_value = "laurel.toml")]
    pub config: PathBuf,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a certificate for a validated roster entry
    Generate(GenerateArgs),

    /// Assign missing certificate IDs across rosters
    AssignIds(AssignIdsArgs),

    /// List roster entries for a role
    Roster(RosterArgs),

    /// Manage the campaign configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Certificate role, as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Hackathon participant
    Participant,
    /// Core organizing team member
    CoreTeam,
    /// Community evangelist
    Evangelist,
    /// Award winner
    Winner,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Participant => Self::Participant,
            RoleArg::CoreTeam => Self::CoreTeamMember,
            RoleArg::Evangelist => Self::Evangelist,
            RoleArg::Winner => Self::AwardWinner,
        }
    }
}

/// Arguments for the generate command
#[derive(Args)]
pub struct GenerateArgs {
    /// Role of the certificate holder
    #[arg(long, value_enum)]
    pub role: RoleArg,

    /// Name as it appears in the roster (case and spacing are ignored)
    #[arg(long)]
    pub name: String,

    /// Team name (required for participant and winner certificates)
    #[arg(long)]
    pub team: Option<String>,

    /// Directory the certificate is written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the assign-ids command
#[derive(Args)]
pub struct AssignIdsArgs {
    /// Restrict the pass to one role's roster
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,
}

/// Arguments for the roster command
#[derive(Args)]
pub struct RosterArgs {
    /// Role whose roster is listed
    #[arg(long, value_enum)]
    pub role: RoleArg,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    /// The action to perform
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init,
    /// Print the resolved configuration
    Show,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShellType {
    /// GNU Bash
    Bash,
    /// Zsh
    Zsh,
    /// Fish
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish
    Elvish,
}
