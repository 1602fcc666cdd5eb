//! Configuration for a certificate campaign.
//!
//! All tunables live in a single TOML file (`laurel.toml` by default):
//! campaign identity, text styling, layout offsets, roster locations, and
//! one template image per variant. The configuration is loaded once and
//! passed around immutably; there is no process-wide mutable state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::{parse_hex_color, Layout};
use crate::roster::{AwardTier, Gender, Role, TemplateVariant};

/// Main configuration struct for Laurel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Campaign identity
    pub event: EventConfig,
    /// Text styling
    pub text: TextConfig,
    /// Text placement
    pub layout: LayoutConfig,
    /// Roster file per role
    pub rosters: RosterPaths,
    /// Template image per variant
    pub templates: TemplatePaths,
}

/// Campaign identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Prefix for generated certificate file names
    pub campaign: String,
    /// URL printed on the verification line
    pub verify_url: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            campaign: "Hackathon".to_string(),
            verify_url: "https://example.org/verify".to_string(),
        }
    }
}

/// Text styling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Path to a scalable font file (TTF/OTF)
    pub font: PathBuf,
    /// Point size for the name and team lines
    pub font_size: f32,
    /// Fill color as `#rrggbb`
    pub color: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: PathBuf::from("assets/fonts/Montserrat-SemiBold.ttf"),
            font_size: 93.0,
            color: "#ffffff".to_string(),
        }
    }
}

/// Text placement settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical offset of the name line
    pub name_y: i32,
    /// Vertical offset of the team line
    pub team_y: i32,
    /// Vertical offset of the verification line; omit to skip the line
    pub verify_y: Option<i32>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            name_y: 628,
            team_y: 974,
            verify_y: None,
        }
    }
}

/// Roster file locations, one per role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterPaths {
    /// Participant roster
    pub participants: PathBuf,
    /// Core team roster
    pub core_team: PathBuf,
    /// Evangelist roster
    pub evangelists: PathBuf,
    /// Award winner roster
    pub winners: PathBuf,
}

impl Default for RosterPaths {
    fn default() -> Self {
        Self {
            participants: PathBuf::from("rosters/participants.csv"),
            core_team: PathBuf::from("rosters/core.csv"),
            evangelists: PathBuf::from("rosters/evangelists.csv"),
            winners: PathBuf::from("rosters/winners.csv"),
        }
    }
}

impl RosterPaths {
    /// The roster file for a role.
    #[must_use]
    pub fn path_for(&self, role: Role) -> &Path {
        match role {
            Role::Participant => &self.participants,
            Role::CoreTeamMember => &self.core_team,
            Role::Evangelist => &self.evangelists,
            Role::AwardWinner => &self.winners,
        }
    }
}

/// Template image locations, one per variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatePaths {
    /// Participation template
    pub participation: PathBuf,
    /// Core team template, male variant
    pub core_team_m: PathBuf,
    /// Core team template, female variant
    pub core_team_f: PathBuf,
    /// Evangelist template, male variant
    pub evangelist_m: PathBuf,
    /// Evangelist template, female variant
    pub evangelist_f: PathBuf,
    /// Gold winner template
    pub winner_gold: PathBuf,
    /// Silver winner template
    pub winner_silver: PathBuf,
    /// Bronze winner template
    pub winner_bronze: PathBuf,
}

impl Default for TemplatePaths {
    fn default() -> Self {
        Self {
            participation: PathBuf::from("templates/participation.png"),
            core_team_m: PathBuf::from("templates/core_m.png"),
            core_team_f: PathBuf::from("templates/core_f.png"),
            evangelist_m: PathBuf::from("templates/evangelist_m.png"),
            evangelist_f: PathBuf::from("templates/evangelist_f.png"),
            winner_gold: PathBuf::from("templates/winner_gold.png"),
            winner_silver: PathBuf::from("templates/winner_silver.png"),
            winner_bronze: PathBuf::from("templates/winner_bronze.png"),
        }
    }
}

impl TemplatePaths {
    /// The template image for a variant. Total: every variant has a path.
    #[must_use]
    pub fn path_for(&self, variant: TemplateVariant) -> &Path {
        match variant {
            TemplateVariant::Participation => &self.participation,
            TemplateVariant::CoreTeam(Gender::Male) => &self.core_team_m,
            TemplateVariant::CoreTeam(Gender::Female) => &self.core_team_f,
            TemplateVariant::Evangelist(Gender::Male) => &self.evangelist_m,
            TemplateVariant::Evangelist(Gender::Female) => &self.evangelist_f,
            TemplateVariant::Award(AwardTier::Gold) => &self.winner_gold,
            TemplateVariant::Award(AwardTier::Silver) => &self.winner_silver,
            TemplateVariant::Award(AwardTier::Bronze) => &self.winner_bronze,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read '{}': {e}", path.display())))?;
        toml::from_str(&raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Write configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Serialize the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Build the renderer layout from the text and layout sections.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] when the configured color is not a
    /// 6-digit hex value.
    pub fn render_layout(&self) -> Result<Layout> {
        Ok(Layout {
            name_y: self.layout.name_y,
            team_y: self.layout.team_y,
            verify_y: self.layout.verify_y,
            font_size: self.text.font_size,
            color: parse_hex_color(&self.text.color)?,
        })
    }
}
