//! Roster loading, validation, and template-variant selection.
//!
//! A roster is a role-specific CSV table of people eligible for a
//! certificate. Columns are `name, team`, plus `gender` on the core-team and
//! evangelist rosters, `category` on the winners roster, and `cert_id` once
//! the ID assigner has run.
//!
//! Matching is case- and whitespace-insensitive on both name and team. One
//! [`normalize`] function backs validation, name-only resolution, and every
//! index key, so there is no second lookup path with different rules.
//!
//! Rosters are read-only at request time; the ID assigner is the sole
//! writer.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The four certificate roles.
///
/// The role determines which roster table is consulted and which template
/// selection rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Hackathon participant
    Participant,
    /// Core organizing team member
    CoreTeamMember,
    /// Community evangelist
    Evangelist,
    /// Award winner
    AwardWinner,
}

impl Role {
    /// All roles, in roster-file order.
    pub const ALL: [Self; 4] = [
        Self::Participant,
        Self::CoreTeamMember,
        Self::Evangelist,
        Self::AwardWinner,
    ];

    /// Whether the team is chosen by the user (`true`) or derived from the
    /// selected name (`false`).
    #[must_use]
    pub const fn team_is_user_selected(self) -> bool {
        matches!(self, Self::Participant | Self::AwardWinner)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Participant => "Participant",
            Self::CoreTeamMember => "Core Team Member",
            Self::Evangelist => "Evangelist",
            Self::AwardWinner => "Award Winner",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match normalize(input).as_str() {
            "participant" => Ok(Self::Participant),
            "coreteammember" | "core-team-member" | "core" => Ok(Self::CoreTeamMember),
            "evangelist" => Ok(Self::Evangelist),
            "awardwinner" | "award-winner" | "winner" => Ok(Self::AwardWinner),
            _ => Err(Error::Config(format!("unknown role: {input}"))),
        }
    }
}

/// Normalize a name or team for matching: lowercased, all whitespace
/// removed.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// One roster row: a person eligible for a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    /// Display name, as printed on the certificate
    pub name: String,
    /// Team name, as printed on the certificate
    pub team: String,
    /// Template discriminator on gendered rosters (`m` / `f`)
    #[serde(default)]
    pub gender: Option<String>,
    /// Template discriminator on the winners roster (`Gold` / `Silver` / `Bronze`)
    #[serde(default)]
    pub category: Option<String>,
    /// Assigned certificate ID; absent until the ID assigner runs
    #[serde(default)]
    pub cert_id: Option<String>,
}

/// A role's roster table plus a normalized lookup index.
#[derive(Debug, Clone)]
pub struct Roster {
    role: Role,
    records: Vec<RosterRecord>,
    index: HashMap<(String, String), usize>,
}

impl Roster {
    /// Load a roster from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RosterUnavailable`] when the file cannot be opened,
    /// [`Error::RosterEmpty`] when it has no data rows, and
    /// [`Error::DuplicateEntry`] when two rows collapse to the same
    /// normalized `(name, team)` pair.
    pub fn load(role: Role, path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::RosterUnavailable {
            role,
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_reader(role, file)
    }

    /// Load a roster from any CSV reader.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Roster::load`], minus the file-open step.
    pub fn from_reader<R: Read>(role: Role, reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for row in csv_reader.deserialize() {
            let record: RosterRecord = row?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(Error::RosterEmpty(role));
        }

        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let key = (normalize(&record.name), normalize(&record.team));
            if index.insert(key, i).is_some() {
                return Err(Error::DuplicateEntry {
                    name: record.name.clone(),
                    team: record.team.clone(),
                });
            }
        }

        Ok(Self {
            role,
            records,
            index,
        })
    }

    /// Write the roster back as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// The role this roster belongs to.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the roster has no rows. Never true for a loaded roster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows, in file order.
    #[must_use]
    pub fn records(&self) -> &[RosterRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [RosterRecord] {
        &mut self.records
    }

    /// Validate a user-entered `(name, team)` pair against the roster.
    ///
    /// Both inputs are normalized before the exact-pair lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMatch`] when no row matches; this is a
    /// user-correctable rejection, not a fatal failure.
    pub fn validate(&self, name: &str, team: &str) -> Result<&RosterRecord> {
        let key = (normalize(name), normalize(team));
        self.index
            .get(&key)
            .map(|&i| &self.records[i])
            .ok_or_else(|| Error::NoMatch {
                role: self.role,
                query: format!("{name} / {team}"),
            })
    }

    /// Resolve a record by name alone.
    ///
    /// Used for the roles where the team is derived from the selected name
    /// rather than chosen independently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMatch`] when no row matches.
    pub fn find_by_name(&self, name: &str) -> Result<&RosterRecord> {
        let wanted = normalize(name);
        self.records
            .iter()
            .find(|record| normalize(&record.name) == wanted)
            .ok_or_else(|| Error::NoMatch {
                role: self.role,
                query: name.to_string(),
            })
    }

    /// Display names, in file order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Team names, deduplicated, in first-appearance order.
    #[must_use]
    pub fn teams(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(normalize(&r.team)))
            .map(|r| r.team.as_str())
            .collect()
    }
}

/// Template discriminator on gendered rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// `m`
    Male,
    /// `f`
    Female,
}

impl Gender {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "m" | "male" => Some(Self::Male),
            "f" | "female" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Award tier on the winners roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwardTier {
    /// First place
    Gold,
    /// Second place
    Silver,
    /// Third place
    Bronze,
}

impl AwardTier {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "gold" => Some(Self::Gold),
            "silver" => Some(Self::Silver),
            "bronze" => Some(Self::Bronze),
            _ => None,
        }
    }
}

/// Which pre-designed template a record maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateVariant {
    /// Single participation template
    Participation,
    /// Gendered core-team templates
    CoreTeam(Gender),
    /// Gendered evangelist templates
    Evangelist(Gender),
    /// Tiered award templates
    Award(AwardTier),
}

impl TemplateVariant {
    /// Select the template variant for a record.
    ///
    /// Selection is a pure function of role and discriminator. An unknown
    /// discriminator value fails; no default template is substituted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnmappedTemplate`] naming the rejected value.
    pub fn for_record(role: Role, record: &RosterRecord) -> Result<Self> {
        let unmapped = |value: &str| Error::UnmappedTemplate {
            role,
            discriminator: value.to_string(),
        };
        match role {
            Role::Participant => Ok(Self::Participation),
            Role::CoreTeamMember => {
                let value = record.gender.as_deref().unwrap_or("");
                Gender::parse(value)
                    .map(Self::CoreTeam)
                    .ok_or_else(|| unmapped(value))
            }
            Role::Evangelist => {
                let value = record.gender.as_deref().unwrap_or("");
                Gender::parse(value)
                    .map(Self::Evangelist)
                    .ok_or_else(|| unmapped(value))
            }
            Role::AwardWinner => {
                let value = record.category.as_deref().unwrap_or("");
                AwardTier::parse(value)
                    .map(Self::Award)
                    .ok_or_else(|| unmapped(value))
            }
        }
    }
}
