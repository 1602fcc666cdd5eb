//! Certificate ID generation and assignment.
//!
//! A certificate ID is a short alphanumeric token printed on each
//! certificate for later verification.
//!
//! ## ID Format
//!
//! - 5 characters drawn uniformly from `A-Z0-9` (36 symbols, 36^5 ≈ 60M)
//! - stored and compared lowercase
//!
//! Collisions are astronomically unlikely at roster scale, but every draw is
//! still checked against the IDs already present in the table and the IDs
//! drawn earlier in the same run, so pairwise uniqueness within a roster is
//! an invariant rather than a probability.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};
use crate::roster::Roster;

/// The character set IDs are drawn from.
pub const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a certificate ID.
pub const ID_LENGTH: usize = 5;

/// A validated certificate ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CertificateId {
    id: String,
}

impl CertificateId {
    /// Parse and validate a certificate ID from a string.
    ///
    /// Input is trimmed and lowercased before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID has the wrong length or contains
    /// characters outside `a-z0-9`.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        if normalized.chars().count() != ID_LENGTH {
            return Err(Error::InvalidId {
                id: input.to_string(),
                reason: format!(
                    "must be {ID_LENGTH} characters, got {}",
                    normalized.chars().count()
                ),
            });
        }

        for c in normalized.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() {
                return Err(Error::InvalidId {
                    id: input.to_string(),
                    reason: format!("invalid character '{c}'"),
                });
            }
        }

        Ok(Self { id: normalized })
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Assigns missing certificate IDs across a roster.
///
/// The assigner is the sole writer of `cert_id` values and runs as an
/// offline batch pass, never concurrently with rendering.
#[derive(Debug, Default)]
pub struct IdAssigner;

impl IdAssigner {
    /// Create a new ID assigner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Assign an ID to every record lacking one.
    ///
    /// Pre-existing IDs are preserved verbatim, so running the pass twice on
    /// a fully assigned roster is a no-op. Returns the number of rows newly
    /// assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if a pre-existing ID fails validation.
    pub fn assign_all(&self, roster: &mut Roster) -> Result<usize> {
        let mut taken: HashSet<String> = HashSet::new();
        for record in roster.records() {
            if let Some(id) = &record.cert_id {
                taken.insert(CertificateId::parse(id)?.as_str().to_string());
            }
        }

        let mut rng = rand::thread_rng();
        let mut assigned = 0;
        for record in roster.records_mut() {
            if record.cert_id.is_some() {
                continue;
            }
            let id = loop {
                let candidate = draw_id(&mut rng);
                if taken.insert(candidate.clone()) {
                    break candidate;
                }
            };
            record.cert_id = Some(id);
            assigned += 1;
        }

        Ok(assigned)
    }
}

fn draw_id<R: Rng>(rng: &mut R) -> String {
    (0..ID_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..ID_CHARSET.len());
            (ID_CHARSET[idx] as char).to_ascii_lowercase()
        })
        .collect()
}
