//! Error types for Laurel.
//!
//! This module provides a unified error type for all certificate generation
//! operations, with specific variants for each failure mode. Nothing here is
//! retried: every failure is either a user-input problem or a static asset
//! or configuration problem.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::roster::Role;

/// A specialized `Result` type for Laurel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Laurel.
#[derive(Error, Debug)]
pub enum Error {
    /// Roster file for a role is missing or unreadable
    #[error("roster for {role} is not available at '{path}': {reason}")]
    RosterUnavailable {
        /// Role whose roster was requested
        role: Role,
        /// Path that was tried
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Roster file exists but contains no data rows
    #[error("roster for {0} is empty")]
    RosterEmpty(Role),

    /// Two roster rows collapse to the same normalized (name, team) pair
    #[error("duplicate roster entry for '{name}' / '{team}'")]
    DuplicateEntry {
        /// Display name of the duplicated row
        name: String,
        /// Team name of the duplicated row
        team: String,
    },

    /// Entered identity does not match any roster row
    #[error("no matching {role} roster entry for '{query}'")]
    NoMatch {
        /// Role whose roster was searched
        role: Role,
        /// The identity as entered
        query: String,
    },

    /// Discriminator value has no configured template
    #[error("no template mapped for {role} with discriminator '{discriminator}'")]
    UnmappedTemplate {
        /// Role of the record
        role: Role,
        /// The unrecognized discriminator value
        discriminator: String,
    },

    /// Record has no certificate ID yet (the ID assigner has not run)
    #[error("record for '{0}' has no certificate ID; run `laurel assign-ids` first")]
    CertificateIdMissing(String),

    /// Certificate ID failed validation
    #[error("invalid certificate ID '{id}': {reason}")]
    InvalidId {
        /// The rejected value
        id: String,
        /// Reason for rejection
        reason: String,
    },

    /// Font file is missing or malformed
    #[error("failed to load font '{path}': {reason}")]
    FontLoad {
        /// Font path that was tried
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Template image is missing or undecodable
    #[error("failed to load template '{path}': {reason}")]
    TemplateLoad {
        /// Template path that was tried
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Color string is not a 6-digit hex value
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Image encoding failed
    #[error("image error: {0}")]
    Image(String),

    /// Configuration file error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed roster row
    #[error("roster parse error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Returns whether this error is a correctable user-input problem
    /// rather than a configuration or asset failure.
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }
}
