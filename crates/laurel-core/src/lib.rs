//! # Laurel Core Library
//!
//! `laurel-core` provides the certificate generation pipeline for Laurel, a
//! hackathon certificate toolkit: roster validation, certificate ID
//! assignment, and text rendering onto pre-designed templates.
//!
//! ## Modules
//!
//! - [`certificate`] - End-to-end generation pipeline
//! - [`config`] - Campaign configuration management
//! - [`error`] - Unified error type
//! - [`id`] - Certificate ID generation and assignment
//! - [`render`] - Template text rendering
//! - [`roster`] - Roster loading, validation, and template selection
//!
//! ## Example
//!
//! ```rust,ignore
//! use laurel_core::certificate;
//! use laurel_core::config::Config;
//! use laurel_core::roster::Role;
//!
//! let config = Config::load("laurel.toml".as_ref())?;
//! let cert = certificate::generate(&config, Role::Participant, "Asha Roy", Some("Byte Busters"))?;
//! std::fs::write(&cert.file_name, &cert.png)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod certificate;
pub mod config;
pub mod error;
pub mod id;
pub mod render;
pub mod roster;

pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
