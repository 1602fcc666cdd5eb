//! End-to-end certificate generation.
//!
//! Ties the roster store, ID assignment, and renderer together: validate
//! the requested identity, pick the template variant, draw, and name the
//! output file. One certificate per call, synchronously; rendering either
//! fully succeeds or produces nothing.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::id::{CertificateId, IdAssigner};
use crate::render::Renderer;
use crate::roster::{Role, Roster, RosterRecord, TemplateVariant};

/// A successfully generated certificate.
#[derive(Debug, Clone)]
pub struct GeneratedCertificate {
    /// Derived output file name (campaign, role, name, team)
    pub file_name: String,
    /// PNG-encoded certificate image
    pub png: Vec<u8>,
    /// The certificate ID printed on the verification line
    pub cert_id: CertificateId,
}

/// Generate one certificate.
///
/// For Participant and AwardWinner both name and team must match a single
/// roster row; for Core Team Member and Evangelist the team is derived from
/// the selected name.
///
/// # Errors
///
/// Surfaces every failure of the pipeline: roster problems, a non-matching
/// identity, an unmapped template discriminator, a missing certificate ID,
/// and template/font load failures.
pub fn generate(
    config: &Config,
    role: Role,
    name: &str,
    team: Option<&str>,
) -> Result<GeneratedCertificate> {
    let roster_path = config.rosters.path_for(role);
    let roster = Roster::load(role, roster_path)?;
    debug!(%role, rows = roster.len(), "roster loaded");

    let record = resolve(&roster, role, name, team)?;
    let variant = TemplateVariant::for_record(role, record)?;

    let cert_id = record
        .cert_id
        .as_deref()
        .ok_or_else(|| Error::CertificateIdMissing(record.name.clone()))?;
    let cert_id = CertificateId::parse(cert_id)?;

    let template_path = config.templates.path_for(variant);
    let template = image::open(template_path)
        .map_err(|e| Error::TemplateLoad {
            path: template_path.to_path_buf(),
            reason: e.to_string(),
        })?
        .to_rgba8();

    let renderer = Renderer::from_file(&config.text.font, config.render_layout()?)?;
    let verification = format!("ID: {cert_id} | verify at {}", config.event.verify_url);
    let png = renderer.render(&template, &record.name, &record.team, Some(&verification))?;

    let file_name = output_file_name(&config.event.campaign, role, &record.name, &record.team);
    info!(%role, file = %file_name, "certificate rendered");

    Ok(GeneratedCertificate {
        file_name,
        png,
        cert_id,
    })
}

/// Run the offline ID assignment pass for one role's roster.
///
/// Loads the roster, assigns IDs to rows lacking one, and writes the table
/// back only when something changed. Returns the number of rows newly
/// assigned.
///
/// # Errors
///
/// Surfaces roster load/save failures and malformed pre-existing IDs.
pub fn assign_ids(config: &Config, role: Role) -> Result<usize> {
    let path = config.rosters.path_for(role);
    let mut roster = Roster::load(role, path)?;

    let assigned = IdAssigner::new().assign_all(&mut roster)?;
    if assigned > 0 {
        roster.save(path)?;
    }
    info!(%role, assigned, "certificate IDs assigned");

    Ok(assigned)
}

fn resolve<'a>(
    roster: &'a Roster,
    role: Role,
    name: &str,
    team: Option<&str>,
) -> Result<&'a RosterRecord> {
    if role.team_is_user_selected() {
        roster.validate(name, team.unwrap_or(""))
    } else {
        roster.find_by_name(name)
    }
}

/// Compose the output file name from the campaign prefix, role, and the
/// person's name and team, with whitespace collapsed to underscores.
#[must_use]
pub fn output_file_name(campaign: &str, role: Role, name: &str, team: &str) -> String {
    let mut parts = vec![sanitize(campaign), role_slug(role).to_string(), sanitize(name)];
    let team = sanitize(team);
    if !team.is_empty() {
        parts.push(team);
    }
    format!("{}.png", parts.join("_"))
}

fn sanitize(part: &str) -> String {
    part.split_whitespace().collect::<Vec<_>>().join("_")
}

const fn role_slug(role: Role) -> &'static str {
    match role {
        Role::Participant => "Participation",
        Role::CoreTeamMember => "Core_Team",
        Role::Evangelist => "Evangelist",
        Role::AwardWinner => "Winner",
    }
}
