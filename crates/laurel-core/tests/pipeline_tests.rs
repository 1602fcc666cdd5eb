//! End-to-end pipeline tests: roster loading, ID assignment, and
//! certificate generation against a synthesized campaign directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use laurel_core::certificate;
use laurel_core::config::Config;
use laurel_core::error::Error;
use laurel_core::roster::{Role, Roster};

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

fn system_font() -> Option<PathBuf> {
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

fn write_template(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgb([40, 40, 60])
        } else {
            image::Rgb([50, 50, 70])
        }
    });
    img.save(path).unwrap();
}

/// Build a campaign directory with rosters and templates under `dir`.
fn campaign(dir: &TempDir) -> Config {
    let root = dir.path();
    fs::create_dir_all(root.join("rosters")).unwrap();
    fs::create_dir_all(root.join("templates")).unwrap();

    fs::write(
        root.join("rosters/participants.csv"),
        "name,team,cert_id\n\
         Asha Roy,Byte Busters,a1b2c\n\
         Lina Das,Null Pointers,\n",
    )
    .unwrap();
    fs::write(
        root.join("rosters/winners.csv"),
        "name,team,category,cert_id\n\
         Asha Roy,Byte Busters,Platinum,x9y8z\n\
         Ravi Sen,Stack Smashers,Gold,q7w6e\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.event.campaign = "Hack4Bengal Season 3".to_string();
    config.rosters.participants = root.join("rosters/participants.csv");
    config.rosters.winners = root.join("rosters/winners.csv");
    config.templates.participation = root.join("templates/participation.png");
    config.templates.winner_gold = root.join("templates/winner_gold.png");
    write_template(&config.templates.participation, 600, 400);
    write_template(&config.templates.winner_gold, 600, 400);

    config.text.font_size = 32.0;
    config.layout.name_y = 120;
    config.layout.team_y = 220;
    config.layout.verify_y = Some(340);

    config
}

#[test]
fn generated_certificate_matches_template_dimensions() {
    let Some(font) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let dir = TempDir::new().unwrap();
    let mut config = campaign(&dir);
    config.text.font = font;

    let cert =
        certificate::generate(&config, Role::Participant, "Asha Roy", Some("Byte Busters"))
            .unwrap();

    assert!(cert.file_name.contains("Asha_Roy"));
    assert!(cert.file_name.contains("Byte_Busters"));
    assert_eq!(cert.cert_id.as_str(), "a1b2c");

    let decoded = image::load_from_memory(&cert.png).unwrap();
    assert_eq!(decoded.width(), 600);
    assert_eq!(decoded.height(), 400);
}

#[test]
fn validation_is_case_and_whitespace_insensitive_end_to_end() {
    let Some(font) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let dir = TempDir::new().unwrap();
    let mut config = campaign(&dir);
    config.text.font = font;

    let cert =
        certificate::generate(&config, Role::Participant, "asha roy", Some("bytebusters"))
            .unwrap();
    assert_eq!(cert.cert_id.as_str(), "a1b2c");
}

#[test]
fn wrong_team_is_rejected_before_any_rendering() {
    let dir = TempDir::new().unwrap();
    let config = campaign(&dir);

    let err = certificate::generate(&config, Role::Participant, "Asha Roy", Some("Wrong Team"))
        .unwrap_err();
    assert!(matches!(err, Error::NoMatch { .. }));
    assert!(err.is_user_correctable());
}

#[test]
fn unmapped_award_category_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = campaign(&dir);

    let err = certificate::generate(&config, Role::AwardWinner, "Asha Roy", Some("Byte Busters"))
        .unwrap_err();
    match err {
        Error::UnmappedTemplate {
            role,
            discriminator,
        } => {
            assert_eq!(role, Role::AwardWinner);
            assert_eq!(discriminator, "Platinum");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_certificate_id_halts_generation() {
    let dir = TempDir::new().unwrap();
    let config = campaign(&dir);

    let err = certificate::generate(&config, Role::Participant, "Lina Das", Some("Null Pointers"))
        .unwrap_err();
    assert!(matches!(err, Error::CertificateIdMissing(_)));
}

#[test]
fn missing_roster_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let config = campaign(&dir);

    let err = certificate::generate(&config, Role::Evangelist, "Asha Roy", None).unwrap_err();
    assert!(matches!(err, Error::RosterUnavailable { .. }));
}

#[test]
fn assign_ids_fills_and_persists() {
    let dir = TempDir::new().unwrap();
    let config = campaign(&dir);

    let assigned = certificate::assign_ids(&config, Role::Participant).unwrap();
    assert_eq!(assigned, 1);

    let roster = Roster::load(Role::Participant, &config.rosters.participants).unwrap();
    let mut seen = std::collections::HashSet::new();
    for record in roster.records() {
        let id = record.cert_id.as_deref().expect("every row has an ID");
        assert!(seen.insert(id.to_string()), "IDs must be pairwise distinct");
    }

    // Pre-existing ID preserved verbatim.
    assert_eq!(
        roster.validate("Asha Roy", "Byte Busters").unwrap().cert_id.as_deref(),
        Some("a1b2c")
    );
}

#[test]
fn assign_ids_twice_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let config = campaign(&dir);

    certificate::assign_ids(&config, Role::Participant).unwrap();
    let first = fs::read_to_string(&config.rosters.participants).unwrap();

    let assigned = certificate::assign_ids(&config, Role::Participant).unwrap();
    assert_eq!(assigned, 0);
    let second = fs::read_to_string(&config.rosters.participants).unwrap();
    assert_eq!(first, second);
}
