// Importer error path tests: every malformed record must abort the import
// with a descriptive error, never a partial bestiary.

use encounter_core::error::{EncounterError, LookupError, ParseError, SchemaError};
use encounter_core::importer::import_manual;
use std::fs;
use std::path::PathBuf;

/// A complete, valid single-record manual to mutate per test.
fn base_record() -> serde_json::Value {
    serde_json::json!({
        "name": "Test Subject",
        "source": ["TST", 1],
        "size": "Medium",
        "type": "humanoid",
        "alignment": "neutral",
        "ac": [10, "none", false],
        "hp": 10,
        "hd": [2, 8],
        "speed": "30 ft",
        "scores": [10, 10, 10, 10, 10, 10],
        "saves": [null, null, null, null, null, null],
        "passive_perception": 10,
        "challenge_rating": "1",
        "attacks": [
            {
                "name": "Slam",
                "ability": 1,
                "damage": [1, 6, "bludgeoning"],
                "range": "Melee (5 ft)",
                "description": "A slam."
            }
        ]
    })
}

fn write_manual(dir: &tempfile::TempDir, record: serde_json::Value) -> PathBuf {
    let manual = serde_json::json!({ "Test Subject": record });
    let path = dir.path().join("manual.json");
    fs::write(&path, manual.to_string()).unwrap();
    path
}

fn import_mutated(mutate: impl FnOnce(&mut serde_json::Value)) -> EncounterError {
    let dir = tempfile::tempdir().unwrap();
    let mut record = base_record();
    mutate(&mut record);
    let path = write_manual(&dir, record);
    import_manual(&path).expect_err("Mutated record should fail to import")
}

#[test]
fn test_valid_base_record_imports() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manual(&dir, base_record());
    let monsters = import_manual(&path).unwrap();
    assert_eq!(monsters.len(), 1);
    assert_eq!(monsters[0].name, "Test Subject");
}

#[test]
fn test_missing_file_is_io_error() {
    let err = import_manual(std::path::Path::new("tests/manuals/no_such_file.json"))
        .expect_err("Missing file should fail");
    assert!(matches!(
        err,
        EncounterError::Schema(SchemaError::Io { .. })
    ));
}

#[test]
fn test_unparseable_json_is_record_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let err = import_manual(&path).expect_err("Broken JSON should fail");
    assert!(matches!(
        err,
        EncounterError::Schema(SchemaError::InvalidRecord { .. })
    ));
}

#[test]
fn test_missing_required_field_is_record_error() {
    let err = import_mutated(|record| {
        record.as_object_mut().unwrap().remove("hp");
    });
    assert!(matches!(
        err,
        EncounterError::Schema(SchemaError::InvalidRecord { .. })
    ));
}

#[test]
fn test_five_ability_scores_are_rejected() {
    let err = import_mutated(|record| {
        record["scores"] = serde_json::json!([10, 10, 10, 10, 10]);
    });
    match err {
        EncounterError::Schema(SchemaError::AbilityCount { monster, found }) => {
            assert_eq!(monster, "Test Subject");
            assert_eq!(found, 5);
        }
        other => panic!("Expected AbilityCount, got {other:?}"),
    }
}

#[test]
fn test_seven_saves_are_rejected() {
    let err = import_mutated(|record| {
        record["saves"] = serde_json::json!([null, null, null, null, null, null, null]);
    });
    assert!(matches!(
        err,
        EncounterError::Schema(SchemaError::SaveCount { found: 7, .. })
    ));
}

#[test]
fn test_out_of_range_ability_index_is_rejected() {
    let err = import_mutated(|record| {
        record["attacks"][0]["ability"] = serde_json::json!(7);
    });
    assert!(matches!(
        err,
        EncounterError::Schema(SchemaError::AbilityIndex { index: 7, .. })
    ));
}

#[test]
fn test_unknown_challenge_rating_fails_at_import() {
    let err = import_mutated(|record| {
        record["challenge_rating"] = serde_json::json!("31");
    });
    match err {
        EncounterError::Lookup(LookupError::UnknownChallengeRating {
            challenge_rating,
            monster,
        }) => {
            assert_eq!(challenge_rating, "31");
            assert_eq!(monster, "Test Subject");
        }
        other => panic!("Expected UnknownChallengeRating, got {other:?}"),
    }
}

#[test]
fn test_garbled_speed_string_is_parse_error() {
    let err = import_mutated(|record| {
        record["speed"] = serde_json::json!("30 ft, swims badly");
    });
    assert!(matches!(
        err,
        EncounterError::Parse(ParseError::Speed { .. })
    ));
}

#[test]
fn test_garbled_range_string_is_parse_error() {
    let err = import_mutated(|record| {
        record["attacks"][0]["range"] = serde_json::json!("Thrown (20 ft)");
    });
    assert!(matches!(
        err,
        EncounterError::Parse(ParseError::Range { .. })
    ));
}

#[test]
fn test_explicit_save_override_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let mut record = base_record();
    record["saves"] = serde_json::json!([null, 5, null, null, null, -3]);
    let path = write_manual(&dir, record);

    let monsters = import_manual(&path).unwrap();
    assert_eq!(monsters[0].abilities.dexterity.save(), "+5");
    assert_eq!(monsters[0].abilities.charisma.save(), "-3");
    // Unset saves fall back to the computed modifier.
    assert_eq!(monsters[0].abilities.strength.save(), "+0");
}
