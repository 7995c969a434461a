use encounter_core::importer::import_manual;
use encounter_core::model::{AbilityKind, MeleeRange, Monster, RangedRange, SpeedMode};
use std::path::Path;

fn fixture_monsters() -> Vec<Monster> {
    import_manual(Path::new("tests/manuals/monster_manual.json")).unwrap()
}

fn find<'a>(monsters: &'a [Monster], name: &str) -> &'a Monster {
    monsters
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("Fixture manual should contain {name}"))
}

#[test]
fn test_import_manual_reads_all_records() {
    let monsters = fixture_monsters();
    assert_eq!(monsters.len(), 3);
}

#[test]
fn test_speeds_are_parsed_into_modes() {
    let monsters = fixture_monsters();
    let aarakocra = find(&monsters, "Aarakocra");

    assert_eq!(aarakocra.speeds.len(), 2);
    assert_eq!(aarakocra.speeds[&SpeedMode::Walk].value, 20);
    assert_eq!(
        aarakocra.speeds[&SpeedMode::Named("fly".to_string())].value,
        50
    );
}

#[test]
fn test_abilities_and_derived_values() {
    let monsters = fixture_monsters();
    let aarakocra = find(&monsters, "Aarakocra");

    assert_eq!(aarakocra.abilities.dexterity.score, 14);
    assert_eq!(aarakocra.abilities.dexterity.modifier(), "+2");
    assert_eq!(aarakocra.abilities.charisma.save(), "+0");
    assert_eq!(aarakocra.proficiency_bonus().unwrap(), "+2");
    assert_eq!(aarakocra.xp().unwrap(), 50);
}

#[test]
fn test_javelin_variants_merge_with_union_range() {
    let monsters = fixture_monsters();
    let aarakocra = find(&monsters, "Aarakocra");

    let names: Vec<&str> = aarakocra.attacks.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Talon", "Javelin"]);

    let javelin = &aarakocra.attacks[1];
    assert_eq!(javelin.ability, AbilityKind::Strength);
    assert_eq!(javelin.range.melee, Some(MeleeRange { reach: 5 }));
    assert_eq!(
        javelin.range.ranged,
        Some(RangedRange {
            short: 30,
            long: Some(120)
        })
    );
    // Identical descriptions collapse to a single copy.
    assert_eq!(javelin.description, "Weapon Attack, one target.");
}

#[test]
fn test_distinct_attacks_stay_separate() {
    let monsters = fixture_monsters();
    let gnoll = find(&monsters, "Gnoll");

    let names: Vec<&str> = gnoll.attacks.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Bite", "Spear", "Longbow"]);
}

#[test]
fn test_optional_blocks_default_to_empty() {
    let monsters = fixture_monsters();
    let gnoll = find(&monsters, "Gnoll");

    assert!(gnoll.spells.is_empty());
    assert!(gnoll.actions.is_empty());
    assert_eq!(gnoll.skills, None);
    assert_eq!(gnoll.senses, None);
}

#[test]
fn test_languages_split_from_comma_list() {
    let monsters = fixture_monsters();
    let aarakocra = find(&monsters, "Aarakocra");
    assert_eq!(aarakocra.languages, vec!["Auran", "Aarakocra"]);
}

#[test]
fn test_source_citation_is_kept() {
    let monsters = fixture_monsters();
    let naga = find(&monsters, "Bone Naga (Guardian)");
    assert_eq!(naga.source.book, "MM");
    assert_eq!(naga.source.page, 233);
    assert_eq!(naga.spells, vec!["command", "shield of faith"]);
}
