use crate::error::{EncounterError, SchemaError};
use crate::model::{
    challenge_rating_lookup, Abilities, Ability, AbilityKind, Armor, Attack, Dice, Feature,
    Monster, Range, Source,
};
use crate::parser::{parse_range, parse_speeds};
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One monster record as it appears on disk. Heterogeneous JSON arrays
/// (`source`, `ac`, `hd`, `damage`) deserialize as tuples; optional blocks
/// default to empty.
#[derive(Debug, Deserialize)]
pub(crate) struct RawMonster {
    name: String,
    source: (String, u32),
    size: String,
    #[serde(rename = "type")]
    race: String,
    alignment: String,
    ac: (i32, String, bool),
    hp: i32,
    hd: (u32, u32),
    speed: String,
    scores: Vec<i64>,
    /// Each entry is either an explicit integer save bonus or any other
    /// JSON value as the "use the computed modifier" sentinel.
    saves: Vec<serde_json::Value>,
    #[serde(default)]
    spells: Vec<String>,
    #[serde(default)]
    skills: Option<String>,
    #[serde(default)]
    senses: Option<String>,
    passive_perception: i32,
    #[serde(default)]
    languages: Option<String>,
    challenge_rating: String,
    attacks: Vec<RawAttack>,
    #[serde(default)]
    traits: Vec<RawFeature>,
    #[serde(default)]
    actions: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawAttack {
    name: String,
    /// 1-based index into the six abilities.
    ability: u8,
    damage: (u32, u32, String),
    #[serde(default)]
    range: Option<String>,
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    name: String,
    description: String,
}

fn parse_abilities(raw: &RawMonster) -> Result<Abilities, SchemaError> {
    if raw.scores.len() != 6 {
        return Err(SchemaError::AbilityCount {
            monster: raw.name.clone(),
            found: raw.scores.len(),
        });
    }
    if raw.saves.len() != 6 {
        return Err(SchemaError::SaveCount {
            monster: raw.name.clone(),
            found: raw.saves.len(),
        });
    }

    let mut abilities: Vec<Ability> = Vec::with_capacity(6);
    for (score, save) in raw.scores.iter().zip(&raw.saves) {
        let save_override = save.as_i64().map(|v| v as i32);
        abilities.push(Ability::new(*score as i32, save_override));
    }

    Ok(Abilities {
        strength: abilities[0].clone(),
        dexterity: abilities[1].clone(),
        constitution: abilities[2].clone(),
        intelligence: abilities[3].clone(),
        wisdom: abilities[4].clone(),
        charisma: abilities[5].clone(),
    })
}

/// Base name of an attack variant: the text before the first parenthesis,
/// trimmed. "Claw (Left)" and "Claw (Right)" share the base name "Claw".
fn base_name(name: &str) -> &str {
    match name.find('(') {
        Some(pos) => name[..pos].trim(),
        None => name,
    }
}

fn all_equal<T: PartialEq>(mut items: impl Iterator<Item = T>) -> bool {
    match items.next() {
        Some(first) => items.all(|item| item == first),
        None => true,
    }
}

/// Union of the group's ranges: per component, the last attack that
/// declares one wins, scanning in original order.
fn merge_ranges<'a>(ranges: impl Iterator<Item = &'a Range>) -> Range {
    let mut result = Range::default();
    for range in ranges {
        if range.melee.is_some() {
            result.melee = range.melee;
        }
        if range.ranged.is_some() {
            result.ranged = range.ranged;
        }
    }
    result
}

fn merge_group(base: String, group: Vec<Attack>) -> Vec<Attack> {
    let mechanics_match = all_equal(group.iter().map(|a| a.ability))
        && all_equal(group.iter().map(|a| &a.damage))
        && all_equal(group.iter().map(|a| &a.damage_type));
    if !mechanics_match {
        // Differing core mechanics must never be collapsed; keep one entry
        // per original variant.
        return group;
    }

    let description = if all_equal(group.iter().map(|a| &a.description)) {
        group[0].description.clone()
    } else {
        group
            .iter()
            .map(|a| a.description.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };

    if group.len() > 1 {
        debug!("Merging {} attack variants into \"{base}\"", group.len());
    }

    vec![Attack {
        name: base,
        ability: group[0].ability,
        damage: group[0].damage,
        damage_type: group[0].damage_type.clone(),
        range: merge_ranges(group.iter().map(|a| &a.range)),
        description,
    }]
}

/// Collapses attack variants that share a base name and identical core
/// mechanics (ability, damage, damage type) into one representative attack.
/// Groups with differing mechanics pass through untouched. Deterministic
/// given a fixed input order: groups keep first-appearance order.
pub(crate) fn merge_attacks(attacks: Vec<Attack>) -> Vec<Attack> {
    let mut groups: Vec<(String, Vec<Attack>)> = Vec::new();
    for attack in attacks {
        let base = base_name(&attack.name).to_string();
        match groups.iter_mut().find(|(name, _)| *name == base) {
            Some((_, group)) => group.push(attack),
            None => groups.push((base, vec![attack])),
        }
    }

    groups
        .into_iter()
        .flat_map(|(base, group)| merge_group(base, group))
        .collect()
}

/// Turns one raw record into a validated [`Monster`].
///
/// The challenge rating is resolved against the rating table eagerly so a
/// record carrying an unknown rating fails here, named, instead of later
/// during sheet filling.
///
/// # Errors
/// Speed/range grammar mismatches, wrong-length ability arrays, out-of-range
/// attack ability indices and unknown challenge ratings all abort the
/// import.
pub(crate) fn parse_monster(raw: RawMonster) -> Result<Monster, EncounterError> {
    let speeds = parse_speeds(&raw.speed, &raw.name)?;
    let abilities = parse_abilities(&raw)?;

    let mut attacks = Vec::with_capacity(raw.attacks.len());
    for attack in &raw.attacks {
        let ability =
            AbilityKind::from_index(attack.ability).ok_or_else(|| SchemaError::AbilityIndex {
                monster: raw.name.clone(),
                attack: attack.name.clone(),
                index: attack.ability,
            })?;
        attacks.push(Attack {
            name: attack.name.clone(),
            ability,
            damage: Dice::new(attack.damage.0, attack.damage.1),
            damage_type: attack.damage.2.clone(),
            range: parse_range(attack.range.as_deref(), &raw.name)?,
            description: attack.description.clone(),
        });
    }
    let attacks = merge_attacks(attacks);

    challenge_rating_lookup(&raw.challenge_rating, &raw.name)?;

    let languages = raw
        .languages
        .as_deref()
        .map(|list| list.split(',').map(|l| l.trim().to_string()).collect())
        .unwrap_or_default();

    let feature = |f: &RawFeature| Feature {
        name: f.name.clone(),
        description: f.description.clone(),
    };

    Ok(Monster {
        name: raw.name,
        source: Source {
            book: raw.source.0,
            page: raw.source.1,
        },
        size: raw.size,
        race: raw.race,
        alignment: raw.alignment,
        armor: Armor {
            armor_class: raw.ac.0,
            kind: raw.ac.1,
            shield: raw.ac.2,
        },
        base_hp: raw.hp,
        hit_dice: Dice::new(raw.hd.0, raw.hd.1),
        speeds,
        abilities,
        spells: raw.spells,
        skills: raw.skills,
        senses: raw.senses,
        passive_perception: raw.passive_perception,
        languages,
        challenge_rating: raw.challenge_rating,
        attacks,
        traits: raw.traits.iter().map(feature).collect(),
        actions: raw.actions.iter().map(feature).collect(),
    })
}

/// Imports every record of one manual file (a JSON map of record name to
/// record object).
///
/// # Errors
/// Fails on unreadable files, malformed JSON and on the first record that
/// [`parse_monster`] rejects.
pub fn import_manual(path: &Path) -> Result<Vec<Monster>, EncounterError> {
    let contents = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records: BTreeMap<String, RawMonster> =
        serde_json::from_str(&contents).map_err(|source| SchemaError::InvalidRecord {
            path: path.display().to_string(),
            source,
        })?;

    let monsters = records
        .into_values()
        .map(parse_monster)
        .collect::<Result<Vec<_>, _>>()?;
    info!("Imported {} monsters from {}", monsters.len(), path.display());
    Ok(monsters)
}
