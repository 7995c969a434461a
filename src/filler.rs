use crate::bestiary::Bestiary;
use crate::error::EncounterError;
use crate::model::{format_modifier, Ability, AbilityKind, Dice, Monster, Range, SpeedMode, Speeds};

/// Multi-line values inside form fields are joined with a carriage return,
/// the FDF multi-line convention, never the platform newline.
const LINE_BREAK: &str = "\r";

/// Encounter difficulty multiplier by total creature count. Counts above 15
/// clamp to the last entry.
const ENCOUNTER_MULTIPLIERS: [f64; 16] = [
    0.0, 1.0, 1.5, 2.0, 2.0, 2.0, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0, 3.0, 3.0, 3.0, 4.0,
];

pub(crate) fn encounter_multiplier(total_creatures: u32) -> f64 {
    let index = (total_creatures as usize).min(ENCOUNTER_MULTIPLIERS.len() - 1);
    ENCOUNTER_MULTIPLIERS[index]
}

/// Hit dice with the total constitution contribution as a signed suffix;
/// no suffix when the total modifier is zero, e.g. `8d10` or `8d10+16`.
pub(crate) fn format_hit_dice(hit_dice: &Dice, constitution: &Ability) -> String {
    let mut result = hit_dice.notation();
    let modifier = hit_dice.count as i32 * constitution.raw_modifier();
    if modifier != 0 {
        result.push_str(&format_modifier(modifier));
    }
    result
}

/// One line per movement mode, e.g. `fly 60'(hover)`, sorted and joined
/// with the form line break.
pub(crate) fn format_speeds(speeds: &Speeds) -> String {
    let mut lines: Vec<String> = speeds
        .iter()
        .map(|(mode, speed)| {
            let mut line = String::new();
            if let SpeedMode::Named(name) = mode {
                line.push_str(name);
                line.push(' ');
            }
            line.push_str(&speed.value.to_string());
            line.push('\'');
            if let Some(info) = &speed.info {
                line.push_str(info);
            }
            line
        })
        .collect();

    lines.sort();
    lines.join(LINE_BREAK)
}

/// `5'`, `20'/60'`, or both components joined with ` or `.
pub(crate) fn format_range(range: &Range) -> String {
    let mut parts = Vec::new();
    if let Some(melee) = &range.melee {
        parts.push(format!("{}'", melee.reach));
    }
    if let Some(ranged) = &range.ranged {
        let mut part = format!("{}'", ranged.short);
        if let Some(long) = ranged.long {
            part.push_str(&format!("/{long}'"));
        }
        parts.push(part);
    }
    parts.join(" or ")
}

/// Pads a value with blank lines up to `min_lines` (never truncates) and
/// rejoins with the form line break.
pub(crate) fn format_multiline(min_lines: usize, value: &str) -> String {
    let mut lines: Vec<&str> = value.lines().collect();
    while lines.len() < min_lines {
        lines.push("");
    }
    lines.join(LINE_BREAK)
}

/// The traits field: CR and XP lines, optional skills and senses, traits,
/// a spellcasting block when any spells exist, then actions. One multi-line
/// blob in fixed order.
fn format_traits(monster: &Monster, xp: i32) -> String {
    let mut parts = vec![
        format!("CR: {}", monster.challenge_rating),
        format!("XP: {xp}"),
    ];
    if let Some(skills) = &monster.skills {
        parts.push(skills.clone());
    }
    if let Some(senses) = &monster.senses {
        parts.push(senses.clone());
    }
    for t in &monster.traits {
        parts.push(format!("{}: {}", t.name, t.description));
    }
    if !monster.spells.is_empty() {
        parts.push("Spellcasting".to_string());
        parts.extend(monster.spells.iter().cloned());
    }
    for action in &monster.actions {
        parts.push(format!("{}: {}", action.name, action.description));
    }
    parts.join(LINE_BREAK)
}

fn fill_monster(
    fields: &mut Vec<(String, String)>,
    index: usize,
    monster: &Monster,
    count: u32,
) -> Result<(), EncounterError> {
    let xp = monster.xp()?;
    let raw_proficiency = monster.raw_proficiency_bonus()?;

    let name = if count == 1 {
        monster.name.clone()
    } else {
        format!("{} x {count}", monster.name)
    };

    let mut push = |suffix: &str, value: String| {
        fields.push((format!("monster_{index}_{suffix}"), value));
    };

    push("name", name);
    push("size", monster.size.clone());
    push("ac", monster.armor.armor_class.to_string());
    push("armortype", monster.armor.kind.clone());
    push("race", monster.race.clone());
    push("alignment", monster.alignment.clone());
    push("basehp", monster.base_hp.to_string());
    push(
        "hitdice",
        format_hit_dice(&monster.hit_dice, &monster.abilities.constitution),
    );
    push("speed", format_speeds(&monster.speeds));
    push("passiveperception", monster.passive_perception.to_string());
    push("proficiencybonus", format_modifier(raw_proficiency));

    for kind in AbilityKind::ALL {
        let ability = monster.abilities.get(kind);
        let abbreviation = kind.abbreviation();
        push(&format!("{abbreviation}_score"), ability.score.to_string());
        push(&format!("{abbreviation}_mod"), ability.modifier());
        push(&format!("{abbreviation}_save"), ability.save());
    }

    push("traits", format_traits(monster, xp));

    for (attack_index, attack) in monster.attacks.iter().enumerate() {
        let attack_index = attack_index + 1;
        let ability = monster.abilities.get(attack.ability);
        let damage = format!(
            "{}{} {}",
            attack.damage.notation(),
            format_modifier(ability.raw_modifier() + raw_proficiency),
            attack.damage_type
        );

        let mut push_attack = |suffix: &str, value: String| {
            fields.push((
                format!("monster_{index}_attack_{attack_index}_{suffix}"),
                value,
            ));
        };

        push_attack("name", attack.name.clone());
        push_attack("tohit", ability.modifier());
        push_attack("damage", damage);
        // The sheet template fills to-hit twice; the form applies
        // last-write-wins, so the duplicate is harmless and kept.
        push_attack("tohit", ability.modifier());
        push_attack("range", format_range(&attack.range));
        push_attack("description", format_multiline(3, &attack.description));
    }

    Ok(())
}

/// Resolves every `(name, count)` request against the bestiary and emits
/// the flat field list: per-request fields in input order, then the single
/// aggregate `encounter_xp` field (`"<raw> (Adj. <adjusted>)"`).
///
/// # Errors
/// Fails fast on an unknown monster name or challenge rating; no partial
/// field list is returned.
pub fn fill_fields(
    bestiary: &Bestiary,
    requests: &[(&str, u32)],
) -> Result<Vec<(String, String)>, EncounterError> {
    let mut fields = Vec::new();
    let mut total_xp: i64 = 0;
    let mut total_creatures: u32 = 0;

    for (index, &(name, count)) in requests.iter().enumerate() {
        let monster = bestiary.get(name)?;
        total_xp += i64::from(monster.xp()?) * i64::from(count);
        total_creatures += count;
        fill_monster(&mut fields, index + 1, monster, count)?;
    }

    let multiplier = encounter_multiplier(total_creatures);
    let adjusted = (multiplier * total_xp as f64) as i64;
    fields.push((
        "encounter_xp".to_string(),
        format!("{total_xp} (Adj. {adjusted})"),
    ));

    Ok(fields)
}
