use crate::error::LookupError;
use std::collections::BTreeMap;

/// Proficiency bonus and XP value for every legal challenge rating.
/// Fractional ratings are string keys ("1/8", "1/4", "1/2"); there is no
/// numeric CR type because the source data stores ratings as strings.
const CHALLENGE_RATINGS: [(&str, i32, i32); 34] = [
    ("0", 2, 10),
    ("1/8", 2, 25),
    ("1/4", 2, 50),
    ("1/2", 2, 100),
    ("1", 2, 200),
    ("2", 2, 450),
    ("3", 2, 700),
    ("4", 2, 1100),
    ("5", 3, 1800),
    ("6", 3, 2300),
    ("7", 3, 2900),
    ("8", 3, 3900),
    ("9", 4, 5000),
    ("10", 4, 5900),
    ("11", 4, 7200),
    ("12", 4, 8400),
    ("13", 5, 10000),
    ("14", 5, 11500),
    ("15", 5, 13000),
    ("16", 5, 15000),
    ("17", 6, 18000),
    ("18", 6, 20000),
    ("19", 6, 22000),
    ("20", 6, 25000),
    ("21", 7, 33000),
    ("22", 7, 41000),
    ("23", 7, 50000),
    ("24", 7, 62000),
    ("25", 8, 75000),
    ("26", 8, 90000),
    ("27", 8, 105000),
    ("28", 8, 120000),
    ("29", 9, 135000),
    ("30", 9, 155000),
];

/// Looks up `(proficiency bonus, xp)` for a challenge rating string.
///
/// # Errors
/// Returns a `LookupError::UnknownChallengeRating` if the rating is not one
/// of the 34 table entries. Unknown ratings are never defaulted; a record
/// carrying one is a fatal data error.
pub fn challenge_rating_lookup(
    challenge_rating: &str,
    monster: &str,
) -> Result<(i32, i32), LookupError> {
    CHALLENGE_RATINGS
        .iter()
        .find(|(cr, _, _)| *cr == challenge_rating)
        .map(|(_, proficiency, xp)| (*proficiency, *xp))
        .ok_or_else(|| LookupError::UnknownChallengeRating {
            challenge_rating: challenge_rating.to_string(),
            monster: monster.to_string(),
        })
}

/// The six abilities, in stat-block order. Attack records reference their
/// governing ability by this kind rather than by a copy of the score.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum AbilityKind {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 6] = [
        AbilityKind::Strength,
        AbilityKind::Dexterity,
        AbilityKind::Constitution,
        AbilityKind::Intelligence,
        AbilityKind::Wisdom,
        AbilityKind::Charisma,
    ];

    /// Maps the 1-based ability index used by attack records.
    #[must_use]
    pub fn from_index(index: u8) -> Option<AbilityKind> {
        Self::ALL.get(usize::from(index).checked_sub(1)?).copied()
    }

    /// Three-letter stat-block abbreviation, lower case ("str", "dex", ...).
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            AbilityKind::Strength => "str",
            AbilityKind::Dexterity => "dex",
            AbilityKind::Constitution => "con",
            AbilityKind::Intelligence => "int",
            AbilityKind::Wisdom => "wis",
            AbilityKind::Charisma => "cha",
        }
    }
}

/// Renders a modifier with an explicit sign: `+3`, `+0`, `-2`.
#[must_use]
pub fn format_modifier(modifier: i32) -> String {
    if modifier < 0 {
        modifier.to_string()
    } else {
        format!("+{modifier}")
    }
}

/// One ability score with an optional explicit saving-throw override.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Ability {
    pub score: i32,
    /// Explicit saving-throw bonus; `None` means the save equals the
    /// computed modifier.
    pub save_override: Option<i32>,
}

impl Ability {
    #[must_use]
    pub fn new(score: i32, save_override: Option<i32>) -> Self {
        Self {
            score,
            save_override,
        }
    }

    /// `floor((score - 10) / 2)`, the standard ability modifier.
    #[must_use]
    pub fn raw_modifier(&self) -> i32 {
        (self.score - 10).div_euclid(2)
    }

    /// Signed modifier string, e.g. score 19 renders as `+4`.
    #[must_use]
    pub fn modifier(&self) -> String {
        format_modifier(self.raw_modifier())
    }

    /// Signed saving-throw string; the explicit override wins when present.
    #[must_use]
    pub fn save(&self) -> String {
        format_modifier(self.save_override.unwrap_or_else(|| self.raw_modifier()))
    }
}

/// The complete set of six abilities. Construction requires all six; a
/// record with fewer scores is rejected during import.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Abilities {
    pub strength: Ability,
    pub dexterity: Ability,
    pub constitution: Ability,
    pub intelligence: Ability,
    pub wisdom: Ability,
    pub charisma: Ability,
}

impl Abilities {
    #[must_use]
    pub fn get(&self, kind: AbilityKind) -> &Ability {
        match kind {
            AbilityKind::Strength => &self.strength,
            AbilityKind::Dexterity => &self.dexterity,
            AbilityKind::Constitution => &self.constitution,
            AbilityKind::Intelligence => &self.intelligence,
            AbilityKind::Wisdom => &self.wisdom,
            AbilityKind::Charisma => &self.charisma,
        }
    }
}

/// `count` dice of `faces` sides, used for both hit dice and attack damage.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Dice {
    pub count: u32,
    pub faces: u32,
}

impl Dice {
    #[must_use]
    pub fn new(count: u32, faces: u32) -> Self {
        Self { count, faces }
    }

    /// Dice notation without a modifier, e.g. `8d10`.
    #[must_use]
    pub fn notation(&self) -> String {
        format!("{}d{}", self.count, self.faces)
    }
}

/// A movement mode. `Walk` is the default, unnamed mode in speed strings
/// like "30 ft"; everything else ("fly", "swim", "burrow", ...) is `Named`.
/// `Walk` sorts before every named mode.
#[derive(Debug, PartialEq, Eq, Clone, PartialOrd, Ord)]
pub enum SpeedMode {
    Walk,
    Named(String),
}

/// One speed entry: value in feet plus optional parenthesized annotation
/// such as `(hover)`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Speed {
    pub value: u32,
    pub info: Option<String>,
}

/// All movement modes of a monster, keyed by mode. Keys are unique and the
/// map order is deterministic.
pub type Speeds = BTreeMap<SpeedMode, Speed>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MeleeRange {
    pub reach: u32,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RangedRange {
    pub short: u32,
    pub long: Option<u32>,
}

/// Attack range: a melee component, a ranged component, both, or neither.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Range {
    pub melee: Option<MeleeRange>,
    pub ranged: Option<RangedRange>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Armor {
    pub armor_class: i32,
    pub kind: String,
    pub shield: bool,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Attack {
    pub name: String,
    /// The governing ability; resolved against the owning monster's
    /// `Abilities` when formatting to-hit and damage bonuses.
    pub ability: AbilityKind,
    pub damage: Dice,
    pub damage_type: String,
    pub range: Range,
    pub description: String,
}

/// A named free-text block; covers both traits and actions.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Feature {
    pub name: String,
    pub description: String,
}

/// Book citation for a record.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Source {
    pub book: String,
    pub page: u32,
}

/// A fully imported monster. Immutable after import; derived values
/// (modifiers, proficiency bonus, XP) are computed on access.
#[derive(Debug, PartialEq, Clone)]
pub struct Monster {
    pub name: String,
    pub source: Source,
    pub size: String,
    pub race: String,
    pub alignment: String,
    pub armor: Armor,
    pub base_hp: i32,
    pub hit_dice: Dice,
    pub speeds: Speeds,
    pub abilities: Abilities,
    pub spells: Vec<String>,
    pub skills: Option<String>,
    pub senses: Option<String>,
    pub passive_perception: i32,
    pub languages: Vec<String>,
    /// Raw challenge rating string, e.g. "1/4". Must be a key of the
    /// challenge-rating table; never coerced to a number.
    pub challenge_rating: String,
    pub attacks: Vec<Attack>,
    pub traits: Vec<Feature>,
    pub actions: Vec<Feature>,
}

impl Monster {
    /// Proficiency bonus as a plain integer.
    ///
    /// # Errors
    /// Fails with `LookupError::UnknownChallengeRating` if the monster
    /// carries a rating outside the table.
    pub fn raw_proficiency_bonus(&self) -> Result<i32, LookupError> {
        challenge_rating_lookup(&self.challenge_rating, &self.name).map(|(bonus, _)| bonus)
    }

    /// Proficiency bonus as a signed display string.
    ///
    /// # Errors
    /// Same failure mode as [`Monster::raw_proficiency_bonus`].
    pub fn proficiency_bonus(&self) -> Result<String, LookupError> {
        self.raw_proficiency_bonus().map(format_modifier)
    }

    /// Experience point value for defeating this monster.
    ///
    /// # Errors
    /// Fails with `LookupError::UnknownChallengeRating` if the monster
    /// carries a rating outside the table.
    pub fn xp(&self) -> Result<i32, LookupError> {
        challenge_rating_lookup(&self.challenge_rating, &self.name).map(|(_, xp)| xp)
    }
}
