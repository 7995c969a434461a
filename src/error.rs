use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum EncounterError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lookup(#[from] LookupError),
}

/// Mini-grammar mismatches in speed and range strings. The source code
/// attached to each variant is the offending string itself, named after the
/// monster that owns it, with the label covering the unconsumed remainder.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("Failed to parse speed string for {monster}")]
    #[diagnostic(
        code(parse::speed),
        help("Speed strings are comma-separated entries of the form `[mode] <feet> ft [(info)]`, e.g. \"30 ft, fly 60 ft (hover)\".")
    )]
    Speed {
        #[source_code]
        src: NamedSource<String>,
        #[label("No speed entry matches from here")]
        span: SourceSpan,
        monster: String,
    },

    #[error("Failed to parse attack range for {monster}")]
    #[diagnostic(
        code(parse::range),
        help("Attack ranges must be exactly `Melee (<feet> ft)` or `Ranged (<short>[/<long>] ft)`.")
    )]
    Range {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected `Melee (N ft)` or `Ranged (N[/M] ft)`")]
        span: SourceSpan,
        monster: String,
    },
}

/// Structural problems in the manual files themselves.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    #[error("Failed to read manual file {path}")]
    #[diagnostic(code(import::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record in manual file {path}")]
    #[diagnostic(
        code(import::invalid_record),
        help("Every record must carry the full monster schema; see the manual format documentation.")
    )]
    InvalidRecord {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{monster} has {found} ability scores, expected exactly 6")]
    #[diagnostic(code(import::ability_count))]
    AbilityCount { monster: String, found: usize },

    #[error("{monster} has {found} saving throws, expected exactly 6")]
    #[diagnostic(code(import::save_count))]
    SaveCount { monster: String, found: usize },

    #[error("Attack \"{attack}\" of {monster} references ability index {index}")]
    #[diagnostic(
        code(import::ability_index),
        help("Ability indices are 1-based: 1 = strength through 6 = charisma.")
    )]
    AbilityIndex {
        monster: String,
        attack: String,
        index: u8,
    },
}

/// Misses against the two fixed lookup tables: the bestiary itself and the
/// challenge-rating table.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum LookupError {
    #[error("No monster named \"{name}\" in the bestiary")]
    #[diagnostic(
        code(bestiary::monster_not_found),
        help("Lookups are case-insensitive but otherwise exact; check the spelling against the manual record name.")
    )]
    MonsterNotFound { name: String },

    #[error("Unknown challenge rating \"{challenge_rating}\" on {monster}")]
    #[diagnostic(
        code(bestiary::unknown_challenge_rating),
        help("Legal ratings are \"0\", \"1/8\", \"1/4\", \"1/2\" and \"1\" through \"30\".")
    )]
    UnknownChallengeRating {
        challenge_rating: String,
        monster: String,
    },
}
