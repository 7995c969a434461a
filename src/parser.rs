use crate::error::ParseError;
use crate::model::{MeleeRange, Range, RangedRange, Speed, SpeedMode, Speeds};
use miette::NamedSource;

/// A byte-position cursor over one stat string. Both mini-grammars are
/// anchored: every match starts exactly at `position`, so any leftover text
/// is a parse failure rather than silently dropped garbage.
struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Consumes `literal` if it starts the remaining input.
    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.position += literal.len();
            true
        } else {
            false
        }
    }

    /// Reads one or more ASCII digits as a number.
    fn read_number(&mut self) -> Option<u32> {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.position == start {
            return None;
        }
        self.input[start..self.position].parse().ok()
    }

    /// Reads a word starting with a letter or underscore, e.g. a movement
    /// mode name like `fly`.
    fn read_word(&mut self) -> Option<&'a str> {
        if !self.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
            return None;
        }
        let start = self.position;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        Some(&self.input[start..self.position])
    }

    /// Reads a parenthesized annotation, parens included, e.g. `(hover)`.
    fn read_parenthetical(&mut self) -> Option<&'a str> {
        if self.peek() != Some('(') {
            return None;
        }
        let start = self.position;
        self.advance();
        while self.peek().is_some_and(|c| c != ')') {
            self.advance();
        }
        if self.advance().is_none() {
            // Unclosed paren: leave the text unconsumed so the caller
            // reports it instead of dropping it.
            self.position = start;
            return None;
        }
        Some(&self.input[start..self.position])
    }
}

fn speed_error(input: &str, position: usize, monster: &str) -> ParseError {
    ParseError::Speed {
        src: NamedSource::new(format!("{monster} (speed)"), input.to_string()),
        span: (position..input.len()).into(),
        monster: monster.to_string(),
    }
}

fn range_error(input: &str, position: usize, monster: &str) -> ParseError {
    ParseError::Range {
        src: NamedSource::new(format!("{monster} (range)"), input.to_string()),
        span: (position..input.len()).into(),
        monster: monster.to_string(),
    }
}

/// Parses a speed string like `"20 ft, fly 50 ft (hover)"` into the mode
/// map. Entries are `[mode] <feet> ft [(info)]`, comma-separated; the
/// unnamed entry is the walking speed.
///
/// # Errors
/// Returns a `ParseError::Speed` spanning the unconsumed remainder as soon
/// as the grammar fails to match at the current position.
pub fn parse_speeds(input: &str, monster: &str) -> Result<Speeds, ParseError> {
    let mut cursor = Cursor::new(input);
    let mut speeds = Speeds::new();

    cursor.skip_whitespace();
    while !cursor.is_at_end() {
        let entry_start = cursor.position;
        let mode = match cursor.read_word() {
            Some(word) => SpeedMode::Named(word.to_string()),
            None => SpeedMode::Walk,
        };
        cursor.skip_whitespace();
        let Some(value) = cursor.read_number() else {
            return Err(speed_error(input, entry_start, monster));
        };
        cursor.skip_whitespace();
        if !cursor.eat("ft") {
            return Err(speed_error(input, entry_start, monster));
        }
        cursor.skip_whitespace();
        let info = cursor.read_parenthetical().map(str::to_string);
        cursor.skip_whitespace();
        cursor.eat(",");
        cursor.skip_whitespace();

        speeds.insert(mode, Speed { value, info });
    }

    Ok(speeds)
}

/// Parses an attack range string. Exactly two alternatives exist,
/// `Melee (<feet> ft)` and `Ranged (<short>[/<long>] ft)`; an absent or
/// empty string means the attack declares no range at all.
///
/// # Errors
/// Returns a `ParseError::Range` if a non-empty string matches neither
/// alternative or leaves trailing text.
pub fn parse_range(input: Option<&str>, monster: &str) -> Result<Range, ParseError> {
    let Some(input) = input.filter(|s| !s.is_empty()) else {
        return Ok(Range::default());
    };

    let mut cursor = Cursor::new(input);
    let mut range = Range::default();

    if cursor.eat("Melee (") {
        let Some(reach) = cursor.read_number() else {
            return Err(range_error(input, cursor.position, monster));
        };
        if !cursor.eat(" ft)") {
            return Err(range_error(input, cursor.position, monster));
        }
        range.melee = Some(MeleeRange { reach });
    } else if cursor.eat("Ranged (") {
        let Some(short) = cursor.read_number() else {
            return Err(range_error(input, cursor.position, monster));
        };
        let long = if cursor.eat("/") {
            let Some(long) = cursor.read_number() else {
                return Err(range_error(input, cursor.position, monster));
            };
            Some(long)
        } else {
            None
        };
        if !cursor.eat(" ft)") {
            return Err(range_error(input, cursor.position, monster));
        }
        range.ranged = Some(RangedRange { short, long });
    } else {
        return Err(range_error(input, cursor.position, monster));
    }

    if !cursor.is_at_end() {
        return Err(range_error(input, cursor.position, monster));
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_walking_speed() {
        let speeds = parse_speeds("30 ft", "Gnoll").unwrap();
        assert_eq!(speeds.len(), 1);
        let walk = &speeds[&SpeedMode::Walk];
        assert_eq!(walk.value, 30);
        assert_eq!(walk.info, None);
    }

    #[test]
    fn test_parse_multiple_modes_with_info() {
        let speeds = parse_speeds("30 ft, fly 60 ft (hover)", "Ghost").unwrap();
        assert_eq!(speeds.len(), 2);
        assert_eq!(speeds[&SpeedMode::Walk].value, 30);
        let fly = &speeds[&SpeedMode::Named("fly".to_string())];
        assert_eq!(fly.value, 60);
        assert_eq!(fly.info.as_deref(), Some("(hover)"));
    }

    #[test]
    fn test_parse_empty_speed_string_is_empty_map() {
        let speeds = parse_speeds("", "Shrieker").unwrap();
        assert!(speeds.is_empty());
    }

    #[test]
    fn test_speed_trailing_garbage_is_an_error() {
        let err = parse_speeds("30 ft, swims badly", "Merrow").unwrap_err();
        assert!(matches!(err, ParseError::Speed { .. }));
    }

    #[test]
    fn test_speed_missing_ft_marker_is_an_error() {
        assert!(parse_speeds("30", "Gnoll").is_err());
        assert!(parse_speeds("fly 60", "Gnoll").is_err());
    }

    #[test]
    fn test_speed_unclosed_annotation_is_an_error() {
        assert!(parse_speeds("fly 60 ft (hover", "Ghost").is_err());
    }

    #[test]
    fn test_parse_melee_range() {
        let range = parse_range(Some("Melee (5 ft)"), "Gnoll").unwrap();
        assert_eq!(range.melee, Some(MeleeRange { reach: 5 }));
        assert_eq!(range.ranged, None);
    }

    #[test]
    fn test_parse_ranged_with_long_range() {
        let range = parse_range(Some("Ranged (20/60 ft)"), "Gnoll").unwrap();
        assert_eq!(range.melee, None);
        assert_eq!(
            range.ranged,
            Some(RangedRange {
                short: 20,
                long: Some(60)
            })
        );
    }

    #[test]
    fn test_parse_ranged_without_long_range() {
        let range = parse_range(Some("Ranged (120 ft)"), "Archer").unwrap();
        assert_eq!(
            range.ranged,
            Some(RangedRange {
                short: 120,
                long: None
            })
        );
    }

    #[test]
    fn test_absent_range_has_no_components() {
        assert_eq!(parse_range(None, "Gnoll").unwrap(), Range::default());
        assert_eq!(parse_range(Some(""), "Gnoll").unwrap(), Range::default());
    }

    #[test]
    fn test_malformed_range_is_an_error() {
        assert!(parse_range(Some("melee (5 ft)"), "Gnoll").is_err());
        assert!(parse_range(Some("Melee (5 ft) extra"), "Gnoll").is_err());
        assert!(parse_range(Some("Thrown (20 ft)"), "Gnoll").is_err());
        assert!(parse_range(Some("Melee (5)"), "Gnoll").is_err());
    }
}
