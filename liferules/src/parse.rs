use crate::{
    rule::{BIRTH_SHIFT, SURVIVAL_SHIFT},
    LifeRule, ParseRuleError,
};
use std::ops::RangeInclusive;

/// A pattern for matching a single character represented as a byte.
trait CharPattern {
    /// Returns `true` if the given character matches this pattern.
    fn matches(&self, c: u8) -> bool;
}

impl CharPattern for u8 {
    fn matches(&self, c: u8) -> bool {
        self.eq_ignore_ascii_case(&c)
    }
}

impl CharPattern for RangeInclusive<u8> {
    fn matches(&self, c: u8) -> bool {
        self.contains(&c)
    }
}

/// A helper struct for parsing rule strings.
///
/// Inspired by the parser for [`IpAddr`](std::net::IpAddr) in Rust's standard
/// library.
struct Parser<'a> {
    source: &'a str,
    input: &'a [u8],
}

impl<'a> Parser<'a> {
    /// Create a new parser from a string.
    const fn new(str: &'a str) -> Self {
        Self {
            source: str,
            input: str.as_bytes(),
        }
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<u8> {
        self.input.first().copied()
    }

    /// Peek at the next character as a `char`, decoding multi-byte sequences.
    fn peek_char(&self) -> Option<char> {
        let offset = self.source.len() - self.input.len();
        self.source.get(offset..)?.chars().next()
    }

    /// Consume the next character.
    fn bump(&mut self) {
        self.input = &self.input[1..];
    }

    /// Try to read the next character and consume it if it matches the given
    /// pattern.
    fn read_matches(&mut self, pattern: impl CharPattern) -> Option<u8> {
        let c = self.peek()?;
        if pattern.matches(c) {
            self.bump();
            Some(c)
        } else {
            None
        }
    }

    /// Try to read zero or more characters that match the given pattern.
    fn read_matches_many(&mut self, pattern: impl CharPattern) -> &'a [u8] {
        let input = self.input;
        let mut len = 0;
        while let Some(c) = self.peek() {
            if !pattern.matches(c) {
                break;
            }
            self.bump();
            len += 1;
        }
        &input[..len]
    }

    /// Parse a neighbor count from `0` to `8`.
    fn parse_count(&mut self) -> Option<u32> {
        let c = self.read_matches(b'0'..=b'8')?;
        Some((c - b'0') as u32)
    }

    /// Parse the number after a `W`.
    ///
    /// Anything after the digits is left unread.
    fn parse_wolfram(&mut self) -> Result<LifeRule, ParseRuleError> {
        let digits = self.read_matches_many(b'0'..=b'9');
        if digits.is_empty() {
            return Err(ParseRuleError::MissingWolframDigit);
        }

        let number = digits.iter().try_fold(0u8, |n, &d| {
            n.checked_mul(10)?.checked_add(d - b'0')
        });
        number
            .ok_or(ParseRuleError::InvalidWolframNumber)
            .and_then(LifeRule::wolfram)
    }

    /// Parse a Life-like or Wolfram rule string.
    ///
    /// See [`parse_life_rule`] for more details.
    fn parse_life_rule(&mut self) -> Result<LifeRule, ParseRuleError> {
        if self.peek().is_none() {
            return Err(ParseRuleError::Empty);
        }

        let mut mask = 0;
        let mut hex = false;
        let mut slash = false;
        // Digits before any marker are survivals.
        let mut shift = SURVIVAL_SHIFT;

        while self.peek().is_some() {
            if self.read_matches(b'H').is_some() {
                hex = true;
            } else if self.read_matches(b'B').is_some() {
                shift = BIRTH_SHIFT;
            } else if self.read_matches(b'/').is_some() {
                if slash {
                    return Err(ParseRuleError::MultipleSlashes);
                }
                slash = true;
                shift = BIRTH_SHIFT;
            } else if self.read_matches(b'S').is_some() {
                shift = SURVIVAL_SHIFT;
            } else if let Some(count) = self.parse_count() {
                mask |= 1 << (shift + count);
            } else if self.read_matches(b'W').is_some() {
                return self.parse_wolfram();
            } else {
                let c = self.peek_char().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ParseRuleError::BadCharacter(c));
            }
        }

        Ok(LifeRule::from_mask(mask, hex))
    }
}

/// Parse a [Life-like](https://conwaylife.com/wiki/Life-like_cellular_automaton)
/// or Wolfram rule string.
///
/// The rule string is case-insensitive.
///
/// # B/S notation
///
/// The rule string is in the form `B{birth}/S{survival}`, where `{birth}` and
/// `{survival}` are sequences of digits from `0` to `8`. The digits in `{birth}`
/// are the numbers of neighbors that cause a dead cell to become alive, and the
/// digits in `{survival}` are the numbers of neighbors that cause a live cell to
/// survive. These sequences may be empty, and the slash may be omitted, as in
/// `b3s23`.
///
/// # S/B notation
///
/// Digits before any `B` or `S` are survivals, and a slash switches to births.
/// So `23/3` is the same rule as `B3/S23`.
///
/// # Hexagonal rules
///
/// An `H` anywhere in the rule string selects the hexagonal neighborhood.
///
/// # Wolfram rules
///
/// A `W` followed by an even number from 0 to 254 selects a one-dimensional
/// Wolfram rule. Parsing stops after the number.
///
/// # Errors
///
/// An empty string, any other character, a second slash, or a `W` not followed by
/// a valid even number is an error.
pub fn parse_life_rule(rule_string: &str) -> Result<LifeRule, ParseRuleError> {
    let mut parser = Parser::new(rule_string);

    parser.parse_life_rule()
}

/// Whether two rule strings describe the same rule.
///
/// Strings that are equal always match. Otherwise both must parse and have the
/// same canonical form, so `"s23b3"` and `"23/3"` match `"B3/S23"`.
pub fn matching_rules(rule1: &str, rule2: &str) -> bool {
    if rule1 == rule2 {
        return true;
    }

    match (parse_life_rule(rule1), parse_life_rule(rule2)) {
        (Ok(rule1), Ok(rule2)) => rule1 == rule2,
        _ => false,
    }
}
