use thiserror::Error;

/// An error that can occur when parsing a rule string.
///
/// When [`LifeRules::set_rule`](crate::LifeRules::set_rule) returns one of these,
/// the previous rule and its tables are left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseRuleError {
    /// The rule string is empty.
    #[error("Rule cannot be empty string.")]
    Empty,
    /// The rule string contains a character that is not part of the grammar.
    #[error("Bad character in rule string: {0:?}.")]
    BadCharacter(char),
    /// The rule string contains more than one slash.
    #[error("Only one slash permitted in life rule.")]
    MultipleSlashes,
    /// A `W` is not followed by a digit.
    #[error("Digit expected after W.")]
    MissingWolframDigit,
    /// The Wolfram number is odd or larger than 254.
    #[error("Wolfram rule must be an even number from 0 to 254.")]
    InvalidWolframNumber,
}

/// An error that can occur when editing the list of named rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NamedRuleError {
    /// The rule string of the new entry does not parse.
    #[error("Invalid rule {rule:?}: {source}")]
    InvalidRule {
        /// The offending rule string.
        rule: String,
        /// Why it does not parse.
        source: ParseRuleError,
    },
    /// The name is empty or contains `|`.
    #[error("Invalid rule name {0:?}")]
    InvalidName(String),
    /// Another entry already has this name.
    #[error("A rule named {0:?} already exists")]
    DuplicateName(String),
    /// No entry has this name.
    #[error("No rule named {0:?}")]
    UnknownName(String),
    /// The first entry cannot be removed.
    #[error("The rule {0:?} cannot be removed")]
    Protected(String),
}
