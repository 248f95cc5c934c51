use crate::{matching_rules, parse_life_rule, NamedRuleError};

/// The named rules every list starts with.
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("Life", "B3/S23"),
    ("3-4 Life", "B34/S34"),
    ("HighLife", "B36/S23"),
    ("AntiLife", "B0123478/S01234678"),
    ("Life without Death", "B3/S012345678"),
    ("Plow World", "B378/S012345678"),
    ("Day and Night", "B3678/S34678"),
    ("Diamoeba", "B35678/S5678"),
    ("LongLife", "B345/S5"),
    ("Seeds", "B2/S"),
    ("Persian Rug", "B234/S"),
    ("Replicator", "B1357/S1357"),
    ("Fredkin", "B1357/S02468"),
    ("Morley", "B368/S245"),
    ("Wolfram 22", "W22"),
    ("Wolfram 30", "W30"),
    ("Wolfram 110", "W110"),
];

/// A list of named rules.
///
/// The first entry is always `Life`, and cannot be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRules {
    rules: Vec<(String, String)>,
}

impl Default for NamedRules {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|&(name, rule)| (name.to_string(), rule.to_string()))
                .collect(),
        }
    }
}

impl NamedRules {
    /// Iterate over `(name, rule string)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules
            .iter()
            .map(|(name, rule)| (name.as_str(), rule.as_str()))
    }

    /// The rule string with the given name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(this, _)| this.eq_ignore_ascii_case(name))
            .map(|(_, rule)| rule)
    }

    /// The name of a rule, if it matches a named rule.
    ///
    /// See [`matching_rules`] for when two rules match.
    pub fn name_of(&self, rule_string: &str) -> Option<&str> {
        self.iter()
            .find(|(_, rule)| matching_rules(rule_string, rule))
            .map(|(name, _)| name)
    }

    /// The name of a rule, or the rule string itself if it has no name.
    pub fn display_name<'a>(&'a self, rule_string: &'a str) -> &'a str {
        self.name_of(rule_string).unwrap_or(rule_string)
    }

    /// Add a named rule at the end of the list.
    ///
    /// The rule is stored in canonical form. A name must be non-empty and
    /// must not contain `|`.
    pub fn add(&mut self, name: &str, rule_string: &str) -> Result<(), NamedRuleError> {
        if name.is_empty() || name.contains('|') {
            return Err(NamedRuleError::InvalidName(name.to_string()));
        }

        let rule = parse_life_rule(rule_string).map_err(|source| NamedRuleError::InvalidRule {
            rule: rule_string.to_string(),
            source,
        })?;

        if self.find(name).is_some() {
            return Err(NamedRuleError::DuplicateName(name.to_string()));
        }

        self.rules.push((name.to_string(), rule.to_string()));
        Ok(())
    }

    /// Remove a named rule, returning its rule string.
    pub fn remove(&mut self, name: &str) -> Result<String, NamedRuleError> {
        let index = self
            .rules
            .iter()
            .position(|(this, _)| this.eq_ignore_ascii_case(name))
            .ok_or_else(|| NamedRuleError::UnknownName(name.to_string()))?;

        if index == 0 {
            return Err(NamedRuleError::Protected(self.rules[0].0.clone()));
        }

        Ok(self.rules.remove(index).1)
    }
}
