use crate::{parse_life_rule, LifeRule, PackedTable, Parity, ParseRuleError, RuleTables};

/// The current rule of a two-state universe, together with its lookup tables.
///
/// This is what a simulation engine holds on to. It starts as Conway's Game of
/// Life, `B3/S23`.
///
/// # Examples
///
/// ```rust
/// # use liferules::{LifeRules, Parity};
/// let mut rules = LifeRules::default();
/// assert!(rules.is_regular_life());
///
/// rules.set_rule("B03/S23").unwrap();
/// assert!(rules.has_b0_not_s8());
///
/// // A failed change keeps the previous rule.
/// assert!(rules.set_rule("B3/S23/").is_err());
/// assert_eq!(rules.rule(), "B03/S23");
/// ```
#[derive(Debug, Clone)]
pub struct LifeRules {
    rule: LifeRule,
    canonical: String,
    tables: RuleTables,
}

impl Default for LifeRules {
    fn default() -> Self {
        Self::from_rule(LifeRule::default())
    }
}

impl LifeRules {
    /// Create from a rule string.
    pub fn new(rule_string: &str) -> Result<Self, ParseRuleError> {
        let rule = parse_life_rule(rule_string)?;
        Ok(Self::from_rule(rule))
    }

    /// Create from a parsed rule.
    pub fn from_rule(rule: LifeRule) -> Self {
        let tables = RuleTables::new(&rule);
        log::debug!("Built {} table(s) for rule {}", tables.count(), rule);
        Self {
            rule,
            canonical: rule.to_string(),
            tables,
        }
    }

    /// Change the rule.
    ///
    /// Either the rule string is accepted and all tables are rebuilt, or an error is
    /// returned and nothing changes.
    pub fn set_rule(&mut self, rule_string: &str) -> Result<(), ParseRuleError> {
        *self = Self::new(rule_string)?;
        Ok(())
    }

    /// The canonical rule string of the current rule.
    pub fn rule(&self) -> &str {
        &self.canonical
    }

    /// The current rule.
    pub const fn life_rule(&self) -> &LifeRule {
        &self.rule
    }

    /// The current tables.
    pub const fn tables(&self) -> &RuleTables {
        &self.tables
    }

    /// Whether the rule is B0 but not S8.
    ///
    /// If so, the caller must pass the right [`Parity`] to
    /// [`next_state_bits`](LifeRules::next_state_bits), and the cells it stores on
    /// odd generations are the complement of the real ones.
    pub const fn has_b0_not_s8(&self) -> bool {
        self.rule.has_b0_not_s8()
    }

    /// Whether the current rule is exactly Conway's Game of Life.
    pub const fn is_regular_life(&self) -> bool {
        self.rule.is_regular_life()
    }

    /// The table to use on a generation of the given parity.
    pub const fn table(&self, parity: Parity) -> &PackedTable {
        self.tables.table(parity)
    }

    /// The next states of the inner 2×2 block of a 4×4 block.
    ///
    /// See [`PackedTable`] for the layout of the block and of the result.
    #[inline]
    pub fn next_state_bits(&self, block: u16, parity: Parity) -> u8 {
        self.table(parity).next_block(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_life() {
        let rules = LifeRules::default();
        assert_eq!(rules.rule(), "B3/S23");
        assert!(rules.is_regular_life());
        assert!(!rules.has_b0_not_s8());
        assert_eq!(rules.tables().count(), 1);
    }

    #[test]
    fn test_set_rule() {
        let mut rules = LifeRules::default();

        rules.set_rule("b36s23").unwrap();
        assert_eq!(rules.rule(), "B36/S23");
        assert!(!rules.is_regular_life());

        rules.set_rule("23/3").unwrap();
        assert_eq!(rules.rule(), "B3/S23");
        assert!(rules.is_regular_life());

        rules.set_rule("B3/S23H").unwrap();
        assert!(!rules.is_regular_life());
    }

    #[test]
    fn test_failed_set_rule_keeps_tables() {
        let mut rules = LifeRules::new("B36/S23").unwrap();
        let before = rules.table(Parity::Even).clone();

        for bad in ["", "B3/S2/3", "W1", "W", "B3x"] {
            assert!(rules.set_rule(bad).is_err());
            assert_eq!(rules.rule(), "B36/S23");
            assert_eq!(rules.table(Parity::Even), &before);
        }
    }

    #[test]
    fn test_b0_not_s8() {
        let rules = LifeRules::new("B03/S23").unwrap();
        assert!(rules.has_b0_not_s8());
        assert!(!rules.is_regular_life());
        assert_eq!(rules.tables().count(), 2);

        // Odd generations are stored inverted. An empty universe becomes full,
        // which is stored as empty, and then empty again.
        assert_eq!(rules.next_state_bits(0, Parity::Even), 0);
        assert_eq!(rules.next_state_bits(0, Parity::Odd), 0);
        // A full universe dies, which is stored as full, and is then reborn.
        assert_eq!(rules.next_state_bits(0xffff, Parity::Even), 0b110011);
        assert_eq!(rules.next_state_bits(0xffff, Parity::Odd), 0b110011);
    }

    #[test]
    fn test_b0_and_s8() {
        let rules = LifeRules::new("B03/S238").unwrap();
        assert!(!rules.has_b0_not_s8());
        assert!(!rules.is_regular_life());
        assert_eq!(rules.tables().count(), 1);
        assert_eq!(rules.rule(), "B03/S238");
        assert_eq!(
            rules.table(Parity::Even),
            &PackedTable::for_rule(&parse_life_rule("B123478/S0123467").unwrap())
        );
    }

    #[test]
    fn test_wolfram() {
        let rules = LifeRules::new("W38").unwrap();
        assert_eq!(rules.rule(), "W38");
        assert_eq!(rules.life_rule().wolfram_number(), Some(38));
        assert!(!rules.is_regular_life());
        assert!(!rules.has_b0_not_s8());
    }
}
