use crate::{CompileConfig, Neighborhood, Oracle, Sample, State, Symmetry, WildcardRule};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display, Formatter},
    io,
};

/// Letters used for variable names.
const LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The name of the `index`-th variable of a rule table.
///
/// The first 52 are `a` to `z` then `A` to `Z`; after that come `aa`, `ab`,
/// and so on, in bijective base 52.
pub fn variable_name(index: usize) -> String {
    let mut name = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        name.push(LETTERS[n % LETTERS.len()]);
        n /= LETTERS.len();
    }
    name.iter().rev().map(|&c| c as char).collect()
}

/// A compiled rule table: an ordered list of [`WildcardRule`]s.
///
/// The first rule that matches a sample gives its next state. A sample that
/// matches no rule keeps its center state.
///
/// Formatting a rule set with [`Display`] gives the text of the rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    config: CompileConfig,
    rules: Vec<WildcardRule>,
}

impl RuleSet {
    pub(crate) const fn new(config: CompileConfig, rules: Vec<WildcardRule>) -> Self {
        Self { config, rules }
    }

    /// The configuration the rule set was compiled with.
    pub const fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Number of states.
    pub const fn states(&self) -> State {
        self.config.states
    }

    /// The neighborhood of the rule set.
    pub const fn neighborhood(&self) -> Neighborhood {
        self.config.neighborhood
    }

    /// The symmetry of the rule set.
    pub const fn symmetry(&self) -> Symmetry {
        self.config.symmetry
    }

    /// The rules, in order.
    pub fn rules(&self) -> &[WildcardRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules, so that nothing ever changes.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The first rule matching the sample, including rotated matches.
    pub fn matching_rule(&self, sample: &Sample) -> Option<&WildcardRule> {
        self.rules.iter().find(|rule| rule.matches(sample))
    }

    /// The next state of the center of a sample.
    pub fn next_state(&self, sample: &Sample) -> State {
        self.matching_rule(sample)
            .map_or(sample.center(), WildcardRule::output)
    }

    /// The variables of the rule table, in order of first appearance.
    ///
    /// Every set of more than one state gets a variable, shared between rules.
    /// A variable never appears twice in the same rule: when a set occurs at
    /// several positions of one rule, each occurrence gets its own variable.
    pub fn variables(&self) -> Vec<(String, &BTreeSet<State>)> {
        let (sets, _) = self.assign_variables();
        sets.into_iter()
            .enumerate()
            .map(|(index, set)| (variable_name(index), set))
            .collect()
    }

    /// The sets of the variables in order, and the index of the variable for
    /// the `n`-th occurrence of a set within a rule.
    #[allow(clippy::type_complexity)]
    fn assign_variables(
        &self,
    ) -> (
        Vec<&BTreeSet<State>>,
        BTreeMap<(&BTreeSet<State>, usize), usize>,
    ) {
        let mut sets = Vec::new();
        let mut indices = BTreeMap::new();
        for rule in &self.rules {
            let mut occurrences = BTreeMap::new();
            for set in rule.inputs().iter().filter(|set| set.len() > 1) {
                let occurrence = occurrences.entry(set).or_insert(0);
                indices.entry((set, *occurrence)).or_insert_with(|| {
                    sets.push(set);
                    sets.len() - 1
                });
                *occurrence += 1;
            }
        }
        (sets, indices)
    }

    /// Write the text of the rule table.
    pub fn write_table(&self, mut writer: impl io::Write) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl Oracle for RuleSet {
    #[inline]
    fn next_state(&self, sample: &Sample) -> State {
        Self::next_state(self, sample)
    }
}

impl Display for RuleSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "# rules: {}", self.len())?;
        writeln!(f, "#")?;
        writeln!(f, "# Rule-table format.")?;
        writeln!(
            f,
            "# Each rule: {},C'",
            self.neighborhood().position_names().join(",")
        )?;
        writeln!(f, "# No variable appears twice in the same rule,")?;
        writeln!(f, "# so variables may be read as bound or unbound.")?;
        writeln!(f, "#")?;
        writeln!(f, "n_states:{}", self.states())?;
        writeln!(f, "neighborhood_size:{}", self.neighborhood().size())?;
        writeln!(f, "symmetries:{}", self.symmetry())?;

        let (sets, indices) = self.assign_variables();
        for (index, set) in sets.iter().enumerate() {
            let states: Vec<String> = set.iter().map(State::to_string).collect();
            writeln!(f, "var {}={{{}}}", variable_name(index), states.join(","))?;
        }

        for rule in &self.rules {
            let mut occurrences = BTreeMap::new();
            for set in rule.inputs() {
                if set.len() > 1 {
                    let occurrence = occurrences.entry(set).or_insert(0);
                    let index = indices.get(&(set, *occurrence)).copied().unwrap_or_default();
                    *occurrence += 1;
                    write!(f, "{},", variable_name(index))?;
                } else {
                    for state in set {
                        write!(f, "{state},")?;
                    }
                }
            }
            writeln!(f, "{}", rule.output())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_name() {
        assert_eq!(variable_name(0), "a");
        assert_eq!(variable_name(25), "z");
        assert_eq!(variable_name(26), "A");
        assert_eq!(variable_name(51), "Z");
        assert_eq!(variable_name(52), "aa");
        assert_eq!(variable_name(53), "ab");
        assert_eq!(variable_name(52 * 53 - 1), "ZZ");
        assert_eq!(variable_name(52 * 53), "aaa");
    }

    /// The rules of the worked example: `1,{0,2},0 -> 3`, `2,0,0 -> 3`, `2,2,0 -> 1`,
    /// laid out on a von Neumann neighborhood.
    fn example() -> RuleSet {
        let mut first = WildcardRule::new(&Sample::von_neumann([1, 0, 0, 0, 0]), 3, Symmetry::None);
        first.merge(&Sample::von_neumann([1, 2, 0, 0, 0]));
        let second = WildcardRule::new(&Sample::von_neumann([2, 0, 0, 0, 0]), 3, Symmetry::None);
        let third = WildcardRule::new(&Sample::von_neumann([2, 2, 0, 0, 0]), 1, Symmetry::None);
        let config = CompileConfig::new(4).with_neighborhood(Neighborhood::VonNeumann);
        RuleSet::new(config, vec![first, second, third])
    }

    #[test]
    fn test_next_state() {
        let rules = example();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.next_state(&Sample::von_neumann([1, 2, 0, 0, 0])), 3);
        assert_eq!(rules.next_state(&Sample::von_neumann([2, 2, 0, 0, 0])), 1);
        assert_eq!(rules.next_state(&Sample::von_neumann([3, 2, 0, 0, 0])), 3);
        assert_eq!(rules.next_state(&Sample::von_neumann([1, 1, 0, 0, 0])), 1);
        assert_eq!(rules.next_state(&Sample::von_neumann([0, 0, 0, 0, 0])), 0);
    }

    #[test]
    fn test_display() {
        let expected = "\
# rules: 3
#
# Rule-table format.
# Each rule: C,N,E,S,W,C'
# No variable appears twice in the same rule,
# so variables may be read as bound or unbound.
#
n_states:4
neighborhood_size:5
symmetries:none
var a={0,2}
1,a,0,0,0,3
2,0,0,0,0,3
2,2,0,0,0,1
";
        let rules = example();
        assert_eq!(rules.to_string(), expected);

        let mut buffer = Vec::new();
        rules.write_table(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn test_variables_within_a_rule() {
        let mut rule = WildcardRule::new(&Sample::von_neumann([1, 0, 0, 0, 0]), 2, Symmetry::Rot4);
        rule.merge(&Sample::von_neumann([1, 1, 1, 0, 0]));
        rule.merge(&Sample::von_neumann([1, 1, 1, 2, 0]));
        let mut other = WildcardRule::new(&Sample::von_neumann([2, 0, 0, 0, 0]), 0, Symmetry::Rot4);
        other.merge(&Sample::von_neumann([2, 1, 0, 2, 1]));
        let config = CompileConfig::new(3)
            .with_neighborhood(Neighborhood::VonNeumann)
            .with_symmetry(Symmetry::Rot4);
        let rules = RuleSet::new(config, vec![rule, other]);

        let variables = rules.variables();
        let names: Vec<&str> = variables.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(*variables[0].1, BTreeSet::from([0, 1]));
        assert_eq!(*variables[1].1, BTreeSet::from([0, 1]));
        assert_eq!(*variables[2].1, BTreeSet::from([0, 2]));

        // The same set twice in one rule gets two names; the next rule reuses them.
        assert!(rules.to_string().ends_with(
            "var a={0,1}\nvar b={0,1}\nvar c={0,2}\n1,a,b,c,0,2\n2,a,0,c,b,0\n"
        ));
    }
}
