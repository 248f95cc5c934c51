use crate::{Neighborhood, Oracle, Sample, State, Symmetry};
use std::collections::BTreeSet;

/// A rule that matches a set of states at each position of a sample.
///
/// For example, `1,{0,2},0 -> 3` matches `1,0,0` and `1,2,0`. A rule is only
/// kept if it is *all-true*: every combination of states drawn from its sets
/// has the rule's output under the transition function it was built from.
///
/// With a symmetry, a rule also matches every rotation of a sample it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardRule {
    inputs: Vec<BTreeSet<State>>,
    output: State,
    neighborhood: Neighborhood,
    symmetry: Symmetry,
}

impl WildcardRule {
    /// A rule matching exactly one sample.
    pub fn new(sample: &Sample, output: State, symmetry: Symmetry) -> Self {
        Self {
            inputs: sample
                .as_slice()
                .iter()
                .map(|&state| BTreeSet::from([state]))
                .collect(),
            output,
            neighborhood: sample.neighborhood(),
            symmetry,
        }
    }

    /// The permitted states at each position.
    pub fn inputs(&self) -> &[BTreeSet<State>] {
        &self.inputs
    }

    /// The next state of a matching sample.
    pub const fn output(&self) -> State {
        self.output
    }

    /// The neighborhood of the rule.
    pub const fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// The symmetry of the rule.
    pub const fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// The number of samples the rule matches, ignoring symmetry.
    pub fn combinations(&self) -> u64 {
        self.inputs.iter().map(|set| set.len() as u64).product()
    }

    /// Whether the sample matches the rule, ignoring symmetry.
    pub fn matches_exactly(&self, sample: &Sample) -> bool {
        self.inputs
            .iter()
            .zip(sample.as_slice())
            .all(|(set, state)| set.contains(state))
    }

    /// Whether the sample, or any of its rotations under the rule's symmetry,
    /// matches the rule.
    pub fn matches(&self, sample: &Sample) -> bool {
        self.matches_exactly(sample)
            || self
                .symmetry
                .rotations(self.neighborhood)
                .iter()
                .any(|&steps| self.matches_exactly(&sample.rotated(steps)))
    }

    /// Whether every sample the rule matches, ignoring symmetry,
    /// has the rule's output.
    pub fn all_true(&self, oracle: &impl Oracle) -> bool {
        let choices: Vec<Vec<State>> = self
            .inputs
            .iter()
            .map(|set| set.iter().copied().collect())
            .collect();
        self.every_combination(&choices, oracle)
    }

    /// Whether the rule stays all-true after [`merge`](Self::merge)-ing the sample.
    ///
    /// Fails at once if the outputs differ, or if the sample lies outside the
    /// rule's sets at more than one position. Otherwise only the combinations
    /// that the sample would add are checked: those with the sample's state at
    /// the position where it differs.
    pub fn can_merge(&self, sample: &Sample, output: State, oracle: &impl Oracle) -> bool {
        if output != self.output {
            return false;
        }

        let mut differing = self
            .inputs
            .iter()
            .zip(sample.as_slice())
            .enumerate()
            .filter(|(_, (set, state))| !set.contains(state))
            .map(|(position, _)| position);

        let Some(position) = differing.next() else {
            return true;
        };
        if differing.next().is_some() {
            return false;
        }

        let mut choices: Vec<Vec<State>> = self
            .inputs
            .iter()
            .map(|set| set.iter().copied().collect())
            .collect();
        choices[position] = vec![sample[position]];
        self.every_combination(&choices, oracle)
    }

    /// Add the states of the sample to the sets at each position.
    pub fn merge(&mut self, sample: &Sample) {
        for (set, &state) in self.inputs.iter_mut().zip(sample.as_slice()) {
            set.insert(state);
        }
    }

    /// Whether the oracle gives the rule's output for every combination of choices.
    fn every_combination(&self, choices: &[Vec<State>], oracle: &impl Oracle) -> bool {
        if choices.iter().any(Vec::is_empty) {
            return true;
        }

        let mut indices = vec![0; choices.len()];
        let mut sample = Sample::zero(self.neighborhood);
        for (position, choice) in choices.iter().enumerate() {
            sample = sample.with(position, choice[0]);
        }

        loop {
            if oracle.next_state(&sample) != self.output {
                return false;
            }

            // Advance the last position first, carrying towards the center.
            let mut position = choices.len();
            loop {
                if position == 0 {
                    return true;
                }
                position -= 1;
                indices[position] += 1;
                if indices[position] < choices[position].len() {
                    sample = sample.with(position, choices[position][indices[position]]);
                    break;
                }
                indices[position] = 0;
                sample = sample.with(position, choices[position][0]);
            }
        }
    }
}
