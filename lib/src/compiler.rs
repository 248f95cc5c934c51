use crate::{
    error::CompileError, CompileConfig, Oracle, RuleSet, Sample, SampleSpace, State, WildcardRule,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Compiles a transition function into a [`RuleSet`].
///
/// Every sample is evaluated, center by center. Samples that do not change
/// their center are skipped. Each remaining sample is folded into the first
/// existing rule that stays all-true after taking it in, trying the sample
/// itself and then its rotations under the symmetry. If no rule accepts it,
/// it starts a new rule.
///
/// This is a greedy heuristic: the result reproduces the transition function,
/// but is not the smallest possible rule table.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompileConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Compiler {
    /// Create a new compiler.
    #[inline]
    pub const fn new(config: CompileConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Set a flag that cancels the compilation when it becomes `true`.
    ///
    /// The flag is checked once per center state.
    #[inline]
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The configuration.
    pub const fn config(&self) -> &CompileConfig {
        &self.config
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|cancel| cancel.load(Ordering::Relaxed))
    }

    /// Compile the transition function.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, if the transition function
    /// returns a state out of range, or if the compilation is cancelled.
    pub fn compile(&self, oracle: &impl Oracle) -> Result<RuleSet, CompileError> {
        let config = self.config.check()?;
        let mut rules = Vec::new();

        for center in 0..config.states {
            if self.is_cancelled() {
                return Err(CompileError::Cancelled);
            }
            log::info!(
                "Processing center state {center}, {} rules so far",
                rules.len()
            );

            for sample in SampleSpace::with_center(config.neighborhood, config.states, center) {
                let output = oracle.next_state(&sample);
                if output >= config.states {
                    return Err(CompileError::InvalidOutput { sample, output });
                }
                if output == center {
                    continue;
                }
                Self::fold(&mut rules, &config, sample, output, oracle);
            }
        }

        log::debug!("Compiled {} rules", rules.len());
        Ok(RuleSet::new(config, rules))
    }

    /// Fold a sample into the first rule that accepts it, or start a new rule.
    fn fold(
        rules: &mut Vec<WildcardRule>,
        config: &CompileConfig,
        sample: Sample,
        output: State,
        oracle: &impl Oracle,
    ) {
        let rotations = config.symmetry.rotations(config.neighborhood);

        let merged = rules.iter_mut().any(|rule| {
            let candidate = std::iter::once(sample)
                .chain(rotations.iter().map(|&steps| sample.rotated(steps)))
                .find(|candidate| rule.can_merge(candidate, output, oracle));
            candidate.map(|candidate| rule.merge(&candidate)).is_some()
        });

        if !merged {
            rules.push(WildcardRule::new(&sample, output, config.symmetry));
        }
    }
}
