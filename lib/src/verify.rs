use crate::{error::VerifyError, Oracle, RuleSet, SampleSpace};

/// Check that a rule set reproduces a transition function on every sample.
///
/// This goes through all `states ^ size` samples, so it takes about as long
/// as the compilation itself.
///
/// # Errors
///
/// Returns the first sample where the rule set and the transition function
/// disagree. A rule set compiled with a symmetry the transition function
/// does not have fails here.
pub fn verify(rules: &RuleSet, oracle: &impl Oracle) -> Result<(), VerifyError> {
    let mut checked = 0u64;
    for sample in SampleSpace::new(rules.neighborhood(), rules.states()) {
        let expected = oracle.next_state(&sample);
        let actual = rules.next_state(&sample);
        if expected != actual {
            let error = VerifyError::Mismatch {
                sample,
                expected,
                actual,
            };
            log::warn!("{error}");
            return Err(error);
        }
        checked += 1;
    }

    log::debug!("Verified {} rules on {checked} samples", rules.len());
    Ok(())
}
