use crate::{Neighborhood, Sample, State, Symmetry};
use thiserror::Error;

/// An error that can occur when parsing a symmetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("Invalid symmetry, expected none, rot4 or rot8")]
pub struct ParseSymmetryError;

/// An error that can occur when parsing a neighborhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("Invalid neighborhood, expected moore or von-neumann")]
pub struct ParseNeighborhoodError;

/// An error that can occur when checking a compile configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Fewer than 2 states.
    #[error("A rule table needs at least 2 states, got {0}")]
    TooFewStates(State),

    /// More than 256 states.
    #[error("A rule table supports at most 256 states, got {0}")]
    TooManyStates(State),

    /// The symmetry does not exist for the neighborhood.
    #[error("Symmetry {symmetry} is not supported for the {neighborhood} neighborhood")]
    UnsupportedSymmetry {
        /// The requested symmetry.
        symmetry: Symmetry,
        /// The requested neighborhood.
        neighborhood: Neighborhood,
    },
}

/// An error that can occur when compiling a transition function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transition function returned a state outside `0..n_states`.
    #[error("The transition function maps {sample} to state {output}, which is out of range")]
    InvalidOutput {
        /// The sample that was evaluated.
        sample: Sample,
        /// The returned state.
        output: State,
    },

    /// The compilation was cancelled.
    #[error("The compilation was cancelled")]
    Cancelled,
}

/// An error reported when a compiled rule set disagrees with its transition function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The rule set gives a different next state for some sample.
    #[error(
        "Error in the rule table for {sample}: expected {expected}, got {actual}. \
        Either there's a bug in the code, or the transition function \
        does not have the symmetry you selected."
    )]
    Mismatch {
        /// The first sample where the outputs differ.
        sample: Sample,
        /// The state given by the transition function.
        expected: State,
        /// The state given by the rule set.
        actual: State,
    },
}
