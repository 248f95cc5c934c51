use crate::{error::ConfigError, Neighborhood, State, Symmetry};
#[cfg(feature = "clap")]
use clap::Args;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The smallest number of states a rule table can have.
pub const MIN_STATES: State = 2;

/// The largest number of states a rule table can have.
pub const MAX_STATES: State = 256;

/// The configuration of a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(Args))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompileConfig {
    /// Number of states, from 2 to 256.
    ///
    /// The transition function is evaluated on every combination of states,
    /// so the running time grows as `states ^ 9` for the Moore neighborhood.
    #[cfg_attr(feature = "clap", arg(short = 'n', long, default_value = "2"))]
    pub states: State,

    /// The neighborhood of the rule table.
    #[cfg_attr(
        feature = "clap",
        arg(short = 'N', long, value_enum, default_value = "moore")
    )]
    pub neighborhood: Neighborhood,

    /// Symmetry of the transition function.
    ///
    /// The transition function must actually have this symmetry,
    /// otherwise the compiled rule table will be wrong.
    /// `rot8` is only supported for the Moore neighborhood.
    #[cfg_attr(feature = "clap", arg(short, long, value_enum, default_value = "none"))]
    pub symmetry: Symmetry,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self::new(MIN_STATES)
    }
}

impl CompileConfig {
    /// Create a new configuration for the Moore neighborhood without symmetry.
    #[inline]
    pub const fn new(states: State) -> Self {
        Self {
            states,
            neighborhood: Neighborhood::Moore,
            symmetry: Symmetry::None,
        }
    }

    /// Set the neighborhood.
    #[inline]
    pub const fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Set the symmetry.
    #[inline]
    pub const fn with_symmetry(mut self, symmetry: Symmetry) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Check whether the configuration is valid.
    pub const fn check(self) -> Result<Self, ConfigError> {
        if self.states < MIN_STATES {
            return Err(ConfigError::TooFewStates(self.states));
        }

        if self.states > MAX_STATES {
            return Err(ConfigError::TooManyStates(self.states));
        }

        if !self.symmetry.supports(self.neighborhood) {
            return Err(ConfigError::UnsupportedSymmetry {
                symmetry: self.symmetry,
                neighborhood: self.neighborhood,
            });
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check() {
        assert_eq!(CompileConfig::default().check(), Ok(CompileConfig::new(2)));
        assert_eq!(
            CompileConfig::new(1).check(),
            Err(ConfigError::TooFewStates(1))
        );
        assert_eq!(
            CompileConfig::new(257).check(),
            Err(ConfigError::TooManyStates(257))
        );
        assert!(CompileConfig::new(256).check().is_ok());

        let config = CompileConfig::new(3)
            .with_neighborhood(Neighborhood::VonNeumann)
            .with_symmetry(Symmetry::Rot8);
        assert_eq!(
            config.check(),
            Err(ConfigError::UnsupportedSymmetry {
                symmetry: Symmetry::Rot8,
                neighborhood: Neighborhood::VonNeumann,
            })
        );
        assert!(config.with_symmetry(Symmetry::Rot4).check().is_ok());
    }

    #[test]
    fn test_error_message() {
        let error = CompileConfig::new(4)
            .with_neighborhood(Neighborhood::VonNeumann)
            .with_symmetry(Symmetry::Rot8)
            .check()
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Symmetry rot8 is not supported for the von-neumann neighborhood"
        );
    }
}
