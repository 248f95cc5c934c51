//! A library for compiling cellular automaton transition functions into rule tables.
//!
//! A transition function ([`Oracle`]) maps every [`Sample`], a cell and its
//! neighbors, to the next state of the cell. The [`Compiler`] evaluates it on
//! every sample and folds the results into a [`RuleSet`] of [`WildcardRule`]s,
//! using the rotational [`Symmetry`] of the function to fold further. The
//! result can be written out as a rule table, and checked against the
//! function with [`verify`].
//!
//! # Examples
//!
//! ```rust
//! use rulecomp_lib::{verify, CompileConfig, Compiler, Neighborhood, Symmetry, WireWorld};
//!
//! let config = CompileConfig::new(4)
//!     .with_neighborhood(Neighborhood::VonNeumann)
//!     .with_symmetry(Symmetry::Rot4);
//! let rules = Compiler::new(config).compile(&WireWorld).unwrap();
//! assert!(verify(&rules, &WireWorld).is_ok());
//! assert!(rules.to_string().contains("n_states:4"));
//! ```

#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::use_self)]
#![warn(missing_docs)]

mod compiler;
mod config;
mod error;
mod oracle;
mod ruleset;
mod sample;
mod symmetry;
mod verify;
mod wildcard;

pub use compiler::Compiler;
pub use config::{CompileConfig, MAX_STATES, MIN_STATES};
pub use error::{
    CompileError, ConfigError, ParseNeighborhoodError, ParseSymmetryError, VerifyError,
};
pub use oracle::{Life, LifeLike, Oracle, WireWorld};
pub use ruleset::{variable_name, RuleSet};
pub use sample::{Neighborhood, Sample, SampleSpace, State};
pub use symmetry::Symmetry;
pub use verify::verify;
pub use wildcard::WildcardRule;
