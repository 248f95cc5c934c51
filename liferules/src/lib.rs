//! A crate for parsing two-state Life-like rules and compiling them into packed
//! lookup tables.
//!
//! A rule string such as `B3/S23`, `23/3`, `B2/S34H` or `W30` is parsed into a
//! [`LifeRule`], which is then turned into one or two [`PackedTable`]s. Rules
//! that make the empty background flash (B0 without S8) need a different table
//! on even and odd generations; see [`RuleTables`] and [`Parity`].

#![warn(clippy::missing_const_for_fn)]
#![warn(missing_docs)]

mod error;
mod life;
mod named;
mod parse;
mod rule;
mod table;

pub use error::{NamedRuleError, ParseRuleError};
pub use life::LifeRules;
pub use named::NamedRules;
pub use parse::{matching_rules, parse_life_rule};
pub use rule::{Emulation, LifeRule, BIRTH_SHIFT, HEX_MASK, MOORE_MASK, SURVIVAL_SHIFT};
pub use table::{PackedTable, Parity, RuleTables};
