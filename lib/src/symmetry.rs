use crate::{error::ParseSymmetryError, Neighborhood};
#[cfg(feature = "clap")]
use clap::ValueEnum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter};

/// Rotational symmetry of a transition function.
///
/// A transition function has a symmetry if rotating the neighbors of any
/// sample never changes its next state. The compiler uses this to fold
/// rotated samples into the same rule, and a rule set with a symmetry
/// matches every rotation of each of its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(ValueEnum), value(rename_all = "lowercase"))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Symmetry {
    /// No symmetry.
    #[default]
    None,

    /// Symmetry with respect to 90-degree rotation.
    Rot4,

    /// Symmetry with respect to 45-degree rotation.
    ///
    /// This only exists for the Moore neighborhood, where the 8 neighbors
    /// can be rotated one step at a time.
    Rot8,
}

impl FromStr for Symmetry {
    type Err = ParseSymmetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "rot4" => Ok(Self::Rot4),
            "rot8" => Ok(Self::Rot8),
            _ => Err(ParseSymmetryError),
        }
    }
}

impl Symmetry {
    /// Whether the symmetry exists for the given neighborhood.
    #[inline]
    pub const fn supports(self, neighborhood: Neighborhood) -> bool {
        !matches!((self, neighborhood), (Self::Rot8, Neighborhood::VonNeumann))
    }

    /// The non-trivial rotations of a sample under this symmetry,
    /// as step counts for [`Sample::rotated`](crate::Sample::rotated).
    ///
    /// Quarter turns come first. Returns an empty slice if the symmetry
    /// does not exist for the neighborhood.
    pub const fn rotations(self, neighborhood: Neighborhood) -> &'static [usize] {
        match (self, neighborhood) {
            (Self::None, _) | (Self::Rot8, Neighborhood::VonNeumann) => &[],
            (Self::Rot4, Neighborhood::VonNeumann) => &[1, 2, 3],
            (Self::Rot4, Neighborhood::Moore) => &[2, 4, 6],
            (Self::Rot8, Neighborhood::Moore) => &[2, 4, 6, 1, 3, 5, 7],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse() {
        for symmetry in Symmetry::iter() {
            assert_eq!(symmetry.to_string().parse(), Ok(symmetry));
        }
        assert_eq!("ROT4".parse(), Ok(Symmetry::Rot4));
        assert_eq!("rot2".parse::<Symmetry>(), Err(ParseSymmetryError));
    }

    #[test]
    fn test_rotations() {
        assert!(Symmetry::None.rotations(Neighborhood::Moore).is_empty());
        assert_eq!(Symmetry::Rot4.rotations(Neighborhood::VonNeumann), &[1, 2, 3]);
        assert_eq!(Symmetry::Rot4.rotations(Neighborhood::Moore), &[2, 4, 6]);
        assert_eq!(Symmetry::Rot8.rotations(Neighborhood::Moore).len(), 7);
        assert!(!Symmetry::Rot8.supports(Neighborhood::VonNeumann));
        assert!(Symmetry::Rot8.supports(Neighborhood::Moore));
    }
}
