use crate::ParseRuleError;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// The shift of the birth field in a rule mask.
pub const BIRTH_SHIFT: u32 = 0;

/// The shift of the survival field in a rule mask.
///
/// A live center adds 16 to the neighbor count, and the center itself is
/// counted once more, so survival with `n` neighbors lands on bit `17 + n`.
pub const SURVIVAL_SHIFT: u32 = 17;

/// The neighbor mask of the Moore neighborhood in a 3×3 table address.
pub const MOORE_MASK: u16 = 0x777;

/// The neighbor mask of the hexagonal neighborhood in a 3×3 table address.
///
/// It drops the south-west and north-east corners.
pub const HEX_MASK: u16 = 0x376;

/// A 9-bit field with one bit per neighbor count.
const FIELD: u32 = 0x1ff;

/// The rule mask of Conway's Game of Life, `B3/S23`.
const REGULAR_LIFE: u32 = (1 << 3) | (1 << (SURVIVAL_SHIFT + 2)) | (1 << (SURVIVAL_SHIFT + 3));

/// A two-state Life-like rule, as read from a rule string.
///
/// # Rule mask
///
/// The [`mask`](LifeRule::mask) holds two 9-bit fields: bit `n` is set if a dead
/// cell with `n` live neighbors is born, and bit `17 + n` is set if a live cell
/// with `n` live neighbors survives.
///
/// # Wolfram rules
///
/// A rule string `W<n>` describes the one-dimensional elementary automaton with
/// Wolfram number `n`, emulated on a two-dimensional grid. Such a rule has an
/// empty mask and no hexagonal flag, so that re-parsing its canonical string gives
/// back the same value.
///
/// # Examples
///
/// ```rust
/// # use liferules::LifeRule;
/// let rule: LifeRule = "s23b3".parse().unwrap();
/// assert_eq!(rule.to_string(), "B3/S23");
/// assert!(rule.is_regular_life());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LifeRule {
    pub(crate) mask: u32,
    pub(crate) hex: bool,
    pub(crate) wolfram: Option<u8>,
}

impl Default for LifeRule {
    fn default() -> Self {
        Self::from_mask(REGULAR_LIFE, false)
    }
}

impl LifeRule {
    /// Creates a rule from a rule mask and a hexagonal flag.
    ///
    /// Bits outside the birth and survival fields are ignored.
    pub const fn from_mask(mask: u32, hex: bool) -> Self {
        Self {
            mask: mask & (FIELD << BIRTH_SHIFT | FIELD << SURVIVAL_SHIFT),
            hex,
            wolfram: None,
        }
    }

    /// Creates a rule from the lists of birth and survival neighbor counts.
    ///
    /// Counts greater than 8 are ignored.
    pub fn from_counts(birth: &[u32], survival: &[u32], hex: bool) -> Self {
        let mask = birth
            .iter()
            .filter(|&&n| n <= 8)
            .fold(0, |mask, &n| mask | 1 << (BIRTH_SHIFT + n));
        let mask = survival
            .iter()
            .filter(|&&n| n <= 8)
            .fold(mask, |mask, &n| mask | 1 << (SURVIVAL_SHIFT + n));
        Self::from_mask(mask, hex)
    }

    /// Creates a Wolfram rule.
    ///
    /// # Errors
    ///
    /// The number must be even. Odd numbers would need a toroidal universe.
    pub const fn wolfram(number: u8) -> Result<Self, ParseRuleError> {
        if number & 1 != 0 {
            return Err(ParseRuleError::InvalidWolframNumber);
        }
        Ok(Self {
            mask: 0,
            hex: false,
            wolfram: Some(number),
        })
    }

    /// The rule mask.
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// The birth field of the rule mask.
    pub const fn birth_bits(&self) -> u16 {
        ((self.mask >> BIRTH_SHIFT) & FIELD) as u16
    }

    /// The survival field of the rule mask.
    pub const fn survival_bits(&self) -> u16 {
        ((self.mask >> SURVIVAL_SHIFT) & FIELD) as u16
    }

    /// Whether a dead cell with `count` live neighbors is born.
    pub const fn births_on(&self, count: u32) -> bool {
        count <= 8 && self.birth_bits() & (1 << count) != 0
    }

    /// Whether a live cell with `count` live neighbors survives.
    pub const fn survives_on(&self, count: u32) -> bool {
        count <= 8 && self.survival_bits() & (1 << count) != 0
    }

    /// Whether the rule uses the hexagonal neighborhood.
    pub const fn is_hex(&self) -> bool {
        self.hex
    }

    /// The Wolfram number, if this is a Wolfram rule.
    pub const fn wolfram_number(&self) -> Option<u8> {
        self.wolfram
    }

    /// The neighbor mask used when building the single-cell table.
    pub const fn neighbor_mask(&self) -> u16 {
        if self.hex {
            HEX_MASK
        } else {
            MOORE_MASK
        }
    }

    /// Whether a dead cell with no live neighbors is born.
    pub const fn has_b0(&self) -> bool {
        self.wolfram.is_none() && self.mask & (1 << BIRTH_SHIFT) != 0
    }

    /// Whether the rule is B0 but not S8.
    ///
    /// Such rules make the whole background flash, so they are emulated with
    /// one table for even generations and another for odd generations.
    pub const fn has_b0_not_s8(&self) -> bool {
        self.has_b0() && self.mask & (1 << (SURVIVAL_SHIFT + 8)) == 0
    }

    /// Whether this is exactly Conway's Game of Life, `B3/S23`.
    pub const fn is_regular_life(&self) -> bool {
        !self.hex && self.mask == REGULAR_LIFE && self.wolfram.is_none()
    }

    /// The mask with every birth and survival bit flipped.
    ///
    /// `B03/S23` becomes `B1245678/S0145678`.
    pub(crate) const fn complement_mask(&self) -> u32 {
        !self.mask & (FIELD << BIRTH_SHIFT | FIELD << SURVIVAL_SHIFT)
    }

    /// The mask with `Bk` replaced by `S(8-k)` and `Sk` replaced by `B(8-k)`.
    ///
    /// `B03/S23` becomes `B56/S58`.
    pub(crate) const fn mirrored_mask(&self) -> u32 {
        let mut mask = 0;
        let mut k = 0;
        while k <= 8 {
            if self.mask & (1 << (SURVIVAL_SHIFT + 8 - k)) != 0 {
                mask |= 1 << (BIRTH_SHIFT + k);
            }
            if self.mask & (1 << (BIRTH_SHIFT + 8 - k)) != 0 {
                mask |= 1 << (SURVIVAL_SHIFT + k);
            }
            k += 1;
        }
        mask
    }

    /// The mask of the rule that keeps every cell inverted.
    ///
    /// Both transforms at once: `B03/S238` becomes `B123478/S0123467`.
    pub(crate) const fn inverted_mask(&self) -> u32 {
        Self::from_mask(self.complement_mask(), self.hex).mirrored_mask()
    }

    /// The masks of the packed tables that emulate this rule.
    pub const fn emulation(&self) -> Emulation {
        if !self.has_b0() {
            Emulation::Direct(self.mask)
        } else if self.has_b0_not_s8() {
            Emulation::Alternating {
                even: self.complement_mask(),
                odd: self.mirrored_mask(),
            }
        } else {
            Emulation::Inverted(self.inverted_mask())
        }
    }
}

/// How a rule is mapped to one or two packed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emulation {
    /// The rule has no B0; its own mask is used for all generations.
    Direct(u32),
    /// The rule has both B0 and S8; the rewritten mask is used for all generations.
    Inverted(u32),
    /// The rule has B0 but not S8; the masks alternate with generation parity.
    Alternating {
        /// The mask for even generations.
        even: u32,
        /// The mask for odd generations.
        odd: u32,
    },
}

impl FromStr for LifeRule {
    type Err = ParseRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_life_rule(s)
    }
}

/// Writes the canonical rule string.
impl Display for LifeRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(number) = self.wolfram {
            return write!(f, "W{number}");
        }

        f.write_str("B")?;
        for n in (0..=8).filter(|&n| self.births_on(n)) {
            write!(f, "{n}")?;
        }
        f.write_str("/S")?;
        for n in (0..=8).filter(|&n| self.survives_on(n)) {
            write!(f, "{n}")?;
        }
        if self.hex {
            f.write_str("H")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_life() {
        let life = LifeRule::default();
        assert_eq!(life.mask(), 0x180008);
        assert!(life.is_regular_life());
        assert!(!LifeRule::from_mask(life.mask(), true).is_regular_life());
        assert!(!LifeRule::from_counts(&[3, 6], &[2, 3], false).is_regular_life());
    }

    #[test]
    fn test_from_counts() {
        let rule = LifeRule::from_counts(&[3, 6, 9], &[2, 3], false);
        assert_eq!(rule.birth_bits(), 0b1001000);
        assert_eq!(rule.survival_bits(), 0b1100);
        assert!(rule.births_on(6));
        assert!(!rule.births_on(9));
        assert!(rule.survives_on(2));
        assert!(!rule.survives_on(4));
    }

    #[test]
    fn test_emulation() {
        let life = LifeRule::default();
        assert_eq!(life.emulation(), Emulation::Direct(life.mask()));

        let b03s23 = LifeRule::from_counts(&[0, 3], &[2, 3], false);
        assert!(b03s23.has_b0_not_s8());
        assert_eq!(
            b03s23.emulation(),
            Emulation::Alternating {
                even: LifeRule::from_counts(&[1, 2, 4, 5, 6, 7, 8], &[0, 1, 4, 5, 6, 7, 8], false)
                    .mask(),
                odd: LifeRule::from_counts(&[5, 6], &[5, 8], false).mask(),
            }
        );

        let b03s238 = LifeRule::from_counts(&[0, 3], &[2, 3, 8], false);
        assert!(b03s238.has_b0());
        assert!(!b03s238.has_b0_not_s8());
        assert_eq!(
            b03s238.emulation(),
            Emulation::Inverted(
                LifeRule::from_counts(&[1, 2, 3, 4, 7, 8], &[0, 1, 2, 3, 4, 6, 7], false).mask()
            )
        );
    }

    #[test]
    fn test_wolfram() {
        assert_eq!(LifeRule::wolfram(30).unwrap().to_string(), "W30");
        assert_eq!(
            LifeRule::wolfram(31),
            Err(ParseRuleError::InvalidWolframNumber)
        );
        assert!(!LifeRule::wolfram(0).unwrap().has_b0());
    }

    #[test]
    fn test_display() {
        assert_eq!(LifeRule::from_counts(&[], &[], false).to_string(), "B/S");
        assert_eq!(
            LifeRule::from_counts(&[2, 4, 5], &[3], true).to_string(),
            "B245/S3H"
        );
    }
}
