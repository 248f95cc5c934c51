use crate::rule::{Emulation, LifeRule};
use std::fmt::{self, Debug, Formatter};

/// Size of the single-cell and pair domains: 12-bit addresses.
const PAIR_DOMAIN: usize = 1 << 12;

/// Size of the quad domain: 16-bit addresses.
const QUAD_DOMAIN: usize = 1 << 16;

/// The center bit of a 3×3 address.
const CENTER: u16 = 0x20;

/// Bits of a 12-bit address that hold a 3×3 neighborhood.
const CELL_BITS: usize = 0x777;

/// Bits of a 16-bit address that hold a 4×3 block.
const PAIR_BITS: usize = 0xfff;

/// Iterate over all 3×3 addresses in increasing order.
///
/// These are the 12-bit addresses with bits 3, 7 and 11 clear.
fn cell_addresses() -> impl Iterator<Item = u16> {
    std::iter::successors(Some(0u16), |&i| {
        let next = ((i | 0x888) + 1) & 0x1777;
        (next <= 0x777).then_some(next)
    })
}

/// Generation parity, used to pick a table for rules that alternate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Parity {
    /// An even generation.
    #[default]
    Even,
    /// An odd generation.
    Odd,
}

impl Parity {
    /// The parity of a generation number.
    pub const fn of(generation: u64) -> Self {
        if generation & 1 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }
}

/// A packed lookup table for a two-state rule.
///
/// # Addressing
///
/// An address is a 4×4 block of cells packed into 16 bits. Nibble `r` holds row
/// `r`, with row 0 the southmost, and bit `c` of a nibble holds column `c`, with
/// column 0 the westmost.
///
/// The entry holds the next states of the inner 2×2 block: the cell at row `r`
/// and column `c`, for `r` and `c` in `1..=2`, lands on bit `4 * (r - 1) + (c - 1)`.
/// So the result occupies bits 0, 1, 4 and 5, in the same layout as the address
/// shifted by one row and one column.
///
/// # Construction
///
/// The table is built in three layers, each reusing the previous one:
///
/// 1. For every 3×3 neighborhood (a 12-bit address with bits 3, 7 and 11 clear),
///    the next state of the center cell.
/// 2. For every 4×3 block (any 12-bit address), the next states of the two middle
///    cells, from two overlapping 3×3 neighborhoods.
/// 3. For every 4×4 block, the next states of the inner 2×2 block, from two
///    overlapping 4×3 blocks.
#[derive(Clone, PartialEq, Eq)]
pub struct PackedTable {
    table: Box<[u8]>,
}

impl Debug for PackedTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedTable")
            .field("len", &self.table.len())
            .finish_non_exhaustive()
    }
}

impl PackedTable {
    /// Build a table from a rule mask, a neighbor mask, and an optional Wolfram number.
    ///
    /// See [`LifeRule`] for the layout of the rule mask.
    pub fn new(rule_mask: u32, neighbor_mask: u16, wolfram: Option<u8>) -> Self {
        let cells = Self::cell_layer(rule_mask, neighbor_mask, wolfram);
        let pairs = Self::pair_layer(&cells);
        let table = Self::quad_layer(&pairs);
        Self { table }
    }

    /// Build the single table of a rule, ignoring B0 emulation.
    pub fn for_rule(rule: &LifeRule) -> Self {
        Self::new(rule.mask(), rule.neighbor_mask(), rule.wolfram_number())
    }

    /// The next state of the center of every 3×3 neighborhood.
    fn cell_layer(rule_mask: u32, neighbor_mask: u16, wolfram: Option<u8>) -> Vec<u8> {
        let mut cells = vec![0; PAIR_DOMAIN];

        for i in cell_addresses() {
            cells[i as usize] = match wolfram {
                // The north row selects a bit of the Wolfram number.
                Some(number) => 1 & ((i >> 5) as u8 | number >> (i >> 8)),
                None => {
                    // A live center adds 16, and is itself counted when the
                    // neighbor mask includes it.
                    let index = ((i & CENTER) >> 1) as u32 + (i & neighbor_mask).count_ones();
                    (rule_mask >> index & 1) as u8
                }
            };
        }

        cells
    }

    /// The next states of the two middle cells of every 4×3 block.
    fn pair_layer(cells: &[u8]) -> Vec<u8> {
        (0..PAIR_DOMAIN)
            .map(|i| cells[i & CELL_BITS] | cells[(i >> 1) & CELL_BITS] << 1)
            .collect()
    }

    /// The next states of the inner 2×2 block of every 4×4 block.
    fn quad_layer(pairs: &[u8]) -> Box<[u8]> {
        (0..QUAD_DOMAIN)
            .map(|i| pairs[i & PAIR_BITS] | pairs[(i >> 4) & PAIR_BITS] << 4)
            .collect()
    }

    /// The next states of the inner 2×2 block of a 4×4 block.
    ///
    /// See [`PackedTable`] for the layout of the address and of the result.
    #[inline]
    pub fn next_block(&self, block: u16) -> u8 {
        self.table[block as usize]
    }

    /// The next state of the center of a 3×3 neighborhood.
    ///
    /// Row `r` of the neighborhood is in bits `4 * r .. 4 * r + 3` of the address,
    /// as in the low 12 bits of a block address.
    #[inline]
    pub fn next_cell(&self, neighborhood: u16) -> u8 {
        self.table[(neighborhood as usize) & CELL_BITS] & 1
    }

    /// The raw table, indexed by block address.
    pub fn as_slice(&self) -> &[u8] {
        &self.table
    }
}

/// The tables of a rule: one for all generations, or one per parity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTables {
    /// One table for all generations.
    Single(PackedTable),
    /// One table for even generations and another for odd generations.
    ///
    /// Used for rules with B0 but not S8.
    Alternating {
        /// The table for even generations.
        even: PackedTable,
        /// The table for odd generations.
        odd: PackedTable,
    },
}

impl RuleTables {
    /// Build the tables of a rule.
    pub fn new(rule: &LifeRule) -> Self {
        let neighbor_mask = rule.neighbor_mask();
        let wolfram = rule.wolfram_number();

        match rule.emulation() {
            Emulation::Direct(mask) | Emulation::Inverted(mask) => {
                Self::Single(PackedTable::new(mask, neighbor_mask, wolfram))
            }
            Emulation::Alternating { even, odd } => Self::Alternating {
                even: PackedTable::new(even, neighbor_mask, wolfram),
                odd: PackedTable::new(odd, neighbor_mask, wolfram),
            },
        }
    }

    /// The table to use for a generation of the given parity.
    pub const fn table(&self, parity: Parity) -> &PackedTable {
        match (self, parity) {
            (Self::Single(table), _) => table,
            (Self::Alternating { even, .. }, Parity::Even) => even,
            (Self::Alternating { odd, .. }, Parity::Odd) => odd,
        }
    }

    /// The number of tables, 1 or 2.
    pub const fn count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Alternating { .. } => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_life_rule;

    /// The state of the cell at row `r` and column `c` of a block address.
    fn cell(block: u16, r: u32, c: u32) -> bool {
        block >> (4 * r + c) & 1 == 1
    }

    /// The next state of the cell at row `r` and column `c`, by counting neighbors.
    fn next_by_counting(rule: &LifeRule, block: u16, r: u32, c: u32) -> bool {
        let mut count = 0;
        for dr in 0..3 {
            for dc in 0..3 {
                if (dr, dc) == (1, 1) {
                    continue;
                }
                // The hexagonal neighborhood drops the south-west and north-east corners.
                if rule.is_hex() && ((dr, dc) == (0, 0) || (dr, dc) == (2, 2)) {
                    continue;
                }
                if cell(block, r + dr - 1, c + dc - 1) {
                    count += 1;
                }
            }
        }

        if cell(block, r, c) {
            rule.survives_on(count)
        } else {
            rule.births_on(count)
        }
    }

    fn check_against_counting(rule_string: &str) {
        let rule = parse_life_rule(rule_string).unwrap();
        let table = PackedTable::for_rule(&rule);

        for block in 0..=u16::MAX {
            let next = table.next_block(block);
            for r in 1..=2 {
                for c in 1..=2 {
                    let bit = 4 * (r - 1) + (c - 1);
                    assert_eq!(
                        next >> bit & 1 == 1,
                        next_by_counting(&rule, block, r, c),
                        "rule {rule_string}, block {block:#06x}, cell ({r}, {c})"
                    );
                }
            }
            assert_eq!(next & !0b110011, 0);
        }
    }

    #[test]
    fn test_cell_addresses() {
        let addresses: Vec<u16> = cell_addresses().collect();
        assert_eq!(addresses.len(), 512);
        assert_eq!(addresses[0], 0);
        assert_eq!(addresses[1], 1);
        assert_eq!(addresses[7], 7);
        assert_eq!(addresses[8], 0x10);
        assert_eq!(*addresses.last().unwrap(), 0x777);
        assert!(addresses.iter().all(|&i| i & 0x888 == 0));
    }

    #[test]
    fn test_life_table() {
        check_against_counting("B3/S23");
    }

    #[test]
    fn test_other_tables() {
        check_against_counting("B36/S23");
        check_against_counting("B2/S");
        check_against_counting("B1357/S02468");
        check_against_counting("B2/S34H");
    }

    #[test]
    fn test_blinker() {
        let table = PackedTable::for_rule(&LifeRule::default());

        // A horizontal blinker on row 1, columns 0 to 2.
        let horizontal = 0b0111 << 4;
        // Cells (1, 1) and (2, 1) are alive in the next generation,
        // and (0, 1) is outside the inner block.
        assert_eq!(table.next_block(horizontal), 0b010001);

        let vertical = 0b0010 | 0b0010 << 4 | 0b0010 << 8;
        // Cells (1, 1) and (1, 2) are alive in the next generation.
        assert_eq!(table.next_block(vertical), 0b000011);
    }

    #[test]
    fn test_wolfram_table() {
        let rule = parse_life_rule("W30").unwrap();
        let table = PackedTable::for_rule(&rule);

        for i in cell_addresses() {
            let north = (i >> 8) & 7;
            let expected = (i >> 5) & 1 == 1 || (30 >> north) & 1 == 1;
            assert_eq!(table.next_cell(i) == 1, expected, "address {i:#05x}");
        }
    }

    #[test]
    fn test_rule_tables() {
        let life = RuleTables::new(&parse_life_rule("B3/S23").unwrap());
        assert_eq!(life.count(), 1);
        assert_eq!(life.table(Parity::Even), life.table(Parity::Odd));

        let rule = parse_life_rule("B03/S23").unwrap();
        let tables = RuleTables::new(&rule);
        assert_eq!(tables.count(), 2);
        assert_eq!(
            tables.table(Parity::Even),
            &PackedTable::for_rule(&parse_life_rule("B1245678/S0145678").unwrap())
        );
        assert_eq!(
            tables.table(Parity::Odd),
            &PackedTable::for_rule(&parse_life_rule("B56/S58").unwrap())
        );

        let rule = parse_life_rule("B03/S238").unwrap();
        let tables = RuleTables::new(&rule);
        assert_eq!(tables.count(), 1);
        assert_eq!(
            tables.table(Parity::Even),
            &PackedTable::for_rule(&parse_life_rule("B123478/S0123467").unwrap())
        );
    }

    #[test]
    fn test_parity() {
        assert_eq!(Parity::of(0), Parity::Even);
        assert_eq!(Parity::of(7), Parity::Odd);
        assert_eq!(Parity::of(10), Parity::Even);
    }
}
