use crate::{Sample, State};
use liferules::LifeRule;

/// A transition function: the next state of the center of a sample.
///
/// Any `Fn(&Sample) -> State` is an oracle.
pub trait Oracle {
    /// The next state of the center cell.
    fn next_state(&self, sample: &Sample) -> State;
}

impl<F> Oracle for F
where
    F: Fn(&Sample) -> State,
{
    #[inline]
    fn next_state(&self, sample: &Sample) -> State {
        self(sample)
    }
}

/// Conway's Game of Life.
///
/// State `1` is alive and state `0` is dead. A dead cell with exactly 3 live
/// neighbors is born, and a live cell with 2 or 3 live neighbors survives.
/// Any other state never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Life;

impl Oracle for Life {
    fn next_state(&self, sample: &Sample) -> State {
        let live = sample.count_neighbors(1);
        match sample.center() {
            0 => (live == 3) as State,
            1 => matches!(live, 2 | 3) as State,
            other => other,
        }
    }
}

/// WireWorld, with 4 states.
///
/// - `0`: empty, stays empty.
/// - `1`: electron head, becomes a tail.
/// - `2`: electron tail, becomes a conductor.
/// - `3`: conductor, becomes a head if exactly 1 or 2 neighbors are heads.
///
/// States above `3` become empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireWorld;

impl Oracle for WireWorld {
    fn next_state(&self, sample: &Sample) -> State {
        match sample.center() {
            1 => 2,
            2 => 3,
            3 => {
                if matches!(sample.count_neighbors(1), 1 | 2) {
                    1
                } else {
                    3
                }
            }
            _ => 0,
        }
    }
}

/// A two-state Life-like rule, such as `B36/S23`, `B2/S34H` or `W30`.
///
/// State `1` is alive and state `0` is dead; any other state never changes.
///
/// A hexagonal rule ignores the north-east and south-west neighbors. A Wolfram
/// rule treats the north row as the previous generation of a 1D automaton:
/// the cell becomes alive if it is alive, or if the bit of the Wolfram number
/// selected by `nw | n << 1 | ne << 2` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifeLike(pub LifeRule);

impl LifeLike {
    /// The underlying rule.
    pub const fn rule(&self) -> &LifeRule {
        &self.0
    }
}

impl Oracle for LifeLike {
    fn next_state(&self, sample: &Sample) -> State {
        let center = sample.center();
        if center > 1 {
            return center;
        }
        let alive = |state: State| (state == 1) as u32;

        if let Some(number) = self.0.wolfram_number() {
            let index = alive(sample.nw()) | alive(sample.n()) << 1 | alive(sample.ne()) << 2;
            return (center == 1 || number >> index & 1 == 1) as State;
        }

        let mut live = sample.count_neighbors(1) as u32;
        if self.0.is_hex() {
            live -= alive(sample.ne()) + alive(sample.sw());
        }

        if center == 1 {
            self.0.survives_on(live) as State
        } else {
            self.0.births_on(live) as State
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Neighborhood, SampleSpace};
    use liferules::{PackedTable, Parity, RuleTables};

    /// The 3×3 address of a Moore sample, as used by [`PackedTable::next_cell`].
    fn address(sample: &Sample) -> u16 {
        let bit = |state: State, shift: u32| ((state == 1) as u16) << shift;
        bit(sample.sw(), 0)
            | bit(sample.s(), 1)
            | bit(sample.se(), 2)
            | bit(sample.w(), 4)
            | bit(sample.center(), 5)
            | bit(sample.e(), 6)
            | bit(sample.nw(), 8)
            | bit(sample.n(), 9)
            | bit(sample.ne(), 10)
    }

    #[test]
    fn test_closure() {
        let oracle = |sample: &Sample| sample.n();
        let sample = Sample::von_neumann([0, 7, 0, 0, 0]);
        assert_eq!(oracle.next_state(&sample), 7);
    }

    #[test]
    fn test_life() {
        let blinker_end = Sample::moore([0, 1, 0, 0, 0, 1, 0, 1, 0]);
        assert_eq!(Life.next_state(&blinker_end), 1);
        let lonely = Sample::moore([1, 1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Life.next_state(&lonely), 0);
        let crowded = Sample::moore([1, 1, 1, 1, 1, 0, 0, 0, 0]);
        assert_eq!(Life.next_state(&crowded), 0);
        let other = Sample::moore([2, 1, 1, 1, 0, 0, 0, 0, 0]);
        assert_eq!(Life.next_state(&other), 2);
    }

    #[test]
    fn test_wireworld() {
        assert_eq!(WireWorld.next_state(&Sample::von_neumann([0, 1, 1, 0, 0])), 0);
        assert_eq!(WireWorld.next_state(&Sample::von_neumann([1, 3, 3, 3, 3])), 2);
        assert_eq!(WireWorld.next_state(&Sample::von_neumann([2, 3, 3, 3, 3])), 3);
        assert_eq!(WireWorld.next_state(&Sample::von_neumann([3, 1, 0, 0, 0])), 1);
        assert_eq!(WireWorld.next_state(&Sample::von_neumann([3, 1, 1, 0, 0])), 1);
        assert_eq!(WireWorld.next_state(&Sample::von_neumann([3, 1, 1, 1, 0])), 3);
        assert_eq!(WireWorld.next_state(&Sample::von_neumann([3, 2, 2, 0, 0])), 3);
    }

    #[test]
    fn test_life_like_agrees_with_packed_table() {
        for rule in ["B3/S23", "B36/S23", "B2/S34H", "B1357/S02468", "W30", "W110"] {
            let rule: LifeRule = rule.parse().unwrap();
            let table = PackedTable::for_rule(&rule);
            let oracle = LifeLike(rule);
            for sample in SampleSpace::new(Neighborhood::Moore, 2) {
                assert_eq!(
                    oracle.next_state(&sample),
                    table.next_cell(address(&sample)) as State,
                    "{rule} at {sample}"
                );
            }
        }
    }

    #[test]
    fn test_life_like_matches_life() {
        let oracle = LifeLike(LifeRule::default());
        for sample in SampleSpace::new(Neighborhood::Moore, 2) {
            assert_eq!(oracle.next_state(&sample), Life.next_state(&sample));
        }
        let tables = RuleTables::new(oracle.rule());
        assert_eq!(tables.count(), 1);
        assert_eq!(tables.table(Parity::Odd), tables.table(Parity::Even));
    }
}
