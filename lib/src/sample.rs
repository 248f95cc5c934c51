use crate::error::ParseNeighborhoodError;
#[cfg(feature = "clap")]
use clap::ValueEnum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::Index,
    str::FromStr,
};
use strum::EnumIter;

/// The state of a cell, an integer in `0..n_states`.
pub type State = u16;

/// The neighborhood of a rule table.
///
/// The positions of a [`Sample`] are ordered clockwise from north, after the
/// center:
///
/// ```text
/// von Neumann:     Moore:
///
///   . 1 .          8 1 2
///   4 0 2          7 0 3
///   . 3 .          6 5 4
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Neighborhood {
    /// The center and its 4 orthogonal neighbors.
    #[cfg_attr(feature = "clap", value(alias = "5"))]
    VonNeumann,

    /// The center and its 8 surrounding cells.
    #[default]
    #[cfg_attr(feature = "clap", value(alias = "9"))]
    Moore,
}

/// Accepts `moore` or `von-neumann` in any case, or the size `9` or `5`.
impl FromStr for Neighborhood {
    type Err = ParseNeighborhoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "moore" | "9" => Ok(Self::Moore),
            "von-neumann" | "vonneumann" | "5" => Ok(Self::VonNeumann),
            _ => Err(ParseNeighborhoodError),
        }
    }
}

impl Neighborhood {
    /// The number of cells, including the center: 5 or 9.
    pub const fn size(self) -> usize {
        match self {
            Self::VonNeumann => 5,
            Self::Moore => 9,
        }
    }

    /// The number of neighbors, excluding the center: 4 or 8.
    pub const fn neighbor_count(self) -> usize {
        self.size() - 1
    }

    /// The names of the positions of a sample, in order.
    pub const fn position_names(self) -> &'static [&'static str] {
        match self {
            Self::VonNeumann => &["C", "N", "E", "S", "W"],
            Self::Moore => &["C", "N", "NE", "E", "SE", "S", "SW", "W", "NW"],
        }
    }

    /// The neighborhood with the given number of cells.
    pub const fn from_size(size: usize) -> Option<Self> {
        match size {
            5 => Some(Self::VonNeumann),
            9 => Some(Self::Moore),
            _ => None,
        }
    }
}

/// A cell and its neighbors, as seen by a transition function.
///
/// For the von Neumann neighborhood, the diagonal neighbors read as state `0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sample {
    neighborhood: Neighborhood,
    cells: [State; 9],
}

impl Debug for Sample {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sample")
            .field("neighborhood", &self.neighborhood)
            .field("cells", &self.as_slice())
            .finish()
    }
}

/// Writes the states in order, separated by commas, as in a rule table.
impl Display for Sample {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, state) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{state}")?;
        }
        Ok(())
    }
}

impl Index<usize> for Sample {
    type Output = State;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl Sample {
    /// A sample with every cell in state `0`.
    pub const fn zero(neighborhood: Neighborhood) -> Self {
        Self {
            neighborhood,
            cells: [0; 9],
        }
    }

    /// Create a von Neumann sample from `[C, N, E, S, W]`.
    pub const fn von_neumann(cells: [State; 5]) -> Self {
        let [c, n, e, s, w] = cells;
        Self {
            neighborhood: Neighborhood::VonNeumann,
            cells: [c, n, e, s, w, 0, 0, 0, 0],
        }
    }

    /// Create a Moore sample from `[C, N, NE, E, SE, S, SW, W, NW]`.
    pub const fn moore(cells: [State; 9]) -> Self {
        Self {
            neighborhood: Neighborhood::Moore,
            cells,
        }
    }

    /// Create a sample from a slice of states in position order.
    ///
    /// Returns [`None`] if the length of the slice is not the size of the neighborhood.
    pub fn from_slice(neighborhood: Neighborhood, states: &[State]) -> Option<Self> {
        if states.len() != neighborhood.size() {
            return None;
        }
        let mut sample = Self::zero(neighborhood);
        sample.cells[..states.len()].copy_from_slice(states);
        Some(sample)
    }

    /// The neighborhood of the sample.
    pub const fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// The states in position order.
    pub fn as_slice(&self) -> &[State] {
        &self.cells[..self.neighborhood.size()]
    }

    /// The state of the center cell.
    pub const fn center(&self) -> State {
        self.cells[0]
    }

    /// The states of the neighbors, clockwise from north.
    pub fn neighbors(&self) -> &[State] {
        &self.as_slice()[1..]
    }

    /// The same sample with the state at `position` replaced.
    #[must_use]
    pub const fn with(mut self, position: usize, state: State) -> Self {
        self.cells[position] = state;
        self
    }

    /// The sample rotated by `steps` positions.
    ///
    /// Neighbor `i` of the result is neighbor `i + steps` of `self`, counted
    /// clockwise and wrapping around. The center does not move. For the Moore
    /// neighborhood, a rotation by 2 steps is a quarter turn.
    #[must_use]
    pub fn rotated(&self, steps: usize) -> Self {
        let k = self.neighborhood.neighbor_count();
        let mut rotated = *self;
        for i in 0..k {
            rotated.cells[1 + i] = self.cells[1 + (i + steps) % k];
        }
        rotated
    }

    /// The number of neighbors in the given state.
    pub fn count_neighbors(&self, state: State) -> usize {
        self.neighbors().iter().filter(|&&s| s == state).count()
    }

    /// The north neighbor.
    pub const fn n(&self) -> State {
        self.cells[1]
    }

    /// The north-east neighbor, or `0` for the von Neumann neighborhood.
    pub const fn ne(&self) -> State {
        self.moore_only(2)
    }

    /// The east neighbor.
    pub const fn e(&self) -> State {
        self.cells[self.orthogonal(1)]
    }

    /// The south-east neighbor, or `0` for the von Neumann neighborhood.
    pub const fn se(&self) -> State {
        self.moore_only(4)
    }

    /// The south neighbor.
    pub const fn s(&self) -> State {
        self.cells[self.orthogonal(2)]
    }

    /// The south-west neighbor, or `0` for the von Neumann neighborhood.
    pub const fn sw(&self) -> State {
        self.moore_only(6)
    }

    /// The west neighbor.
    pub const fn w(&self) -> State {
        self.cells[self.orthogonal(3)]
    }

    /// The north-west neighbor, or `0` for the von Neumann neighborhood.
    pub const fn nw(&self) -> State {
        self.moore_only(8)
    }

    /// The position of the `i`-th orthogonal neighbor, clockwise from north.
    const fn orthogonal(&self, i: usize) -> usize {
        match self.neighborhood {
            Neighborhood::VonNeumann => 1 + i,
            Neighborhood::Moore => 1 + 2 * i,
        }
    }

    /// The state at a Moore position, or `0` for the von Neumann neighborhood.
    const fn moore_only(&self, position: usize) -> State {
        match self.neighborhood {
            Neighborhood::VonNeumann => 0,
            Neighborhood::Moore => self.cells[position],
        }
    }
}

/// An iterator over every sample of a neighborhood with a given number of states.
///
/// The center varies slowest and the last neighbor fastest.
#[derive(Debug, Clone)]
pub struct SampleSpace {
    states: State,
    /// Positions before this one never change.
    first: usize,
    next: Option<Sample>,
}

impl SampleSpace {
    /// All `states ^ size` samples.
    pub const fn new(neighborhood: Neighborhood, states: State) -> Self {
        let next = if states == 0 {
            None
        } else {
            Some(Sample::zero(neighborhood))
        };
        Self {
            states,
            first: 0,
            next,
        }
    }

    /// All samples with the given center.
    pub const fn with_center(neighborhood: Neighborhood, states: State, center: State) -> Self {
        let next = if center >= states {
            None
        } else {
            let mut sample = Sample::zero(neighborhood);
            sample.cells[0] = center;
            Some(sample)
        };
        Self {
            states,
            first: 1,
            next,
        }
    }

    /// The number of samples of a neighborhood with a given number of states.
    pub const fn total(neighborhood: Neighborhood, states: State) -> u64 {
        (states as u64).pow(neighborhood.size() as u32)
    }
}

impl Iterator for SampleSpace {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        let mut sample = current;
        let size = sample.neighborhood.size();
        self.next = None;
        for position in (self.first..size).rev() {
            sample.cells[position] += 1;
            if sample.cells[position] < self.states {
                self.next = Some(sample);
                break;
            }
            sample.cells[position] = 0;
        }

        Some(current)
    }
}
