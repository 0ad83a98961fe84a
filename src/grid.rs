use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the board, zero-based from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_within(&self, size: GridSize) -> bool {
        self.row < size.side() && self.col < size.side()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Supported board sizes. Stored and parsed as the bare side length.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum GridSize {
    #[default]
    #[value(name = "10")]
    #[strum(to_string = "10×10")]
    Ten,
    #[value(name = "20")]
    #[strum(to_string = "20×20")]
    Twenty,
    #[value(name = "30")]
    #[strum(to_string = "30×30")]
    Thirty,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [GridSize::Ten, GridSize::Twenty, GridSize::Thirty];

    /// Number of cells along one edge
    pub fn side(self) -> usize {
        match self {
            GridSize::Ten => 10,
            GridSize::Twenty => 20,
            GridSize::Thirty => 30,
        }
    }

    pub fn cell_count(self) -> usize {
        self.side() * self.side()
    }

    /// The next size up, wrapping back to the smallest
    pub fn cycle(self) -> Self {
        match self {
            GridSize::Ten => GridSize::Twenty,
            GridSize::Twenty => GridSize::Thirty,
            GridSize::Thirty => GridSize::Ten,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidGridSize(pub usize);

impl fmt::Display for InvalidGridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported grid size {} (expected 10, 20 or 30)",
            self.0
        )
    }
}

impl std::error::Error for InvalidGridSize {}

impl TryFrom<usize> for GridSize {
    type Error = InvalidGridSize;

    fn try_from(side: usize) -> Result<Self, Self::Error> {
        GridSize::ALL
            .into_iter()
            .find(|size| size.side() == side)
            .ok_or(InvalidGridSize(side))
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.side()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_side_and_cell_count() {
        assert_eq!(GridSize::Ten.side(), 10);
        assert_eq!(GridSize::Twenty.side(), 20);
        assert_eq!(GridSize::Thirty.cell_count(), 900);
    }

    #[test]
    fn test_try_from_side() {
        assert_eq!(GridSize::try_from(20), Ok(GridSize::Twenty));
        assert_matches!(GridSize::try_from(15), Err(InvalidGridSize(15)));
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(GridSize::Ten.cycle(), GridSize::Twenty);
        assert_eq!(GridSize::Thirty.cycle(), GridSize::Ten);
    }

    #[test]
    fn test_display() {
        assert_eq!(GridSize::Ten.to_string(), "10×10");
        assert_eq!(Cell::new(3, 7).to_string(), "3-7");
    }

    #[test]
    fn test_serde_as_bare_integer() {
        assert_eq!(serde_json::to_string(&GridSize::Thirty).unwrap(), "30");
        let parsed: GridSize = serde_json::from_str("20").unwrap();
        assert_eq!(parsed, GridSize::Twenty);
        assert!(serde_json::from_str::<GridSize>("12").is_err());
    }

    #[test]
    fn test_cell_is_within() {
        assert!(Cell::new(9, 9).is_within(GridSize::Ten));
        assert!(!Cell::new(10, 0).is_within(GridSize::Ten));
        assert!(Cell::new(10, 0).is_within(GridSize::Twenty));
    }
}
