use crate::grid::{Cell, GridSize};
use rand::Rng;

/// Pick the next cell to highlight. Row and column are drawn independently
/// and uniformly; the previous target is not excluded.
pub fn pick_target<R: Rng + ?Sized>(size: GridSize, rng: &mut R) -> Cell {
    let side = size.side();
    Cell::new(rng.gen_range(0..side), rng.gen_range(0..side))
}
