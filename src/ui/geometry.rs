use ratatui::layout::{Position, Rect};

use crate::grid::{Cell, GridSize};

/// Where each board cell lands on screen, and the reverse lookup for mouse
/// clicks. Cells are twice as wide as tall so they come out roughly square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_width: u16,
    pub cell_height: u16,
    pub side: u16,
}

impl GridGeometry {
    /// Largest centered board that fits in `area`, or None if even one
    /// terminal cell per board cell does not fit.
    pub fn fit(area: Rect, size: GridSize) -> Option<Self> {
        let side = size.side() as u16;
        let mut cell_height = (area.height / side).min(area.width / (side * 2));
        let mut cell_width = cell_height * 2;

        if cell_height == 0 {
            if area.width < side || area.height < side {
                return None;
            }
            cell_height = 1;
            cell_width = 1;
        }

        let used_width = side * cell_width;
        let used_height = side * cell_height;
        Some(Self {
            origin_x: area.x + (area.width - used_width) / 2,
            origin_y: area.y + (area.height - used_height) / 2,
            cell_width,
            cell_height,
            side,
        })
    }

    /// Screen area covered by the whole board
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.side * self.cell_width,
            self.side * self.cell_height,
        )
    }

    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect::new(
            self.origin_x + cell.col as u16 * self.cell_width,
            self.origin_y + cell.row as u16 * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }

    /// Board cell under the terminal position, if any
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Cell> {
        if !self.bounds().contains(Position::new(column, row)) {
            return None;
        }
        let col = (column - self.origin_x) / self.cell_width;
        let row = (row - self.origin_y) / self.cell_height;
        Some(Cell::new(row as usize, col as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_scales_cells_to_area() {
        let geo = GridGeometry::fit(Rect::new(0, 0, 100, 40), GridSize::Ten).unwrap();
        assert_eq!((geo.cell_width, geo.cell_height), (8, 4));
        assert_eq!(geo.bounds(), Rect::new(10, 0, 80, 40));
    }

    #[test]
    fn fit_falls_back_to_single_columns() {
        let geo = GridGeometry::fit(Rect::new(0, 0, 40, 30), GridSize::Thirty).unwrap();
        assert_eq!((geo.cell_width, geo.cell_height), (1, 1));
        assert_eq!(geo.bounds(), Rect::new(5, 0, 30, 30));
    }

    #[test]
    fn fit_rejects_tiny_areas() {
        let short = Rect::new(0, 0, 80, 20);
        assert_eq!(GridGeometry::fit(short, GridSize::Thirty), None);
        let narrow = Rect::new(0, 0, 9, 40);
        assert_eq!(GridGeometry::fit(narrow, GridSize::Ten), None);
    }

    #[test]
    fn every_cell_maps_back_to_itself() {
        let area = Rect::new(3, 2, 120, 45);
        for size in GridSize::ALL {
            let geo = GridGeometry::fit(area, size).unwrap();
            for row in 0..size.side() {
                for col in 0..size.side() {
                    let cell = Cell::new(row, col);
                    let rect = geo.cell_rect(cell);
                    assert_eq!(geo.cell_at(rect.x, rect.y), Some(cell));
                    assert_eq!(
                        geo.cell_at(rect.x + rect.width - 1, rect.y + rect.height - 1),
                        Some(cell)
                    );
                }
            }
        }
    }

    #[test]
    fn points_outside_board_hit_nothing() {
        let geo = GridGeometry::fit(Rect::new(0, 0, 100, 40), GridSize::Ten).unwrap();
        assert_eq!(geo.cell_at(9, 5), None);
        assert_eq!(geo.cell_at(90, 5), None);
        assert_eq!(geo.cell_at(50, 40), None);
        assert_eq!(geo.cell_at(10, 0), Some(Cell::new(0, 0)));
    }

    #[test]
    fn board_edges_follow_bounds() {
        let geo = GridGeometry::fit(Rect::new(2, 1, 100, 40), GridSize::Ten).unwrap();
        let bounds = geo.bounds();
        let (right, bottom) = (bounds.right() - 1, bounds.bottom() - 1);

        assert_eq!(geo.cell_at(right, bottom), Some(Cell::new(9, 9)));
        assert_eq!(geo.cell_at(bounds.right(), bottom), None);
        assert_eq!(geo.cell_at(right, bounds.bottom()), None);
        assert_eq!(geo.cell_at(bounds.x - 1, bounds.y), None);
    }
}
