//! Grid geometry for the panel overview

use crate::rendering::Rect;
use crate::Viewport;

/// Cell layout of a `cols` x `rows` grid with a uniform gap around and
/// between cells.
///
/// Cell size is `(extent - gap * (n + 1)) / n` along each axis. Positions are
/// kept fractional and only rounded when a concrete [`Rect`] is requested, so
/// rounding error never accumulates across a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub viewport: Viewport,
    pub cols: u32,
    pub rows: u32,
    pub gap: u32,
    cell_width: f64,
    cell_height: f64,
}

impl GridLayout {
    pub fn new(viewport: Viewport, cols: u32, rows: u32, gap: u32) -> Self {
        let cols_f = cols.max(1) as f64;
        let rows_f = rows.max(1) as f64;
        let gap_f = gap as f64;
        let cell_width = (viewport.width as f64 - gap_f * (cols_f + 1.0)) / cols_f;
        let cell_height = (viewport.height as f64 - gap_f * (rows_f + 1.0)) / rows_f;
        Self {
            viewport,
            cols,
            rows,
            gap,
            cell_width,
            cell_height,
        }
    }

    /// Number of cells in the grid.
    pub fn capacity(&self) -> u32 {
        self.cols.saturating_mul(self.rows)
    }

    /// Fractional cell size. Either component may be zero or negative when
    /// the gaps leave no room for content.
    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_width, self.cell_height)
    }

    /// True when the gaps consume the whole surface along an axis.
    pub fn is_degenerate(&self) -> bool {
        self.cell_width <= 0.0 || self.cell_height <= 0.0
    }

    /// `(column, row)` of cell `index`, ignoring capacity.
    pub fn position(&self, index: u32) -> (u32, u32) {
        let cols = self.cols.max(1);
        (index % cols, index / cols)
    }

    /// Pixel rectangle of cell `index`.
    ///
    /// Returns `None` for indices past the last cell and for degenerate
    /// layouts; overflowing panels are simply left undrawn.
    pub fn cell_rect(&self, index: u32) -> Option<Rect> {
        if index >= self.capacity() || self.is_degenerate() {
            return None;
        }
        let (col, row) = self.position(index);
        let gap = self.gap as f64;
        let x0 = gap + col as f64 * (self.cell_width + gap);
        let y0 = gap + row as f64 * (self.cell_height + gap);
        let x1 = x0 + self.cell_width;
        let y1 = y0 + self.cell_height;

        let (left, top) = (x0.round() as i64, y0.round() as i64);
        let (right, bottom) = (x1.round() as i64, y1.round() as i64);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            x: left as i32,
            y: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Rectangles for cells `0..count`, stopping at the grid capacity.
    pub fn cells(&self, count: u32) -> impl Iterator<Item = (u32, Rect)> + '_ {
        (0..count.min(self.capacity())).filter_map(move |i| self.cell_rect(i).map(|r| (i, r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp(width: u32, height: u32) -> Viewport {
        Viewport { width, height }
    }

    #[test]
    fn cell_size_subtracts_all_gaps() {
        let g = GridLayout::new(vp(640, 480), 4, 3, 15);
        let (w, h) = g.cell_size();
        assert!((w - 141.25).abs() < 1e-9);
        assert!((h - 140.0).abs() < 1e-9);
        assert_eq!(g.capacity(), 12);
    }

    #[test]
    fn cells_are_placed_row_major() {
        let g = GridLayout::new(vp(340, 230), 3, 2, 10);
        // cell = (340 - 40) / 3 = 100 wide, (230 - 30) / 2 = 100 tall
        assert_eq!(g.cell_rect(0), Some(Rect::new(10, 10, 100, 100)));
        assert_eq!(g.cell_rect(2), Some(Rect::new(230, 10, 100, 100)));
        assert_eq!(g.cell_rect(3), Some(Rect::new(10, 120, 100, 100)));
        assert_eq!(g.cell_rect(5), Some(Rect::new(230, 120, 100, 100)));
    }

    #[test]
    fn overflow_index_has_no_cell() {
        let g = GridLayout::new(vp(340, 230), 3, 2, 10);
        assert_eq!(g.cell_rect(6), None);
        assert_eq!(g.cells(10).count(), 6);
    }

    #[test]
    fn oversized_gap_is_degenerate() {
        let g = GridLayout::new(vp(50, 50), 4, 3, 15);
        assert!(g.is_degenerate());
        assert_eq!(g.cell_rect(0), None);
        assert_eq!(g.cells(12).count(), 0);
    }

    #[test]
    fn zero_gap_tiles_exactly() {
        let g = GridLayout::new(vp(300, 100), 3, 1, 0);
        let total: u32 = g.cells(3).map(|(_, r)| r.width).sum();
        assert_eq!(total, 300);
        assert_eq!(g.cell_rect(2).map(|r| r.right()), Some(300));
    }
}
