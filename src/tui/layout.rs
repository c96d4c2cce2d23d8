//! Dashboard grid layout
//!
//! Packs panels left to right into rows of `GRID_COLUMNS` cells, opening a
//! new row when the next panel does not fit. A row is as tall as its tallest
//! panel. Cell placement is pure; `grid_rects` scales it onto a terminal area.

use ratatui::layout::Rect;

use crate::panel::{GridSpan, GRID_COLUMNS};

/// Placement of one panel, in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

/// Place panels on the grid. Returns the cells and the total row count.
pub fn grid_cells(spans: &[GridSpan]) -> (Vec<GridCell>, u16) {
    let mut cells = Vec::with_capacity(spans.len());
    let mut col = 0;
    let mut row = 0;
    let mut row_height = 0;

    for span in spans {
        let cols = span.cols.clamp(1, GRID_COLUMNS);
        let rows = span.rows.max(1);

        if col + cols > GRID_COLUMNS {
            row += row_height;
            col = 0;
            row_height = 0;
        }

        cells.push(GridCell {
            col,
            row,
            cols,
            rows,
        });
        col += cols;
        row_height = row_height.max(rows);
    }

    (cells, row + row_height)
}

/// Scale grid cells onto `area`. Panels touching the right or bottom edge
/// absorb the rounding remainder.
pub fn grid_rects(spans: &[GridSpan], area: Rect) -> Vec<Rect> {
    let (cells, total_rows) = grid_cells(spans);
    if total_rows == 0 || area.width == 0 || area.height == 0 {
        return vec![Rect::default(); cells.len()];
    }

    let cell_w = (area.width / GRID_COLUMNS).max(1);
    let cell_h = (area.height / total_rows).max(1);

    cells
        .iter()
        .map(|c| {
            let x = area.x + c.col * cell_w;
            let y = area.y + c.row * cell_h;
            let mut width = c.cols * cell_w;
            let mut height = c.rows * cell_h;
            if c.col + c.cols == GRID_COLUMNS {
                width = area.right().saturating_sub(x);
            }
            if c.row + c.rows == total_rows {
                height = area.bottom().saturating_sub(y);
            }
            Rect::new(x, y, width, height).intersection(area)
        })
        .collect()
}

/// Index of the rect containing the given terminal position
pub fn hit_test(rects: &[Rect], column: u16, row: u16) -> Option<usize> {
    rects.iter().position(|r| {
        column >= r.x && column < r.right() && row >= r.y && row < r.bottom()
    })
}

/// Nearest rect strictly above (`up`) or below the one at `from`,
/// preferring horizontal overlap, then the smallest center distance.
pub fn vertical_neighbor(rects: &[Rect], from: usize, up: bool) -> Option<usize> {
    let origin = rects.get(from)?;
    let center_x = |r: &Rect| r.x as i32 + r.width as i32 / 2;
    let ox = center_x(origin);

    rects
        .iter()
        .enumerate()
        .filter(|(i, r)| {
            *i != from
                && if up {
                    r.bottom() <= origin.y
                } else {
                    r.y >= origin.bottom()
                }
        })
        .min_by_key(|(_, r)| {
            let overlaps = r.x < origin.right() && origin.x < r.right();
            let row_gap = if up {
                origin.y as i32 - r.bottom() as i32
            } else {
                r.y as i32 - origin.bottom() as i32
            };
            (!overlaps, row_gap, (center_x(r) - ox).abs())
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{default_panels, PanelKind};

    fn default_spans() -> Vec<GridSpan> {
        default_panels().iter().map(|p| p.kind.grid_span()).collect()
    }

    #[test]
    fn default_panels_pack_into_two_rows() {
        let (cells, rows) = grid_cells(&default_spans());
        assert_eq!(rows, 5);
        // pdf + web share the first row
        assert_eq!((cells[0].col, cells[0].row), (0, 0));
        assert_eq!((cells[1].col, cells[1].row), (4, 0));
        // data, slides, code, summary fill the second
        assert_eq!((cells[2].col, cells[2].row), (0, 3));
        assert_eq!((cells[3].col, cells[3].row), (2, 3));
        assert_eq!((cells[4].col, cells[4].row), (4, 3));
        assert_eq!((cells[5].col, cells[5].row), (6, 3));
    }

    #[test]
    fn reordering_changes_packing() {
        let spans: Vec<GridSpan> = [PanelKind::Summary, PanelKind::Pdf, PanelKind::Web]
            .iter()
            .map(|k| k.grid_span())
            .collect();
        let (cells, rows) = grid_cells(&spans);
        assert_eq!((cells[1].col, cells[1].row), (2, 0));
        // web no longer fits beside summary + pdf
        assert_eq!((cells[2].col, cells[2].row), (0, 3));
        assert_eq!(rows, 5);
    }

    #[test]
    fn rects_stay_inside_area() {
        let area = Rect::new(2, 5, 83, 31);
        let rects = grid_rects(&default_spans(), area);
        assert_eq!(rects.len(), 6);
        for r in &rects {
            assert_eq!(r.intersection(area), *r);
            assert!(r.width > 0 && r.height > 0);
        }
        // right column reaches the edge
        assert_eq!(rects[1].right(), area.right());
        assert_eq!(rects[2].bottom(), area.bottom());
    }

    #[test]
    fn hit_test_finds_panel() {
        let area = Rect::new(0, 0, 80, 25);
        let rects = grid_rects(&default_spans(), area);
        assert_eq!(hit_test(&rects, 1, 1), Some(0));
        assert_eq!(hit_test(&rects, 79, 1), Some(1));
        assert_eq!(hit_test(&rects, 79, 16), Some(5));
        assert_eq!(hit_test(&rects, 1, 24), Some(2));
        assert_eq!(hit_test(&rects, 200, 1), None);
    }

    #[test]
    fn vertical_neighbors() {
        let area = Rect::new(0, 0, 80, 25);
        let rects = grid_rects(&default_spans(), area);
        // below pdf: data and slides tie, the first one wins
        assert_eq!(vertical_neighbor(&rects, 0, false), Some(2));
        // above summary (cols 6-7): web
        assert_eq!(vertical_neighbor(&rects, 5, true), Some(1));
        assert_eq!(vertical_neighbor(&rects, 0, true), None);
    }

    #[test]
    fn empty_area_yields_empty_rects() {
        let rects = grid_rects(&default_spans(), Rect::default());
        assert!(rects.iter().all(|r| r.area() == 0));
    }
}
