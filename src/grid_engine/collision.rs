//! Collision detection over resting placements.
//!
//! Every mutation the engine commits goes through [`would_overlap`] first;
//! no other code decides whether two fields share columns.

use crate::model::{FieldId, GridPos, Layout};

use super::grid::{GridSpec, MAX_ROWS, TOTAL_COLUMNS};

/// Whether a field of `width` resting at `pos` would share columns with any
/// visible field in the same row. `exclude` removes one field from the
/// check, normally the field being moved.
pub fn would_overlap(
    grid: &GridSpec,
    pos: GridPos,
    width: f64,
    layout: &Layout,
    exclude: Option<FieldId>,
) -> bool {
    let row = grid.resting_row_of_y(pos.y);
    let start = grid.column_of_x(pos.x);
    let end = start + grid.actual_span(width, start) - 1;
    layout
        .row_occupants(grid, row, exclude)
        .iter()
        .any(|other| !(end < other.start_column || start > other.end_column()))
}

/// First free slot for a field of `width`, scanning row-major from
/// `start_row`: rows top to bottom, start columns left to right. When every
/// addressable row is blocked the field is appended in the row below the
/// bottom-most occupant, so this never fails.
pub fn find_next_available(
    grid: &GridSpec,
    width: f64,
    layout: &Layout,
    exclude: Option<FieldId>,
    start_row: usize,
) -> GridPos {
    let span = grid.span_of_width(width);
    for row in start_row..MAX_ROWS {
        for column in 0..=(TOTAL_COLUMNS - span) {
            let candidate = GridPos::new(grid.column_to_x(column), grid.y_of_row(row));
            if !would_overlap(grid, candidate, width, layout, exclude) {
                return candidate;
            }
        }
    }

    let next_row = layout.max_occupied_row(grid, exclude).map_or(0, |row| row + 1);
    GridPos::new(0.0, grid.y_of_row(next_row))
}
