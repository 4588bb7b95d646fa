//! Layout compaction, run after a drag or visibility change commits.
//!
//! Reflow removes empty rows; gap fill widens fields into leftover free
//! columns. Both stages only ever tighten an already valid layout, so the
//! no-overlap invariant is checked, never repaired, here.

use std::cmp::Reverse;

use crate::common::collections::HashMap;
use crate::model::{FieldId, GridPos, Layout, Placement, RowOccupant};

use super::collision::would_overlap;
use super::grid::{GridSpec, MagneticWidth, TOTAL_COLUMNS};
use super::preview::row_gaps;

/// Minimum free fraction of a row before gap fill touches it.
const FREE_WIDTH_SLACK: f64 = 0.05;

/// Tolerance within which row occupants count as equally wide.
const EQUAL_WIDTH_TOLERANCE: f64 = 0.05;

/// Moves rows up so the occupied ones use consecutive indices from zero.
/// A row counts as occupied if any column holds a visible field; columns and
/// widths are untouched.
pub fn reflow(grid: &GridSpec, layout: &mut Layout) {
    let rows = layout.occupied_rows(grid);
    let remap: HashMap<usize, usize> =
        rows.iter().enumerate().map(|(packed, &row)| (row, packed)).collect();

    let moves: Vec<(FieldId, Placement)> = layout
        .visible()
        .filter_map(|(id, pos, width)| {
            let row = grid.resting_row_of_y(pos.y);
            let packed = *remap.get(&row)?;
            (packed != row)
                .then(|| (id, Placement::visible(pos.x, grid.y_of_row(packed), width)))
        })
        .collect();

    for (id, placement) in moves {
        layout.insert(id, placement);
    }
}

/// Widens fields into leftover free columns, row by row.
pub fn fill_gaps(grid: &GridSpec, layout: &mut Layout) {
    for row in layout.occupied_rows(grid) {
        fill_row(grid, layout, row);
    }
}

/// Reflow then gap fill, as one post-commit transition.
pub fn compact(grid: &GridSpec, layout: &mut Layout) {
    reflow(grid, layout);
    fill_gaps(grid, layout);
}

fn fill_row(grid: &GridSpec, layout: &mut Layout, row: usize) {
    let occupants = layout.row_occupants(grid, row, None);
    let used: f64 = occupants.iter().map(|occupant| occupant.width).sum();
    if 1.0 - used <= FREE_WIDTH_SLACK {
        return;
    }

    match occupants.as_slice() {
        [] => {}
        [only] => {
            // A lone field takes the whole row.
            layout.insert(only.id, Placement::visible(0.0, grid.y_of_row(row), 1.0));
        }
        occupants if equal_widths(occupants) => {
            // Same-width fields share the row evenly, repacked left to right.
            let share = 1.0 / occupants.len() as f64;
            for (slot, occupant) in occupants.iter().enumerate() {
                layout.insert(
                    occupant.id,
                    Placement::visible(slot as f64 * share, grid.y_of_row(row), share),
                );
            }
        }
        occupants => grow_into_largest_gap(grid, layout, row, occupants),
    }
}

fn equal_widths(occupants: &[RowOccupant]) -> bool {
    let mut widths = occupants.iter().map(|occupant| occupant.width);
    let Some(first) = widths.next() else { return false };
    widths.all(|width| (width - first).abs() <= EQUAL_WIDTH_TOLERANCE)
}

/// Mixed-width row: only the field nearest the largest gap grows, by the gap
/// size snapped to a magnetic width. The grown field keeps its left edge
/// unless that would overhang the grid, in which case it is flushed right.
/// If the grown span would cover a neighbor the row is left as it was.
fn grow_into_largest_gap(
    grid: &GridSpec,
    layout: &mut Layout,
    row: usize,
    occupants: &[RowOccupant],
) {
    let gaps = row_gaps(grid, layout, row, None);
    let Some(gap) = gaps.iter().max_by_key(|gap| (gap.len, Reverse(gap.start))) else {
        return;
    };

    let gap_center = gap.start as f64 + gap.len as f64 / 2.0;
    let Some(nearest) = occupants.iter().min_by(|a, b| {
        let da = (a.start_column as f64 + a.span as f64 / 2.0 - gap_center).abs();
        let db = (b.start_column as f64 + b.span as f64 / 2.0 - gap_center).abs();
        da.total_cmp(&db)
    }) else {
        return;
    };

    let grown = MagneticWidth::nearest(nearest.width + gap.len as f64 / TOTAL_COLUMNS as f64);
    let start_column = nearest.start_column.min(TOTAL_COLUMNS - grown.span());
    let pos = GridPos::new(grid.column_to_x(start_column), grid.y_of_row(row));
    if would_overlap(grid, pos, grown.fraction(), layout, Some(nearest.id)) {
        return;
    }
    layout.insert(nearest.id, Placement::Visible { pos, width: grown.fraction() });
}
