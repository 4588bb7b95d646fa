//! Placement preview for an in-flight drag.
//!
//! A preview is a pure function of the drag-start snapshot and the hovered
//! row. Recomputing it for the same inputs yields the same result, so a drag
//! that wanders and returns shows the original arrangement again.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::model::{FieldId, Layout, Placement};

use super::grid::{GridSpec, MagneticWidth, TOTAL_COLUMNS};

/// How the hovered row would accommodate the dragged field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewDecision {
    /// A gap admits the field at its current width.
    Unchanged,
    /// A gap admits the field after resizing it.
    Resized { from: MagneticWidth, to: MagneticWidth },
    /// No gap admits any magnetic width; occupants of the hovered row and
    /// every row below it give way downward.
    PushedDown,
}

/// A full arrangement the grid would take if the drag ended right now.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPreview {
    pub layout: Layout,
    pub decision: PreviewDecision,
    pub target_row: usize,
}

impl PlacementPreview {
    /// False only for push-down previews, which are advisory: committing a
    /// drag that ends on one goes through the regular snap-and-search path
    /// instead of adopting the pushed arrangement.
    pub fn has_space(&self) -> bool { !matches!(self.decision, PreviewDecision::PushedDown) }

    /// Feedback line for hosts that surface the pending outcome.
    pub fn description(&self) -> String {
        match self.decision {
            PreviewDecision::Unchanged => "fits at current size".to_string(),
            PreviewDecision::Resized { from, to } if to > from => {
                format!("will expand to {to}")
            }
            PreviewDecision::Resized { to, .. } => format!("will shrink to {to}"),
            PreviewDecision::PushedDown => "will push other fields down".to_string(),
        }
    }
}

/// A maximal run of free columns in one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Gap {
    pub(super) start: usize,
    pub(super) len: usize,
}

/// Free column runs of `row`, left to right, ignoring `exclude`.
pub(super) fn row_gaps(
    grid: &GridSpec,
    layout: &Layout,
    row: usize,
    exclude: Option<FieldId>,
) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut cursor = 0usize;
    for occupant in layout.row_occupants(grid, row, exclude) {
        if occupant.start_column > cursor {
            gaps.push(Gap { start: cursor, len: occupant.start_column - cursor });
        }
        cursor = cursor.max(occupant.end_column() + 1);
    }
    if cursor < TOTAL_COLUMNS {
        gaps.push(Gap { start: cursor, len: TOTAL_COLUMNS - cursor });
    }
    gaps
}

/// Computes the arrangement previewed while `dragged` (of pre-drag normalized
/// `width`) hovers over `target_row` of the drag-start snapshot `original`.
///
/// Strategy order: fit an admissible gap, resizing the field to the largest
/// magnetic width the gap holds (an empty row therefore yields full width);
/// otherwise push the target row and everything below it down one row and
/// slot the field at column zero.
pub fn compute_preview(
    grid: &GridSpec,
    original: &Layout,
    dragged: FieldId,
    width: f64,
    target_row: usize,
) -> PlacementPreview {
    let gaps = row_gaps(grid, original, target_row, Some(dragged));
    let best = gaps
        .iter()
        .filter(|gap| gap.len >= 2)
        .max_by_key(|gap| (gap.len, Reverse(gap.start)));

    let mut layout = original.clone();

    if let Some(gap) = best {
        // A gap of two or more columns always admits some magnetic width.
        let fitted = MagneticWidth::largest_fitting(gap.len)
            .unwrap_or(MagneticWidth::Third);
        let current = MagneticWidth::nearest(width);
        let decision = if fitted == current {
            PreviewDecision::Unchanged
        } else {
            PreviewDecision::Resized { from: current, to: fitted }
        };

        layout.insert(
            dragged,
            Placement::visible(
                grid.column_to_x(gap.start),
                grid.y_of_row(target_row),
                fitted.fraction(),
            ),
        );
        return PlacementPreview { layout, decision, target_row };
    }

    // Push-down: everything at or below the target row shifts one row,
    // keeping columns and relative order.
    for (id, placement) in original.iter() {
        if id == dragged {
            continue;
        }
        if let Some((pos, field_width)) = placement.visible_parts()
            && grid.resting_row_of_y(pos.y) >= target_row
        {
            layout.insert(
                id,
                Placement::visible(pos.x, pos.y + grid.row_height(), field_width),
            );
        }
    }
    layout.insert(
        dragged,
        Placement::visible(0.0, grid.y_of_row(target_row), width),
    );

    PlacementPreview { layout, decision: PreviewDecision::PushedDown, target_row }
}
