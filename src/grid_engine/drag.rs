//! Drag session lifecycle.
//!
//! A session owns the drag-start snapshot and everything derived from it.
//! The displayed position follows the raw pointer; previews are recomputed
//! from the snapshot whenever the hovered row changes, so moving away and
//! back always restores what the grid looked like before the drag.

use std::time::{Duration, Instant};

use crate::common::config::DragSettings;
use crate::model::{FieldId, GridPos, Layout, Placement, PointerPos};

use super::grid::{GridSpec, MAX_ROWS};
use super::preview::{PlacementPreview, compute_preview};

/// Phase of an in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Pointer is down but has not traveled far enough to count as a drag.
    BelowThreshold,
    /// Travel crossed the threshold; the field follows the pointer and
    /// previews are live.
    Previewing,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    field: FieldId,
    /// Layout as it stood when the drag began. Previews and the final commit
    /// both derive from this, never from intermediate states.
    origin: Layout,
    start_pointer: PointerPos,
    field_start: GridPos,
    width: f64,
    phase: DragPhase,
    display: GridPos,
    preview: Option<PlacementPreview>,
    last_preview_at: Option<Instant>,
    config: DragSettings,
}

impl DragSession {
    /// Opens a session for `field`, snapshotting `origin`. `None` when the
    /// field is not visible there.
    pub fn begin(
        config: DragSettings,
        origin: &Layout,
        field: FieldId,
        pointer: PointerPos,
    ) -> Option<DragSession> {
        let (field_start, width) = origin.get(field)?.visible_parts()?;
        Some(DragSession {
            field,
            origin: origin.clone(),
            start_pointer: pointer,
            field_start,
            width,
            phase: DragPhase::BelowThreshold,
            display: field_start,
            preview: None,
            last_preview_at: None,
            config,
        })
    }

    /// Feeds a pointer position. Promotes the session once travel crosses
    /// the drag threshold, then tracks the displayed position and refreshes
    /// the preview when the hovered row changes (subject to the throttle).
    /// Until promotion the field does not move.
    pub fn on_pointer_move(&mut self, grid: &GridSpec, pointer: PointerPos, container_width: f64) {
        if container_width <= 0.0 {
            return;
        }
        let dx = pointer.x - self.start_pointer.x;
        let dy = pointer.y - self.start_pointer.y;

        if self.phase == DragPhase::BelowThreshold {
            if f64::hypot(dx, dy) < self.config.drag_threshold {
                return;
            }
            self.phase = DragPhase::Previewing;
        }

        self.display = GridPos::new(
            (self.field_start.x + dx / container_width).clamp(0.0, 1.0 - self.width),
            (self.field_start.y + dy).clamp(0.0, MAX_ROWS as f64 * grid.row_height()),
        );

        let row = grid.row_of_y(self.display.y);
        let row_changed = self.preview.as_ref().map(|preview| preview.target_row) != Some(row);
        if row_changed && self.throttle_elapsed() {
            self.preview = Some(compute_preview(grid, &self.origin, self.field, self.width, row));
            self.last_preview_at = Some(Instant::now());
        }
    }

    fn throttle_elapsed(&self) -> bool {
        self.last_preview_at
            .is_none_or(|at| at.elapsed() >= Duration::from_millis(self.config.preview_throttle_ms))
    }

    /// Layout to render while the drag is live: every other field where the
    /// snapshot had it, the dragged field at its raw displayed position.
    pub fn display_layout(&self) -> Layout {
        let mut layout = self.origin.clone();
        layout.insert(
            self.field,
            Placement::Visible { pos: self.display, width: self.width },
        );
        layout
    }

    pub fn field(&self) -> FieldId { self.field }

    pub fn phase(&self) -> DragPhase { self.phase }

    pub fn origin(&self) -> &Layout { &self.origin }

    pub fn display(&self) -> GridPos { self.display }

    pub fn width(&self) -> f64 { self.width }

    pub fn preview(&self) -> Option<&PlacementPreview> { self.preview.as_ref() }
}
