//! Engine facade tying drag, resize, and compaction to one resting layout.
//!
//! The engine owns the layout the host renders between interactions. Pointer
//! events are forwarded to the active [`DragSession`] or [`ResizeController`];
//! nothing touches the resting layout until an interaction commits.

use tracing::{debug, warn};

use crate::common::config::EngineSettings;
use crate::model::{FieldId, Layout, Placement, PointerPos};

use super::collision::{find_next_available, would_overlap};
use super::compaction::{compact, reflow};
use super::drag::{DragPhase, DragSession};
use super::grid::{GridSpec, MagneticWidth};
use super::preview::PlacementPreview;
use super::resize::{ResizeController, ResizeEdge};

/// What the host should render after a pointer move during a drag.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct DragUpdate {
    /// Layout with the dragged field at its displayed position. Below the
    /// drag threshold this equals the resting layout.
    pub display: Layout,
    /// Preview of where the field will land, present once the drag threshold
    /// has been crossed.
    pub preview: Option<PlacementPreview>,
}

/// Placement engine for one form grid.
///
/// Holds the resting layout plus any in-flight drag or resize. Horizontal
/// coordinates are normalized to the container width, vertical coordinates
/// are pixels, so the engine never needs to know the container size except
/// at the pointer-event boundary.
#[derive(Debug)]
pub struct GridEngine {
    settings: EngineSettings,
    grid: GridSpec,
    layout: Layout,
    drag: Option<DragSession>,
    resize: ResizeController,
}

impl GridEngine {
    /// Creates an engine seeded with `defaults`. Entries are taken as-is;
    /// overlapping defaults are reported but not repaired.
    pub fn new(
        settings: EngineSettings,
        defaults: impl IntoIterator<Item = (FieldId, Placement)>,
    ) -> GridEngine {
        let grid = GridSpec::new(&settings.grid);
        let layout: Layout = defaults.into_iter().collect();
        let overlapping: Vec<FieldId> = layout
            .visible()
            .filter(|&(id, pos, width)| would_overlap(&grid, pos, width, &layout, Some(id)))
            .map(|(id, _, _)| id)
            .collect();
        if !overlapping.is_empty() {
            warn!("Initial layout has overlapping fields: {overlapping:?}");
        }
        let resize = ResizeController::new(settings.resize);
        GridEngine { settings, grid, layout, drag: None, resize }
    }

    /// Opens a drag on `field`. Ignored with a warning when a drag is
    /// already active or the field is not visible.
    pub fn on_drag_start(&mut self, field: FieldId, pointer: PointerPos) {
        if let Some(active) = &self.drag {
            warn!("Drag start on {field} while {} is dragging; ignoring", active.field());
            return;
        }
        match DragSession::begin(self.settings.drag.clone(), &self.layout, field, pointer) {
            Some(session) => {
                self.resize.reset();
                debug!("Drag start on {field}");
                self.drag = Some(session);
            }
            None => warn!("Drag start on {field} which is not visible; ignoring"),
        }
    }

    /// Advances the active drag to `pointer`.
    ///
    /// Until the drag threshold is crossed the returned display keeps every
    /// field at rest. After that the dragged field follows the pointer and
    /// the update carries a placement preview for the hovered row. Without
    /// an active drag this returns the resting layout with a warning.
    pub fn on_drag_move(&mut self, pointer: PointerPos, container_width: f64) -> DragUpdate {
        let Some(session) = self.drag.as_mut() else {
            warn!("Drag move with no active drag; ignoring");
            return DragUpdate { display: self.layout.clone(), preview: None };
        };
        session.on_pointer_move(&self.grid, pointer, container_width);
        DragUpdate {
            display: session.display_layout(),
            preview: session.preview().cloned(),
        }
    }

    /// Ends the active drag and commits its outcome.
    ///
    /// A drag that never crossed the threshold leaves the layout untouched.
    /// When the last preview found space the previewed layout is committed
    /// and compacted. Otherwise the displayed position is snapped to the
    /// grid, bumped to the next free slot if that snap would overlap, and
    /// the result reflowed.
    pub fn on_drag_end(&mut self) -> &Layout {
        let Some(session) = self.drag.take() else {
            warn!("Drag end with no active drag; ignoring");
            return &self.layout;
        };
        if session.phase() == DragPhase::BelowThreshold {
            debug!("Drag end on {} below threshold; nothing moved", session.field());
            return &self.layout;
        }
        let field = session.field();
        let width = session.width();
        match session.preview() {
            Some(preview) if preview.has_space() => {
                debug!("Drag end on {field}: committing preview in row {}", preview.target_row);
                self.layout = preview.layout.clone();
                compact(&self.grid, &mut self.layout);
            }
            _ => {
                let snapped = self.grid.snap_position(session.display(), width);
                let target =
                    if would_overlap(&self.grid, snapped, width, session.origin(), Some(field)) {
                        let row = self.grid.resting_row_of_y(snapped.y);
                        find_next_available(&self.grid, width, session.origin(), Some(field), row)
                    } else {
                        snapped
                    };
                debug!("Drag end on {field}: placed at ({:.3}, {:.0})", target.x, target.y);
                self.layout = session.origin().clone();
                self.layout.insert(field, Placement::visible(target.x, target.y, width));
                reflow(&self.grid, &mut self.layout);
            }
        }
        &self.layout
    }

    /// Abandons the active drag, leaving the resting layout untouched.
    pub fn cancel_drag(&mut self) {
        if let Some(session) = self.drag.take() {
            debug!("Drag on {} cancelled", session.field());
        }
    }

    /// Feeds pointer travel from a resize handle on `field`.
    ///
    /// Returns the field's new width when the accumulated travel crosses a
    /// step threshold and the step can be applied. Ignored during a drag.
    pub fn on_resize_step(
        &mut self,
        field: FieldId,
        edge: ResizeEdge,
        delta_px: f64,
        container_width: f64,
    ) -> Option<MagneticWidth> {
        if self.drag.is_some() {
            warn!("Resize on {field} during an active drag; ignoring");
            return None;
        }
        self.resize.on_handle_drag(
            &self.grid,
            &mut self.layout,
            field,
            edge,
            delta_px,
            container_width,
        )
    }

    /// Discards pending resize travel. Call when a handle is released.
    pub fn on_resize_release(&mut self) {
        self.resize.reset();
    }

    /// Flips `field` between visible and hidden.
    ///
    /// Hiding vacates the field's cells and pulls later rows up. Showing
    /// places the field full width in the first row with no visible
    /// occupant, appending below the bottom row when none is free. Ignored
    /// during a drag or for an unknown field.
    pub fn on_field_visibility_toggle(&mut self, field: FieldId) -> &Layout {
        if self.drag.is_some() {
            warn!("Visibility toggle on {field} during an active drag; ignoring");
            return &self.layout;
        }
        match self.layout.get(field) {
            None => warn!("Visibility toggle on unknown {field}; ignoring"),
            Some(placement) if placement.is_visible() => {
                debug!("Hiding {field}");
                self.layout.insert(field, Placement::Hidden);
                reflow(&self.grid, &mut self.layout);
            }
            Some(_) => {
                let pos = find_next_available(&self.grid, 1.0, &self.layout, Some(field), 0);
                debug!("Showing {field} in row {}", self.grid.resting_row_of_y(pos.y));
                self.layout.insert(field, Placement::visible(pos.x, pos.y, 1.0));
            }
        }
        &self.layout
    }

    /// Current resting layout.
    pub fn layout(&self) -> &Layout { &self.layout }

    /// Grid geometry derived from the engine settings.
    pub fn grid(&self) -> &GridSpec { &self.grid }

    pub fn settings(&self) -> &EngineSettings { &self.settings }

    pub fn is_dragging(&self) -> bool { self.drag.is_some() }

    #[cfg(test)]
    pub(crate) fn dragged_field(&self) -> Option<FieldId> {
        self.drag.as_ref().map(|session| session.field())
    }
}
