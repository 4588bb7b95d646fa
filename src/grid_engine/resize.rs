//! Discrete-step resizing via edge handles.
//!
//! Pointer deltas accumulate per handle; each time the travel crosses the
//! configured fraction of the container width, the field steps one magnetic
//! width up or down. Steps that would leave the grid or cover a row-mate are
//! swallowed, so a resize can never break the layout.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::common::config::ResizeSettings;
use crate::model::{FieldId, GridPos, Layout, Placement};

use super::collision::would_overlap;
use super::grid::{GridSpec, MagneticWidth, TOTAL_COLUMNS};

/// Which side of the field the host grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeEdge {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct ResizeController {
    active: Option<(FieldId, ResizeEdge)>,
    accumulated: f64,
    config: ResizeSettings,
}

impl Default for ResizeController {
    fn default() -> Self { Self::new(ResizeSettings::default()) }
}

impl ResizeController {
    pub fn new(config: ResizeSettings) -> Self {
        Self { active: None, accumulated: 0.0, config }
    }

    /// Feeds one pointer delta (pixels) from a resize handle. Returns the new
    /// width when this delta completed a step; `None` while travel is still
    /// below the threshold or the step was swallowed.
    pub fn on_handle_drag(
        &mut self,
        grid: &GridSpec,
        layout: &mut Layout,
        field: FieldId,
        edge: ResizeEdge,
        delta_px: f64,
        container_width: f64,
    ) -> Option<MagneticWidth> {
        if self.active != Some((field, edge)) {
            self.active = Some((field, edge));
            self.accumulated = 0.0;
        }
        self.accumulated += delta_px;

        if container_width <= 0.0 {
            return None;
        }
        let threshold = self.config.step_fraction * container_width;
        if self.accumulated.abs() < threshold {
            return None;
        }
        // Crossing the threshold consumes the travel whether or not the step
        // lands; otherwise every following pixel would retrigger it.
        let travel = std::mem::replace(&mut self.accumulated, 0.0);

        let Some((pos, width)) = layout.get(field).and_then(|p| p.visible_parts()) else {
            warn!("Resize handle on {field} which is not visible; ignoring");
            return None;
        };

        let growing = match edge {
            ResizeEdge::Right => travel > 0.0,
            ResizeEdge::Left => travel < 0.0,
        };
        let current = MagneticWidth::nearest(width);
        let stepped = if growing { current.step_up() } else { current.step_down() };
        if stepped == current {
            return None;
        }

        let start_column = grid.column_of_x(pos.x);
        let right_boundary = start_column + grid.span_of_width(width);
        let new_start = match edge {
            ResizeEdge::Right => start_column,
            // The left handle moves the left edge; the right edge stays.
            ResizeEdge::Left => {
                let Some(start) = right_boundary.checked_sub(stepped.span()) else {
                    return None;
                };
                start
            }
        };
        if new_start + stepped.span() > TOTAL_COLUMNS {
            return None;
        }

        let candidate = GridPos::new(grid.column_to_x(new_start), pos.y);
        if would_overlap(grid, candidate, stepped.fraction(), layout, Some(field)) {
            return None;
        }

        debug!("Resize step on {field} ({edge:?}): {current} -> {stepped}");
        layout.insert(field, Placement::Visible { pos: candidate, width: stepped.fraction() });
        Some(stepped)
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.accumulated = 0.0;
    }

    pub fn active(&self) -> Option<(FieldId, ResizeEdge)> { self.active }
}
