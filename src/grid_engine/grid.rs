//! Grid coordinate model.
//!
//! Horizontal positions are normalized fractions of the container width laid
//! over a fixed six-column grid. Vertical positions are pixel offsets in
//! whole rows. Everything here is pure math over those two axes; no layout
//! state lives in this module.

use serde::{Deserialize, Serialize};

use crate::common::config::GridSettings;

/// Number of columns in the grid. Field spans are counted in these.
pub const TOTAL_COLUMNS: usize = 6;

/// Maximum addressable rows. Placement scans stop here; the append-below
/// fallback may exceed it temporarily until a reflow pulls rows back up.
pub const MAX_ROWS: usize = 12;

/// Slack added to width breakpoints so float drift on a stored magnetic
/// width never reclassifies it into the next span bucket.
pub const WIDTH_EPSILON: f64 = 0.001;

/// The four widths a field may rest at, as spans of the six-column grid.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum MagneticWidth {
    /// 2 of 6 columns.
    Third,
    /// 3 of 6 columns.
    Half,
    /// 4 of 6 columns.
    TwoThirds,
    /// All 6 columns.
    Full,
}

static_assertions::const_assert_eq!(MagneticWidth::Full.span(), TOTAL_COLUMNS);

impl MagneticWidth {
    pub const fn span(self) -> usize {
        match self {
            MagneticWidth::Third => 2,
            MagneticWidth::Half => 3,
            MagneticWidth::TwoThirds => 4,
            MagneticWidth::Full => 6,
        }
    }

    pub fn fraction(self) -> f64 { self.span() as f64 / TOTAL_COLUMNS as f64 }

    /// Classifies an arbitrary width into its span bucket.
    ///
    /// The breakpoints are deliberately asymmetric: each magnetic width owns
    /// everything at or below itself (plus epsilon), so a width sitting
    /// between two stops resolves to the larger one. There is no 5/6 stop;
    /// anything above 4/6 + epsilon is full width.
    pub fn nearest(width: f64) -> MagneticWidth {
        if width <= 2.0 / 6.0 + WIDTH_EPSILON {
            MagneticWidth::Third
        } else if width <= 3.0 / 6.0 + WIDTH_EPSILON {
            MagneticWidth::Half
        } else if width <= 4.0 / 6.0 + WIDTH_EPSILON {
            MagneticWidth::TwoThirds
        } else {
            MagneticWidth::Full
        }
    }

    /// Largest magnetic width spanning at most `columns`, if any fits.
    pub fn largest_fitting(columns: usize) -> Option<MagneticWidth> {
        match columns {
            0 | 1 => None,
            2 => Some(MagneticWidth::Third),
            3 => Some(MagneticWidth::Half),
            4 | 5 => Some(MagneticWidth::TwoThirds),
            _ => Some(MagneticWidth::Full),
        }
    }

    pub fn step_up(self) -> MagneticWidth {
        match self {
            MagneticWidth::Third => MagneticWidth::Half,
            MagneticWidth::Half => MagneticWidth::TwoThirds,
            MagneticWidth::TwoThirds | MagneticWidth::Full => MagneticWidth::Full,
        }
    }

    pub fn step_down(self) -> MagneticWidth {
        match self {
            MagneticWidth::Full => MagneticWidth::TwoThirds,
            MagneticWidth::TwoThirds => MagneticWidth::Half,
            MagneticWidth::Half | MagneticWidth::Third => MagneticWidth::Third,
        }
    }
}

impl std::fmt::Display for MagneticWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.span(), TOTAL_COLUMNS)
    }
}

/// Pure coordinate conversions for one grid instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    row_height: f64,
    snap_threshold: f64,
}

impl GridSpec {
    pub fn new(settings: &GridSettings) -> GridSpec {
        GridSpec {
            row_height: settings.row_height,
            snap_threshold: settings.snap_threshold,
        }
    }

    pub fn row_height(&self) -> f64 { self.row_height }

    /// Row index of a pointer-derived pixel offset, rounded to the nearest
    /// row and clamped to the addressable range.
    pub fn row_of_y(&self, y: f64) -> usize {
        (y / self.row_height).round().clamp(0.0, (MAX_ROWS - 1) as f64) as usize
    }

    /// Row index of a stored placement. Not clamped above, because the
    /// append-below fallback can rest a field past the last addressable row
    /// and that row must stay distinct from `MAX_ROWS - 1`.
    pub fn resting_row_of_y(&self, y: f64) -> usize {
        (y / self.row_height).round().max(0.0) as usize
    }

    pub fn y_of_row(&self, row: usize) -> f64 { row as f64 * self.row_height }

    /// Column index containing a normalized x offset, clamped so `x = 1.0`
    /// lands in the last column rather than one past it.
    pub fn column_of_x(&self, x: f64) -> usize {
        (x * TOTAL_COLUMNS as f64).floor().clamp(0.0, (TOTAL_COLUMNS - 1) as f64) as usize
    }

    pub fn column_to_x(&self, column: usize) -> f64 { column as f64 / TOTAL_COLUMNS as f64 }

    /// Column span occupied by a field of the given normalized width.
    pub fn span_of_width(&self, width: f64) -> usize { MagneticWidth::nearest(width).span() }

    /// Span actually occupied when the field starts at `start_column`; a
    /// field overhanging the right edge occupies only the columns that exist.
    pub fn actual_span(&self, width: f64, start_column: usize) -> usize {
        self.span_of_width(width).min(TOTAL_COLUMNS - start_column.min(TOTAL_COLUMNS))
    }

    /// Snaps a displayed position to the nearest legal resting cell for a
    /// field of the given width: nearest column boundary the span still fits
    /// at, nearest row boundary within the addressable range.
    pub fn snap_position(&self, pos: crate::model::GridPos, width: f64) -> crate::model::GridPos {
        let span = self.span_of_width(width);
        let max_start = (TOTAL_COLUMNS - span) as f64;
        let column = (pos.x * TOTAL_COLUMNS as f64).round().clamp(0.0, max_start) as usize;
        let row = self.row_of_y(pos.y);
        crate::model::GridPos::new(self.column_to_x(column), self.y_of_row(row))
    }

    /// Column boundary (0..=6) within `snap_threshold` pixels of `x_px`, for
    /// hosts that draw snap guides while a field is dragged. `None` when the
    /// pointer is between boundaries or the container has no width.
    pub fn nearest_column_boundary(&self, x_px: f64, container_width: f64) -> Option<usize> {
        if container_width <= 0.0 {
            return None;
        }
        let column_width = container_width / TOTAL_COLUMNS as f64;
        let boundary = (x_px / column_width).round().clamp(0.0, TOTAL_COLUMNS as f64) as usize;
        let distance = (x_px - boundary as f64 * column_width).abs();
        (distance <= self.snap_threshold).then_some(boundary)
    }
}

impl Default for GridSpec {
    fn default() -> Self { GridSpec::new(&GridSettings::default()) }
}
