//! Magnetic placement engine for drag-and-drop form grids.
//!
//! Fields rest on a six-column grid at one of four magnetic widths. The
//! engine owns the resting layout and turns pointer interactions (dragging,
//! edge resizing, visibility toggles) into committed layouts in which no two
//! fields share a cell. It is UI-free: hosts feed it pointer events and
//! render the layouts it hands back.

pub mod common;
pub mod grid_engine;
pub mod model;

pub use common::config::{
    DragSettings, EngineSettings, GridSettings, ResizeSettings, SettingsError,
};
pub use grid_engine::{
    DragUpdate, GridEngine, GridSpec, MagneticWidth, PlacementPreview, PreviewDecision, ResizeEdge,
};
pub use model::{FieldId, GridPos, Layout, Placement, PointerPos};
