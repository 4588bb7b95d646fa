pub mod collision;
pub mod compaction;
pub mod drag;
pub mod engine;
pub mod grid;
pub mod preview;
pub mod resize;

pub use collision::{find_next_available, would_overlap};
pub use compaction::{compact, fill_gaps, reflow};
pub use drag::{DragPhase, DragSession};
pub use engine::{DragUpdate, GridEngine};
pub use grid::{GridSpec, MAX_ROWS, MagneticWidth, TOTAL_COLUMNS, WIDTH_EPSILON};
pub use preview::{PlacementPreview, PreviewDecision, compute_preview};
pub use resize::{ResizeController, ResizeEdge};

#[cfg(test)]
mod tests;
