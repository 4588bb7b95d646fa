use serde::{Deserialize, Serialize};

/// An identifier for a field managed by the engine.
///
/// Identifiers are assigned by the host (typically the index of the field in
/// its form definition) and are never reused within one layout.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u32);

impl FieldId {
    pub fn new(raw: u32) -> FieldId { FieldId(raw) }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// A resting position on the grid.
///
/// `x` is normalized to the container width (0.0 = left edge, 1.0 = right
/// edge). `y` is a pixel offset and is a whole multiple of the row height
/// whenever the layout is at rest.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: f64,
    pub y: f64,
}

impl GridPos {
    pub fn new(x: f64, y: f64) -> GridPos { GridPos { x, y } }
}

/// A raw pointer position in container pixels.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub fn new(x: f64, y: f64) -> PointerPos { PointerPos { x, y } }
}

/// Where one field currently sits.
///
/// A hidden field keeps its identity but holds no grid cell; it rejoins the
/// grid with a fresh [`Placement::Visible`] when re-shown.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Visible {
        pos: GridPos,
        /// Normalized width, a magnetic fraction of the container at rest.
        width: f64,
    },
    Hidden,
}

impl Placement {
    pub fn visible(x: f64, y: f64, width: f64) -> Placement {
        Placement::Visible { pos: GridPos { x, y }, width }
    }

    pub fn is_visible(&self) -> bool { matches!(self, Placement::Visible { .. }) }

    pub fn is_hidden(&self) -> bool { matches!(self, Placement::Hidden) }

    /// Position and width, when visible.
    pub fn visible_parts(&self) -> Option<(GridPos, f64)> {
        match *self {
            Placement::Visible { pos, width } => Some((pos, width)),
            Placement::Hidden => None,
        }
    }
}
