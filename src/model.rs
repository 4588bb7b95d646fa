pub mod field;
pub mod layout;

pub use field::{FieldId, GridPos, Placement, PointerPos};
pub use layout::{Layout, RowOccupant};
