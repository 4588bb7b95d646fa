use serde::{Deserialize, Serialize};

use crate::common::collections::{BTreeMap, BTreeSet};
use crate::grid_engine::grid::GridSpec;
use crate::model::field::{FieldId, GridPos, Placement};

/// The placement of every field the engine manages, hidden ones included.
///
/// Keyed by `FieldId` in a `BTreeMap` so iteration order is deterministic.
/// Row membership and column spans are always derived from the stored
/// position and width; nothing here caches them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    fields: BTreeMap<FieldId, Placement>,
}

/// A visible field projected onto the columns of one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowOccupant {
    pub id: FieldId,
    pub start_column: usize,
    pub span: usize,
    /// Stored normalized width, before span bucketing.
    pub width: f64,
}

impl RowOccupant {
    /// Last column covered, inclusive.
    pub fn end_column(&self) -> usize { self.start_column + self.span - 1 }
}

impl Layout {
    pub fn new() -> Layout { Layout::default() }

    pub fn insert(&mut self, id: FieldId, placement: Placement) -> Option<Placement> {
        self.fields.insert(id, placement)
    }

    pub fn get(&self, id: FieldId) -> Option<Placement> { self.fields.get(&id).copied() }

    pub fn contains(&self, id: FieldId) -> bool { self.fields.contains_key(&id) }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, Placement)> + '_ {
        self.fields.iter().map(|(id, placement)| (*id, *placement))
    }

    pub fn visible(&self) -> impl Iterator<Item = (FieldId, GridPos, f64)> + '_ {
        self.iter().filter_map(|(id, placement)| {
            placement.visible_parts().map(|(pos, width)| (id, pos, width))
        })
    }

    /// Visible fields resting in `row`, sorted by start column. `exclude`
    /// drops one field from consideration, typically the one being moved.
    pub fn row_occupants(
        &self,
        grid: &GridSpec,
        row: usize,
        exclude: Option<FieldId>,
    ) -> Vec<RowOccupant> {
        let mut occupants: Vec<RowOccupant> = self
            .visible()
            .filter(|(id, _, _)| Some(*id) != exclude)
            .filter(|(_, pos, _)| grid.resting_row_of_y(pos.y) == row)
            .map(|(id, pos, width)| {
                let start_column = grid.column_of_x(pos.x);
                RowOccupant {
                    id,
                    start_column,
                    span: grid.actual_span(width, start_column),
                    width,
                }
            })
            .collect();
        occupants.sort_by_key(|occupant| occupant.start_column);
        occupants
    }

    /// Rows holding at least one visible field.
    pub fn occupied_rows(&self, grid: &GridSpec) -> BTreeSet<usize> {
        self.visible().map(|(_, pos, _)| grid.resting_row_of_y(pos.y)).collect()
    }

    /// Bottom-most occupied row, ignoring `exclude`. `None` when nothing is
    /// visible.
    pub fn max_occupied_row(&self, grid: &GridSpec, exclude: Option<FieldId>) -> Option<usize> {
        self.visible()
            .filter(|(id, _, _)| Some(*id) != exclude)
            .map(|(_, pos, _)| grid.resting_row_of_y(pos.y))
            .max()
    }
}

impl FromIterator<(FieldId, Placement)> for Layout {
    fn from_iter<T: IntoIterator<Item = (FieldId, Placement)>>(iter: T) -> Layout {
        Layout { fields: iter.into_iter().collect() }
    }
}
