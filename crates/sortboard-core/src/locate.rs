#![forbid(unsafe_code)]

//! Identifier locator: which column does an opaque drag id belong to?
//!
//! The lookup always runs against the snapshot it is handed. Within one
//! gesture the board changes between events, so callers must pass the
//! *current* board, never one captured at drag start.

use crate::id::DragId;
use crate::model::Board;

/// What the drag id named inside the located column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The id is the column's own id (e.g. hovering an empty column).
    Column,
    /// The id is a card at this index.
    Card(usize),
}

/// Result of a successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Index of the owning column in [`Board::columns`].
    pub column: usize,
    pub target: Target,
}

impl Location {
    /// The card index, or `None` when the id named the column itself.
    #[inline]
    #[must_use]
    pub const fn card_index(self) -> Option<usize> {
        match self.target {
            Target::Column => None,
            Target::Card(index) => Some(index),
        }
    }
}

/// Resolve `id` to its owning column.
///
/// Column ids win over card ids; otherwise every column's cards are scanned.
/// `None` in, `None` out, and an id nobody owns is also `None`.
#[must_use]
pub fn locate(board: &Board, id: Option<&DragId>) -> Option<Location> {
    let id = id?;

    if let Some(column) = board
        .columns()
        .iter()
        .position(|column| id.names_column(column.id()))
    {
        return Some(Location {
            column,
            target: Target::Column,
        });
    }

    board
        .columns()
        .iter()
        .enumerate()
        .find_map(|(column, cards)| {
            cards.position(id).map(|index| Location {
                column,
                target: Target::Card(index),
            })
        })
}
