#![forbid(unsafe_code)]

//! Preview resolver: speculative cross-column moves while a card is dragged.
//!
//! A gesture fires a drag-over event every time the hovered target changes,
//! often many times in a row with the same payload. The resolver therefore
//! re-derives the arrangement from the current snapshot and the current event
//! on every call and never carries state between calls. Applying the same
//! event twice is the same as applying it once: after the first call the
//! active card already lives in the hovered column, so the second call hits
//! the same-column branch and does nothing.
//!
//! # Insertion rule
//!
//! | hovered target                         | insert at          |
//! |----------------------------------------|--------------------|
//! | last card, pointer moving down         | after it (`i + 1`) |
//! | any other card `i`                     | before it (`i`)    |
//! | the column itself (empty area)         | end of the column  |
//!
//! Same-column hovering is not previewed; the commit resolver
//! handles it when the gesture ends.

use crate::id::DragId;
use crate::locate::{Location, Target};
use crate::model::Board;

/// Insertion index in the hovered column.
///
/// `over_index` is `None` when the pointer is over the column body rather than
/// a card. `delta_y` must exceed `append_threshold` for a hover on the last
/// card to append after it.
#[must_use]
pub fn insertion_index(
    over_index: Option<usize>,
    over_len: usize,
    delta_y: f64,
    append_threshold: f64,
) -> usize {
    match over_index {
        Some(index) if index + 1 == over_len && delta_y > append_threshold => index + 1,
        Some(index) => index,
        None => over_len,
    }
}

/// Resolve a drag-over event against `board`.
///
/// Returns the new snapshot, or `None` when the event changes nothing:
/// either id is unresolvable, the active id is not a card, or both ids live
/// in the same column.
#[must_use]
pub fn resolve_preview(
    board: &Board,
    active: &DragId,
    over: Option<&DragId>,
    delta_y: f64,
    append_threshold: f64,
) -> Option<Board> {
    let Some(from) = board.locate(Some(active)) else {
        tracing::trace!(active = %active, "preview skipped: active id not on board");
        return None;
    };
    let Some(to) = board.locate(over) else {
        tracing::trace!(active = %active, "preview skipped: nothing resolvable under pointer");
        return None;
    };
    if from.column == to.column {
        return None;
    }
    let Target::Card(active_index) = from.target else {
        tracing::trace!(active = %active, "preview skipped: active id names a column");
        return None;
    };

    Some(move_across(board, from.column, active_index, to, delta_y, append_threshold))
}

fn move_across(
    board: &Board,
    from_column: usize,
    active_index: usize,
    to: Location,
    delta_y: f64,
    append_threshold: f64,
) -> Board {
    let source = &board.columns()[from_column];
    let dest = &board.columns()[to.column];
    let target = insertion_index(to.card_index(), dest.len(), delta_y, append_threshold);

    let moving = source.cards()[active_index].clone();
    let remaining: Vec<_> = source
        .cards()
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != active_index)
        .map(|(_, card)| card.clone())
        .collect();

    let mut received = Vec::with_capacity(dest.len() + 1);
    received.extend_from_slice(&dest.cards()[..target]);
    received.push(moving);
    received.extend_from_slice(&dest.cards()[target..]);

    tracing::debug!(
        card = %source.cards()[active_index].id,
        from = %source.id(),
        to = %dest.id(),
        index = target,
        "preview moved card across columns"
    );

    board.with_columns(&[
        (from_column, source.with_cards(remaining)),
        (to.column, dest.with_cards(received)),
    ])
}
