#![forbid(unsafe_code)]

//! Commit resolver: finalize a same-column reorder when the drag ends.
//!
//! Cross-column placement is already on the board by the time the gesture
//! ends (the last preview put it there), so only the same-column case does
//! any work here. The reorder follows array-move semantics: the card is
//! removed from its index and reinserted at the hovered card's index, so
//! everything in between shifts by one toward the vacated slot.

use crate::id::DragId;
use crate::locate::Target;
use crate::model::Board;

/// Resolve a drag-end event against `board`.
///
/// Returns the new snapshot, or `None` if either id is unresolvable, the
/// ids live in different columns, the active id is not a card, or both
/// resolve to the same index.
///
/// When `over` names the shared column itself (the pointer was released on
/// the column body), the card moves to the end of the column.
#[must_use]
pub fn resolve_commit(board: &Board, active: &DragId, over: Option<&DragId>) -> Option<Board> {
    let from = board.locate(Some(active))?;
    let to = board.locate(over)?;
    if from.column != to.column {
        tracing::trace!(active = %active, "commit skipped: cross-column drop already previewed");
        return None;
    }
    let Target::Card(active_index) = from.target else {
        return None;
    };

    let column = &board.columns()[from.column];
    let over_index = to.card_index().unwrap_or(column.len() - 1);
    if active_index == over_index {
        return None;
    }

    let mut cards = column.cards().to_vec();
    let card = cards.remove(active_index);
    cards.insert(over_index, card);

    tracing::debug!(
        card = %active,
        column = %column.id(),
        from = active_index,
        to = over_index,
        "commit reordered card"
    );

    Some(board.with_columns(&[(from.column, column.with_cards(cards))]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Card, Column};

    fn board() -> Board {
        Board::new([
            Column::new("Column1", "Column1", [Card::new("Card1", "Card1")]),
            Column::new(
                "Column2",
                "Column2",
                [
                    Card::new("Card3", "Card3"),
                    Card::new("Card4", "Card4"),
                    Card::new("Card5", "Card5"),
                    Card::new("Card6", "Card6"),
                ],
            ),
        ])
        .expect("valid board")
    }

    fn commit(board: &Board, active: &str, over: Option<&str>) -> Option<Board> {
        let over = over.map(DragId::from);
        resolve_commit(board, &active.into(), over.as_ref())
    }

    fn column2(board: &Board) -> Vec<&str> {
        board.columns()[1].card_ids().map(|id| id.as_str()).collect()
    }

    #[test]
    fn moves_down_shifting_between() {
        let next = commit(&board(), "Card3", Some("Card5")).expect("reordered");
        assert_eq!(column2(&next), ["Card4", "Card5", "Card3", "Card6"]);
    }

    #[test]
    fn moves_up_shifting_between() {
        let next = commit(&board(), "Card6", Some("Card4")).expect("reordered");
        assert_eq!(column2(&next), ["Card3", "Card6", "Card4", "Card5"]);
    }

    #[test]
    fn settled_card_does_not_move() {
        let next = commit(&board(), "Card3", Some("Card5")).expect("reordered");
        assert!(commit(&next, "Card3", Some("Card3")).is_none());
    }

    #[test]
    fn equal_indices_noop() {
        assert!(commit(&board(), "Card4", Some("Card4")).is_none());
    }

    #[test]
    fn cross_column_and_unresolvable_noop() {
        let board = board();
        assert!(commit(&board, "Card1", Some("Card4")).is_none());
        assert!(commit(&board, "Card1", None).is_none());
        assert!(commit(&board, "Ghost", Some("Card4")).is_none());
    }

    #[test]
    fn release_on_own_column_body_moves_to_end() {
        let next = commit(&board(), "Card4", Some("Column2")).expect("reordered");
        assert_eq!(column2(&next), ["Card3", "Card5", "Card6", "Card4"]);
        assert!(commit(&next, "Card4", Some("Column2")).is_none(), "already last");
    }

    #[test]
    fn other_columns_keep_their_slices() {
        let before = board();
        let next = commit(&before, "Card3", Some("Card5")).expect("reordered");
        assert!(next.columns()[0].shares_cards_with(&before.columns()[0]));
        assert_eq!(column2(&before), ["Card3", "Card4", "Card5", "Card6"]);
    }
}
