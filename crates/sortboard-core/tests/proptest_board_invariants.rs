//! Property-based invariant tests for drag resolution.
//!
//! These tests verify structural invariants that must hold for any event
//! sequence on any valid board:
//!
//! 1. Set invariance: the multiset of card ids never changes.
//! 2. Single ownership: no card id appears in two columns.
//! 3. Column identity (id, title, order) never changes.
//! 4. Preview idempotence: the same drag-over twice equals once.
//! 5. Commit lands the active card on the hovered index, after which it is settled.
//! 6. Revert cancel restores the pre-gesture board exactly.
//! 7. No panics on arbitrary (including unresolvable) ids.

use proptest::prelude::*;
use sortboard_core::{
    Board, CancelPolicy, Card, Column, Delta, DragEvent, DragId, DragSession, Outcome,
    SessionConfig, resolve_commit, resolve_preview,
};

// ── Strategies ──────────────────────────────────────────────────────────

/// A board with 1..=5 columns and 0..=12 cards spread over them.
fn board_strategy() -> impl Strategy<Value = Board> {
    (1usize..=5, prop::collection::vec(0usize..5, 0..=12)).prop_map(|(columns, owners)| {
        let mut cards: Vec<Vec<Card>> = vec![Vec::new(); columns];
        for (n, owner) in owners.into_iter().enumerate() {
            cards[owner % columns].push(Card::new(format!("card-{n}"), format!("Card {n}")));
        }
        Board::new(
            cards
                .into_iter()
                .enumerate()
                .map(|(i, cards)| Column::new(format!("col-{i}"), format!("Column {i}"), cards)),
        )
        .expect("generated ids are unique")
    })
}

/// Ids drawn from a pool that includes cards, columns, and strangers.
fn id_strategy() -> impl Strategy<Value = DragId> {
    prop_oneof![
        (0usize..14).prop_map(|n| DragId::from(format!("card-{n}"))),
        (0usize..6).prop_map(|n| DragId::from(format!("col-{n}"))),
        Just(DragId::from("stranger")),
    ]
}

fn event_strategy() -> impl Strategy<Value = DragEvent> {
    prop_oneof![
        id_strategy().prop_map(|active| DragEvent::Start { active }),
        (
            id_strategy(),
            prop::option::of(id_strategy()),
            -20.0f64..20.0
        )
            .prop_map(|(active, over, dy)| DragEvent::Over {
                active,
                over,
                delta: Delta::new(0.0, dy),
            }),
        (id_strategy(), prop::option::of(id_strategy()))
            .prop_map(|(active, over)| DragEvent::End { active, over }),
        Just(DragEvent::Cancel),
    ]
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn sorted_card_ids(board: &Board) -> Vec<String> {
    let mut ids: Vec<String> = board.card_ids().map(ToString::to_string).collect();
    ids.sort();
    ids
}

fn column_identity(board: &Board) -> Vec<(String, String)> {
    board
        .columns()
        .iter()
        .map(|c| (c.id().to_string(), c.title().to_string()))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// 1–3. Set invariance, single ownership, column identity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_event_sequences_preserve_invariants(
        board in board_strategy(),
        events in prop::collection::vec(event_strategy(), 0..60),
    ) {
        let expected_ids = sorted_card_ids(&board);
        let expected_columns = column_identity(&board);
        let mut session = DragSession::with_default_config(board);

        for event in &events {
            session.dispatch(event);
            prop_assert_eq!(sorted_card_ids(session.board()), expected_ids.clone());
            prop_assert!(
                session.board().validate().is_ok(),
                "single ownership violated after {:?}", event
            );
            prop_assert_eq!(column_identity(session.board()), expected_columns.clone());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4–5. Idempotence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn preview_twice_equals_once(
        board in board_strategy(),
        active in id_strategy(),
        over in prop::option::of(id_strategy()),
        dy in -20.0f64..20.0,
    ) {
        let once = resolve_preview(&board, &active, over.as_ref(), dy, 0.0)
            .unwrap_or_else(|| board.clone());
        let twice = resolve_preview(&once, &active, over.as_ref(), dy, 0.0)
            .unwrap_or_else(|| once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn commit_lands_on_over_index_then_settles(
        board in board_strategy(),
        active in id_strategy(),
        over in prop::option::of(id_strategy()),
    ) {
        if let Some(once) = resolve_commit(&board, &active, over.as_ref()) {
            let before = board.locate(over.as_ref()).expect("over resolved");
            let column = &board.columns()[before.column];
            let target = before.card_index().unwrap_or(column.len() - 1);
            let after = once.locate(Some(&active)).expect("active still on board");
            prop_assert_eq!(after.column, before.column);
            prop_assert_eq!(after.card_index(), Some(target));

            // Re-resolved against the new board, active and its slot coincide.
            prop_assert!(resolve_commit(&once, &active, Some(&active)).is_none());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Revert cancel
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn revert_cancel_restores_origin(
        board in board_strategy(),
        active in id_strategy(),
        hovers in prop::collection::vec(
            (prop::option::of(id_strategy()), -20.0f64..20.0),
            0..20,
        ),
    ) {
        let config = SessionConfig::default().with_cancel_policy(CancelPolicy::Revert);
        let mut session = DragSession::new(board.clone(), config);
        session.dispatch(&DragEvent::Start { active: active.clone() });
        for (over, dy) in hovers {
            session.dispatch(&DragEvent::Over {
                active: active.clone(),
                over,
                delta: Delta::new(0.0, dy),
            });
        }
        session.dispatch(&DragEvent::Cancel);
        prop_assert_eq!(session.board(), &board);
        prop_assert!(!session.is_dragging());
    }

    #[test]
    fn version_counts_replacements(
        board in board_strategy(),
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        let mut session = DragSession::with_default_config(board);
        let mut replaced = 0u64;
        for event in &events {
            if let Outcome::Replaced { version, .. } = session.dispatch(event) {
                replaced += 1;
                prop_assert_eq!(version, replaced);
            }
        }
        prop_assert_eq!(session.version(), replaced);
    }
}
