#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sortboard_core::{
    Board, CancelPolicy, Card, Column, Delta, DragEvent, DragId, DragSession, SessionConfig,
};

#[derive(Debug, Arbitrary)]
enum FuzzEvent {
    Start(u8),
    Over(u8, Option<u8>, i16),
    End(u8, Option<u8>),
    Cancel,
}

#[derive(Debug, Arbitrary)]
struct Input {
    /// Owning column (mod column count) for each card.
    owners: Vec<u8>,
    columns: u8,
    keep_preview: bool,
    threshold: u8,
    lazy_start: bool,
    events: Vec<FuzzEvent>,
}

/// Even values name cards, odd values name columns; out-of-range ids stay unresolvable.
fn id(n: u8) -> DragId {
    if n % 2 == 0 {
        DragId::from(format!("card-{}", n / 2))
    } else {
        DragId::from(format!("col-{}", n / 2))
    }
}

fn event(e: &FuzzEvent) -> DragEvent {
    match *e {
        FuzzEvent::Start(a) => DragEvent::Start { active: id(a) },
        FuzzEvent::Over(a, over, dy) => DragEvent::Over {
            active: id(a),
            over: over.map(id),
            delta: Delta::new(0.0, f64::from(dy)),
        },
        FuzzEvent::End(a, over) => DragEvent::End {
            active: id(a),
            over: over.map(id),
        },
        FuzzEvent::Cancel => DragEvent::Cancel,
    }
}

fn sorted_ids(board: &Board) -> Vec<String> {
    let mut ids: Vec<String> = board.card_ids().map(ToString::to_string).collect();
    ids.sort();
    ids
}

fuzz_target!(|input: Input| {
    let columns = usize::from(input.columns % 8) + 1;
    let mut cards: Vec<Vec<Card>> = vec![Vec::new(); columns];
    for (n, owner) in input.owners.iter().take(64).enumerate() {
        cards[usize::from(*owner) % columns].push(Card::new(format!("card-{n}"), "card"));
    }
    let board = Board::new(
        cards
            .into_iter()
            .enumerate()
            .map(|(i, cards)| Column::new(format!("col-{i}"), "column", cards)),
    )
    .expect("generated ids are unique");

    let policy = if input.keep_preview {
        CancelPolicy::KeepPreview
    } else {
        CancelPolicy::Revert
    };
    let config = SessionConfig::default()
        .with_cancel_policy(policy)
        .with_append_threshold(f64::from(input.threshold))
        .with_lazy_gesture_start(input.lazy_start);

    let expected = sorted_ids(&board);
    let mut session = DragSession::new(board, config);
    let mut last_version = 0;

    for e in input.events.iter().take(256) {
        session.dispatch(&event(e));

        // Post-conditions that must always hold:
        assert_eq!(sorted_ids(session.board()), expected, "card set changed");
        assert!(session.board().validate().is_ok(), "ownership broken");
        assert_eq!(session.board().columns().len(), columns, "column count changed");
        assert!(session.version() >= last_version, "version went backwards");
        last_version = session.version();
    }
});
