#![no_main]

use libfuzzer_sys::fuzz_target;
use sortboard_core::Board;
use sortboard_runtime::{TraceReader, replay_trace};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must load or fail cleanly, never panic.
    let Ok(trace) = TraceReader::from_bytes(data) else {
        return;
    };

    // Whatever parsed must replay without panicking, even on an empty board.
    let report = replay_trace(&trace, Board::empty(), &mut |_: u64, _: &Board| {});
    assert_eq!(report.events, trace.events().count());
    assert_eq!(report.board.card_count(), 0);
});
