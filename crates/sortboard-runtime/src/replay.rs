#![forbid(unsafe_code)]

//! Record live sessions and replay traces through a fresh session.
//!
//! # Invariants
//!
//! - Replaying a trace against the board it was recorded on reproduces the
//!   recorded session exactly: same outcomes, same versions, same final
//!   board. The session configuration is taken from the trace header.
//! - A [`RecordingSession`] writes an event before dispatching it, so a
//!   trace is complete up to the last event the session saw.

use std::io::{self, Write};
use std::time::Instant;

use sortboard_core::{Board, DragEvent, DragSession, Outcome, SessionConfig};

use crate::event_trace::{TraceFile, TraceWriter};
use crate::view::BoardView;

/// What a replay did.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    /// Events fed to the session.
    pub events: usize,
    /// Events that produced a new snapshot.
    pub replaced: usize,
    pub final_version: u64,
    pub board: Board,
}

/// Replay every event in `trace` against `initial`, rendering each new
/// snapshot into `view`.
///
/// The initial board is rendered first as version 0.
pub fn replay_trace(trace: &TraceFile, initial: Board, view: &mut impl BoardView) -> ReplayReport {
    let mut session = DragSession::new(initial, trace.config());
    view.render(session.version(), session.board());

    let mut events = 0;
    let mut replaced = 0;
    for (event, _ts) in trace.events() {
        events += 1;
        if let Outcome::Replaced { version, board } = session.dispatch(&event) {
            replaced += 1;
            view.render(version, &board);
        }
    }

    let final_version = session.version();
    if let Some(recorded) = trace.final_version().filter(|&v| v != final_version) {
        tracing::warn!(
            session = trace.session_name(),
            recorded,
            replayed = final_version,
            "replay diverged from recorded final version"
        );
    }
    tracing::debug!(
        session = trace.session_name(),
        events,
        replaced,
        final_version,
        "trace replayed"
    );

    ReplayReport {
        events,
        replaced,
        final_version,
        board: session.board().clone(),
    }
}

/// A [`DragSession`] that writes every dispatched event to a trace.
pub struct RecordingSession<W: Write> {
    session: DragSession,
    writer: TraceWriter<W>,
    started: Instant,
}

impl<W: Write> RecordingSession<W> {
    /// Start recording into `writer`; the trace header carries `config`.
    pub fn new(initial: Board, config: SessionConfig, writer: W, name: &str) -> io::Result<Self> {
        let writer = TraceWriter::from_writer(writer, name, &config)?;
        Ok(Self::from_trace_writer(initial, writer))
    }

    /// Record into an already opened trace (for example
    /// [`TraceWriter::gzip`]). The session runs with the header's config.
    #[must_use]
    pub fn from_trace_writer(initial: Board, writer: TraceWriter<W>) -> Self {
        Self {
            session: DragSession::new(initial, writer.config().clone()),
            writer,
            started: Instant::now(),
        }
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Record `event` stamped with the time since recording began, then dispatch it.
    pub fn dispatch(&mut self, event: &DragEvent) -> io::Result<Outcome> {
        let ts_ns = u64::try_from(self.started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.dispatch_at(event, ts_ns)
    }

    /// Record `event` with an explicit timestamp, then dispatch it.
    pub fn dispatch_at(&mut self, event: &DragEvent, ts_ns: u64) -> io::Result<Outcome> {
        self.writer.record(event, ts_ns)?;
        Ok(self.session.dispatch(event))
    }

    /// Write the summary and hand back the session and the underlying writer.
    pub fn finish(self) -> io::Result<(DragSession, W)> {
        let inner = self.writer.finish(Some(self.session.version()))?;
        Ok((self.session, inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_trace::TraceReader;
    use crate::view::TextView;
    use sortboard_core::{CancelPolicy, Delta};

    fn reference_board() -> Board {
        Board::builder()
            .column("Column1", "Column1")
            .card("Card1", "Card1")
            .card("Card2", "Card2")
            .column("Column2", "Column2")
            .card("Card3", "Card3")
            .card("Card4", "Card4")
            .build()
            .expect("valid board")
    }

    fn record(config: SessionConfig, events: &[DragEvent]) -> (DragSession, Vec<u8>) {
        let mut recording =
            RecordingSession::new(reference_board(), config, Vec::new(), "test").expect("start");
        for (i, event) in events.iter().enumerate() {
            recording
                .dispatch_at(event, (i as u64 + 1) * 1_000)
                .expect("record");
        }
        recording.finish().expect("finish")
    }

    #[test]
    fn replay_matches_recorded_session() {
        let events = [
            DragEvent::start("Card1"),
            DragEvent::over("Card1", Some("Card4"), Delta::new(0.0, -2.0)),
            DragEvent::end("Card1", Some("Card4")),
        ];
        let (live, bytes) = record(SessionConfig::default(), &events);

        let trace = TraceReader::from_bytes(&bytes).expect("read");
        assert_eq!(trace.final_version(), Some(live.version()));

        let mut view = TextView::new();
        let report = replay_trace(&trace, reference_board(), &mut view);
        assert_eq!(report.events, 3);
        assert_eq!(report.replaced, 2);
        assert_eq!(report.final_version, live.version());
        assert_eq!(&report.board, live.board());

        let texts: Vec<&str> = view.frames().iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec![
            "Column1: Card1, Card2\nColumn2: Card3, Card4\n",
            "Column1: Card2\nColumn2: Card3, Card1, Card4\n",
            "Column1: Card2\nColumn2: Card3, Card4, Card1\n",
        ]);
    }

    #[test]
    fn replay_uses_recorded_config() {
        let events = [
            DragEvent::start("Card1"),
            DragEvent::over("Card1", Some("Card3"), Delta::new(0.0, -1.0)),
            DragEvent::Cancel,
        ];
        let config = SessionConfig::default().with_cancel_policy(CancelPolicy::KeepPreview);
        let (live, bytes) = record(config, &events);
        assert_eq!(live.board().column(1).map(|c| c.len()), Some(3));

        let trace = TraceReader::from_bytes(&bytes).expect("read");
        let mut versions = Vec::new();
        let report = replay_trace(&trace, reference_board(), &mut |v: u64, _: &Board| {
            versions.push(v);
        });
        assert_eq!(&report.board, live.board());
        assert_eq!(report.replaced, 1);
        assert_eq!(versions, vec![0, 1]);
    }

    #[test]
    fn gzip_trace_writer_supplies_session_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("keep.jsonl.gz");
        let config = SessionConfig::default().with_cancel_policy(CancelPolicy::KeepPreview);
        let writer = TraceWriter::gzip(&path, "keep", &config).expect("create gzip writer");

        let mut recording = RecordingSession::from_trace_writer(reference_board(), writer);
        assert_eq!(recording.session().config(), &config);
        recording
            .dispatch_at(&DragEvent::over("Card2", Some("Card3"), Delta::default()), 5)
            .expect("record");
        recording.dispatch_at(&DragEvent::Cancel, 6).expect("record");
        let (live, encoder) = recording.finish().expect("finish");
        encoder.finish().expect("gzip trailer");

        let trace = TraceReader::open(&path).expect("open");
        assert_eq!(trace.config(), config);
        let report = replay_trace(&trace, reference_board(), &mut TextView::new());
        assert_eq!(&report.board, live.board());
        assert_eq!(report.final_version, 1);
    }

    #[test]
    fn recording_timestamps_are_monotonic() {
        let mut recording = RecordingSession::new(
            reference_board(),
            SessionConfig::default(),
            Vec::new(),
            "clock",
        )
        .expect("start");
        recording.dispatch(&DragEvent::start("Card2")).expect("dispatch");
        recording
            .dispatch(&DragEvent::end("Card2", Some("Card1")))
            .expect("dispatch");
        assert!(!recording.session().is_dragging());

        let (_, bytes) = recording.finish().expect("finish");
        let trace = TraceReader::from_bytes(&bytes).expect("read");
        let stamps: Vec<u64> = trace.events().map(|(_, ts)| ts).collect();
        assert_eq!(stamps.len(), 2);
        assert!(stamps[0] <= stamps[1]);
    }
}
