#![forbid(unsafe_code)]

//! Runtime: drives a [`DragSession`](sortboard_core::DragSession) from
//! recorded or live event streams and hands snapshots to a render layer.
//!
//! # Modules
//! - [`event_trace`]: JSONL drag-event traces (optionally gzip-compressed).
//! - [`replay`]: feed a trace through a session and collect every outcome.
//! - [`view`]: the [`BoardView`] seam plus a plain-text renderer.

pub mod event_trace;
pub mod replay;
pub mod view;

pub use event_trace::{TraceError, TraceFile, TraceReader, TraceRecord, TraceWriter};
pub use replay::{ReplayReport, RecordingSession, replay_trace};
pub use view::{BoardView, Frame, TextView, render_text};
