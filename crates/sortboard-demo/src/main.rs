#![forbid(unsafe_code)]

//! SortBoard demo.
//!
//! Seeds the two-column reference board, drives a scripted pair of drag
//! gestures through a session, and prints every rendered snapshot.
//!
//! # Running
//!
//! ```sh
//! cargo run -p sortboard-demo                          # scripted gestures
//! cargo run -p sortboard-demo -- --record drag.jsonl.gz
//! cargo run -p sortboard-demo -- --replay drag.jsonl.gz
//! RUST_LOG=sortboard_core=debug cargo run -p sortboard-demo
//! ```
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Runtime failure (board construction or trace I/O) |
//! | 2 | Bad command line (reported by clap) |

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use sortboard_core::{Board, BoardModelError, Delta, DragEvent, SessionConfig};
use sortboard_runtime::{
    BoardView, RecordingSession, TextView, TraceReader, TraceWriter, replay_trace,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Drive drag gestures over the reference board and print every snapshot.
#[derive(Debug, Parser)]
#[command(name = "sortboard-demo", version, about)]
#[command(group(ArgGroup::new("mode").args(["record", "replay"])))]
struct Cli {
    /// Record the scripted gestures to PATH (gzip when it ends in `.gz`)
    #[arg(long, value_name = "PATH")]
    record: Option<PathBuf>,

    /// Replay a recorded trace instead of the scripted gestures
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

/// Column1 = [Card1, Card2], Column2 = [Card3, Card4, Card5, Card6].
fn reference_board() -> Result<Board, BoardModelError> {
    Board::builder()
        .column("Column1", "Column1")
        .card("Card1", "Card1")
        .card("Card2", "Card2")
        .column("Column2", "Column2")
        .card("Card3", "Card3")
        .card("Card4", "Card4")
        .card("Card5", "Card5")
        .card("Card6", "Card6")
        .build()
}

/// Move Card1 above Card4 in the other column, then reorder Card3 behind Card5.
fn script() -> Vec<DragEvent> {
    vec![
        DragEvent::start("Card1"),
        DragEvent::over("Card1", Some("Card4"), Delta::new(0.0, -6.0)),
        DragEvent::end("Card1", Some("Card1")),
        DragEvent::start("Card3"),
        DragEvent::over("Card3", Some("Card5"), Delta::new(0.0, 12.0)),
        DragEvent::end("Card3", Some("Card5")),
    ]
}

fn print_frames(view: &TextView) {
    for frame in view.frames() {
        println!("-- version {} --", frame.version);
        print!("{}", frame.text);
    }
}

fn record_script<W: Write>(
    initial: Board,
    writer: TraceWriter<W>,
    view: &mut TextView,
) -> io::Result<W> {
    let mut recording = RecordingSession::from_trace_writer(initial, writer);
    view.render(0, recording.session().board());
    for event in script() {
        if let Some(board) = recording.dispatch(&event)?.board() {
            view.render(recording.session().version(), board);
        }
    }
    let (session, writer) = recording.finish()?;
    tracing::info!(version = session.version(), "scripted gestures recorded");
    Ok(writer)
}

fn record_to(initial: Board, path: &Path, view: &mut TextView) -> io::Result<()> {
    let config = SessionConfig::default();
    if path.extension().is_some_and(|ext| ext == "gz") {
        let writer = TraceWriter::gzip(path, "demo", &config)?;
        record_script(initial, writer, view)?.finish()?;
    } else {
        let writer = TraceWriter::plain(path, "demo", &config)?;
        record_script(initial, writer, view)?.sync_all()?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let initial = reference_board()?;
    let mut view = TextView::new();
    match (cli.record, cli.replay) {
        (Some(path), _) => {
            record_to(initial, &path, &mut view)?;
            tracing::info!(path = %path.display(), "trace written");
        }
        (None, Some(path)) => {
            let trace = TraceReader::open(&path)?;
            let report = replay_trace(&trace, initial, &mut view);
            tracing::info!(
                session = trace.session_name(),
                events = report.events,
                replaced = report.replaced,
                "trace replayed"
            );
        }
        (None, None) => {
            let writer = TraceWriter::from_writer(io::sink(), "demo", &SessionConfig::default())?;
            record_script(initial, writer, &mut view)?;
        }
    }
    print_frames(&view);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "sortboard-demo failed");
            ExitCode::from(1)
        }
    }
}
