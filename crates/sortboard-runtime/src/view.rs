#![forbid(unsafe_code)]

//! Render-layer seam.
//!
//! A [`BoardView`] receives every snapshot a session publishes. Drawing is
//! the host's business; [`TextView`] is the plain-text renderer used by the
//! demo and by tests.
//!
//! # Invariants
//!
//! - Versions handed to a view are strictly increasing within one session.
//!   [`TextView`] drops any frame whose version is not newer than the last
//!   one it kept.

use std::fmt::Write as _;

use sortboard_core::Board;

/// Consumer of board snapshots.
pub trait BoardView {
    fn render(&mut self, version: u64, board: &Board);
}

impl<F> BoardView for F
where
    F: FnMut(u64, &Board),
{
    fn render(&mut self, version: u64, board: &Board) {
        self(version, board);
    }
}

/// Render a board as one line per column: `Title: card, card`.
///
/// Empty columns render as `Title: (empty)`.
#[must_use]
pub fn render_text(board: &Board) -> String {
    let mut out = String::new();
    for column in board.columns() {
        let _ = write!(out, "{}: ", column.title());
        if column.is_empty() {
            out.push_str("(empty)");
        } else {
            for (i, card) in column.cards().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&card.title);
            }
        }
        out.push('\n');
    }
    out
}

/// A rendered snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub version: u64,
    pub text: String,
}

/// Keeps every rendered frame as plain text.
#[derive(Debug, Clone, Default)]
pub struct TextView {
    frames: Vec<Frame>,
}

impl TextView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[must_use]
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Take the accumulated frames, leaving the view empty.
    pub fn take_frames(&mut self) -> Vec<Frame> {
        std::mem::take(&mut self.frames)
    }
}

impl BoardView for TextView {
    fn render(&mut self, version: u64, board: &Board) {
        if self.frames.last().is_some_and(|f| f.version >= version) {
            tracing::trace!(version, "stale frame dropped");
            return;
        }
        self.frames.push(Frame {
            version,
            text: render_text(board),
        });
    }
}
