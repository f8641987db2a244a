#![forbid(unsafe_code)]

//! Drag session: routes drag events to the resolvers and owns the board.
//!
//! [`DragSession`] is the single entry point a host feeds its drag events
//! into. It tracks the gesture lifecycle so that a cancel can restore the
//! board as it was before the card was picked up.
//!
//! # State Machine
//!
//! ```text
//!            Start / Over (lazy)            End / Cancel
//!   Idle ───────────────────────▶ Dragging ─────────────▶ Idle
//!                                   │   ▲
//!                                   └───┘ Over (preview)
//! ```
//!
//! `Dragging` remembers the pre-gesture snapshot. Because snapshots are
//! immutable and cheap to clone, holding it costs one reference count.
//!
//! # Failure Modes
//!
//! - `End` or `Cancel` while idle is ignored and logged at debug level.
//! - A `Start` during a gesture begins a new gesture from the current board;
//!   the previous gesture's preview is kept.
//! - Ids that do not resolve are dropped silently (see the resolvers).

use crate::commit::resolve_commit;
use crate::config::{CancelPolicy, SessionConfig};
use crate::event::{Delta, DragEvent};
use crate::id::DragId;
use crate::model::Board;
use crate::preview::resolve_preview;
use crate::state::BoardState;

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The board did not change.
    Unchanged,
    /// A new snapshot replaced the board; render it.
    Replaced { version: u64, board: Board },
}

impl Outcome {
    #[inline]
    #[must_use]
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }

    /// The new board, if one was produced.
    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        match self {
            Self::Replaced { board, .. } => Some(board),
            Self::Unchanged => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Dragging { active: DragId, origin: Board },
}

/// Board state plus the drag gesture currently in flight.
#[derive(Debug, Clone)]
pub struct DragSession {
    state: BoardState,
    config: SessionConfig,
    phase: Phase,
}

impl DragSession {
    #[must_use]
    pub fn new(initial: Board, config: SessionConfig) -> Self {
        Self {
            state: BoardState::new(initial),
            config,
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn with_default_config(initial: Board) -> Self {
        Self::new(initial, SessionConfig::default())
    }

    /// Current board snapshot.
    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        self.state.current()
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// The card being dragged, if a gesture is in flight.
    #[must_use]
    pub fn active(&self) -> Option<&DragId> {
        match &self.phase {
            Phase::Dragging { active, .. } => Some(active),
            Phase::Idle => None,
        }
    }

    /// Feed one event through the session.
    pub fn dispatch(&mut self, event: &DragEvent) -> Outcome {
        let _span = tracing::debug_span!(
            "drag_event",
            kind = event.kind(),
            version = self.state.version()
        )
        .entered();

        match event {
            DragEvent::Start { active } => self.start(active),
            DragEvent::Over {
                active,
                over,
                delta,
            } => self.over(active, over.as_ref(), *delta),
            DragEvent::End { active, over } => self.end(active, over.as_ref()),
            DragEvent::Cancel => self.cancel(),
        }
    }

    /// Begin a gesture, remembering the current board for cancellation.
    pub fn start(&mut self, active: &DragId) -> Outcome {
        if let Phase::Dragging { active: previous, .. } = &self.phase {
            tracing::debug!(previous = %previous, active = %active, "start during gesture; restarting");
        }
        self.phase = Phase::Dragging {
            active: active.clone(),
            origin: self.state.snapshot(),
        };
        Outcome::Unchanged
    }

    /// Preview a hover. Re-derived from the current board on every call.
    pub fn over(&mut self, active: &DragId, over: Option<&DragId>, delta: Delta) -> Outcome {
        if !self.is_dragging() {
            if !self.config.lazy_gesture_start {
                tracing::debug!(active = %active, "over outside a gesture ignored");
                return Outcome::Unchanged;
            }
            self.start(active);
        }

        let next = resolve_preview(
            self.state.current(),
            active,
            over,
            delta.y,
            self.config.append_threshold(),
        );
        self.apply(next)
    }

    /// Finish the gesture, committing a same-column reorder if there is one.
    pub fn end(&mut self, active: &DragId, over: Option<&DragId>) -> Outcome {
        if matches!(self.phase, Phase::Idle) {
            tracing::debug!(active = %active, "end outside a gesture ignored");
            return Outcome::Unchanged;
        }
        self.phase = Phase::Idle;
        let next = resolve_commit(self.state.current(), active, over);
        self.apply(next)
    }

    /// Abandon the gesture according to [`SessionConfig::cancel_policy`].
    pub fn cancel(&mut self) -> Outcome {
        let Phase::Dragging { origin, active } = std::mem::replace(&mut self.phase, Phase::Idle)
        else {
            tracing::debug!("cancel outside a gesture ignored");
            return Outcome::Unchanged;
        };

        match self.config.cancel_policy {
            CancelPolicy::KeepPreview => Outcome::Unchanged,
            CancelPolicy::Revert if origin.same_snapshot(self.state.current()) => {
                Outcome::Unchanged
            }
            CancelPolicy::Revert => {
                tracing::debug!(active = %active, "cancel reverted board to pre-gesture snapshot");
                self.apply(Some(origin))
            }
        }
    }

    fn apply(&mut self, next: Option<Board>) -> Outcome {
        match next {
            Some(board) => {
                let version = self.state.replace(board.clone());
                Outcome::Replaced { version, board }
            }
            None => Outcome::Unchanged,
        }
    }
}
