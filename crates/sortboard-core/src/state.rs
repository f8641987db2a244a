#![forbid(unsafe_code)]

//! Canonical board snapshot with whole-snapshot replacement.
//!
//! Every mutation goes through [`BoardState::replace`], which swaps in a new
//! [`Board`] and bumps the version. Render layers can treat each version as a
//! discrete frame and skip any they have already drawn.
//!
//! # Invariants
//!
//! 1. `version()` starts at 0 and increases by exactly 1 per `replace`.
//! 2. A snapshot returned by `current()` or `snapshot()` is never modified
//!    afterwards; later replaces only change which snapshot is current.

use crate::model::Board;

/// Holds the current board for one view or session.
#[derive(Debug, Clone)]
pub struct BoardState {
    current: Board,
    version: u64,
}

impl BoardState {
    /// Create a state holding the initial board at version 0.
    #[must_use]
    pub fn new(initial: Board) -> Self {
        Self {
            current: initial,
            version: 0,
        }
    }

    /// Borrow the current snapshot.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &Board {
        &self.current
    }

    /// Clone the current snapshot. O(1).
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Board {
        self.current.clone()
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Swap in a new snapshot, returning the new version.
    pub fn replace(&mut self, next: Board) -> u64 {
        self.current = next;
        self.version += 1;
        self.version
    }
}
