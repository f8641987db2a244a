#![forbid(unsafe_code)]

//! Drag events delivered by the host's input layer.
//!
//! # Invariants
//!
//! Every gesture is well-formed: an optional `Start`, zero or more `Over`,
//! then exactly one `End` or `Cancel`. Events arrive strictly in order on one
//! thread; nothing here buffers or reorders them.

use crate::id::DragId;

/// Pointer displacement since the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    pub x: f64,
    pub y: f64,
}

impl Delta {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One event in a drag gesture.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DragEvent {
    /// A card was picked up.
    Start { active: DragId },

    /// The pointer moved over a new target while dragging.
    Over {
        active: DragId,
        /// Card or column under the pointer, if any.
        over: Option<DragId>,
        delta: Delta,
    },

    /// The card was released.
    End {
        active: DragId,
        over: Option<DragId>,
    },

    /// The gesture was abandoned (Escape, focus loss, etc.).
    Cancel,
}

impl DragEvent {
    #[must_use]
    pub fn start(active: impl Into<DragId>) -> Self {
        Self::Start {
            active: active.into(),
        }
    }

    #[must_use]
    pub fn over(active: impl Into<DragId>, over: Option<impl Into<DragId>>, delta: Delta) -> Self {
        Self::Over {
            active: active.into(),
            over: over.map(Into::into),
            delta,
        }
    }

    #[must_use]
    pub fn end(active: impl Into<DragId>, over: Option<impl Into<DragId>>) -> Self {
        Self::End {
            active: active.into(),
            over: over.map(Into::into),
        }
    }

    /// The dragged id, if the event carries one.
    #[must_use]
    pub fn active(&self) -> Option<&DragId> {
        match self {
            Self::Start { active } | Self::Over { active, .. } | Self::End { active, .. } => {
                Some(active)
            }
            Self::Cancel => None,
        }
    }

    /// Returns true for `End` and `Cancel`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End { .. } | Self::Cancel)
    }

    /// Short lowercase name, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Over { .. } => "over",
            Self::End { .. } => "end",
            Self::Cancel => "cancel",
        }
    }
}
