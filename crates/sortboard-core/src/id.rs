#![forbid(unsafe_code)]

//! Strongly-typed identifiers.
//!
//! Columns and cards each get their own identifier type so a card id can
//! never be compared against a column id by accident. Drag events arrive with
//! [`DragId`], an opaque id that may name either; only the locator
//! ([`crate::locate`]) is allowed to compare it against the typed ids.
//!
//! All three wrap an `Arc<str>`, so cloning an id never allocates.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(Arc<str>);

        impl $name {
            /// Create an id from any string-like value.
            #[must_use]
            pub fn new(raw: impl Into<Arc<str>>) -> Self {
                Self(raw.into())
            }

            /// Borrow the raw string.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the id is the empty string.
            #[inline]
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::new(raw)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifier of a column. Unique among the columns of a board.
    ColumnId
}

string_id! {
    /// Identifier of a card. Unique across the whole board.
    CardId
}

string_id! {
    /// Opaque identifier carried by drag events.
    ///
    /// The event source does not know whether the pointer is over a card or
    /// over an empty column, so the id may name either.
    DragId
}

impl From<&ColumnId> for DragId {
    fn from(id: &ColumnId) -> Self {
        Self(Arc::clone(&id.0))
    }
}

impl From<&CardId> for DragId {
    fn from(id: &CardId) -> Self {
        Self(Arc::clone(&id.0))
    }
}

impl From<ColumnId> for DragId {
    fn from(id: ColumnId) -> Self {
        Self(id.0)
    }
}

impl From<CardId> for DragId {
    fn from(id: CardId) -> Self {
        Self(id.0)
    }
}

impl DragId {
    /// Returns true if this drag id names the given column.
    #[inline]
    #[must_use]
    pub fn names_column(&self, id: &ColumnId) -> bool {
        self.as_str() == id.as_str()
    }

    /// Returns true if this drag id names the given card.
    #[inline]
    #[must_use]
    pub fn names_card(&self, id: &CardId) -> bool {
        self.as_str() == id.as_str()
    }
}
