#![forbid(unsafe_code)]

//! Core: board model, identifier location, and drag position resolution.
//!
//! # Role in SortBoard
//! `sortboard-core` owns the canonical [`Board`] snapshot and decides how a
//! drag gesture rearranges cards within and across columns. It never renders
//! and never reads raw pointer input; hosts translate their input into
//! [`DragEvent`]s and draw whatever [`Board`] snapshot comes back.
//!
//! # Primary responsibilities
//! - **Locator**: resolves an opaque [`DragId`] to its owning column.
//! - **Preview**: speculative cross-column moves while a card is dragged.
//! - **Commit**: same-column reorder when the gesture ends.
//! - **BoardState**: whole-snapshot replacement with a version counter.
//! - **DragSession**: gesture lifecycle, including cancel handling.
//!
//! # Example
//!
//! ```
//! use sortboard_core::{Board, Column, Card, DragEvent, DragSession, Delta};
//!
//! let board = Board::new([
//!     Column::new("todo", "Todo", [Card::new("a", "A"), Card::new("b", "B")]),
//!     Column::new("done", "Done", [Card::new("c", "C")]),
//! ])
//! .unwrap();
//!
//! let mut session = DragSession::with_default_config(board);
//! session.dispatch(&DragEvent::over("a", Some("c"), Delta::new(0.0, 4.0)));
//! session.dispatch(&DragEvent::end("a", Some("a")));
//!
//! let done = session.board().column_by_id(&"done".into()).unwrap();
//! assert_eq!(done.card_ids().map(|id| id.as_str()).collect::<Vec<_>>(), ["c", "a"]);
//! ```

pub mod commit;
pub mod config;
pub mod event;
pub mod id;
pub mod locate;
pub mod model;
pub mod preview;
pub mod session;
pub mod state;

pub use commit::resolve_commit;
pub use config::{CancelPolicy, SessionConfig};
pub use event::{Delta, DragEvent};
pub use id::{CardId, ColumnId, DragId};
pub use locate::{Location, Target, locate};
pub use model::{Board, BoardBuilder, BoardModelError, Card, Column};
pub use preview::{insertion_index, resolve_preview};
pub use session::{DragSession, Outcome};
pub use state::BoardState;
