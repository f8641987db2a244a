#![forbid(unsafe_code)]

//! Board model: cards, columns, and validated board snapshots.
//!
//! # Invariants
//!
//! 1. Column ids are unique within a board.
//! 2. Card ids are unique across the whole board, so at most one column
//!    holds a given card.
//! 3. No card id equals a column id (the locator resolves column ids first,
//!    so such a card could never be addressed).
//! 4. No id is empty.
//!
//! [`Board::new`] rejects any snapshot that breaks these; the resolvers only
//! ever move cards, so a board that starts valid stays valid.
//!
//! # Structural sharing
//!
//! A [`Column`] keeps its cards in an `Arc<[Card]>` and a [`Board`] keeps its
//! columns in an `Arc<[Column]>`. Cloning either is O(1). A resolver builds a
//! fresh card slice only for the columns it touches; every other column keeps
//! pointing at the same allocation as the previous snapshot, and no slice
//! reachable from an earlier snapshot is ever written to.

use std::fmt;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::id::{CardId, ColumnId, DragId};
use crate::locate::{self, Location};

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub title: Arc<str>,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub fn new(id: impl Into<CardId>, title: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// An ordered, uniquely-identified group of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    id: ColumnId,
    title: Arc<str>,
    cards: Arc<[Card]>,
}

impl Column {
    /// Create a column holding `cards` in order.
    #[must_use]
    pub fn new(
        id: impl Into<ColumnId>,
        title: impl Into<Arc<str>>,
        cards: impl IntoIterator<Item = Card>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cards: cards.into_iter().collect(),
        }
    }

    /// Create a column with no cards.
    #[must_use]
    pub fn empty(id: impl Into<ColumnId>, title: impl Into<Arc<str>>) -> Self {
        Self::new(id, title, [])
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Cards in display order.
    #[inline]
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate card ids in display order.
    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> + '_ {
        self.cards.iter().map(|card| &card.id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index of the card named by `id`, if this column holds it.
    #[must_use]
    pub fn position(&self, id: &DragId) -> Option<usize> {
        self.cards.iter().position(|card| id.names_card(&card.id))
    }

    /// Returns true if both columns point at the same card allocation.
    #[inline]
    #[must_use]
    pub fn shares_cards_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cards, &other.cards)
    }

    /// Same identity, new card sequence.
    pub(crate) fn with_cards(&self, cards: Vec<Card>) -> Self {
        Self {
            id: self.id.clone(),
            title: Arc::clone(&self.title),
            cards: cards.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// An immutable, validated snapshot of every column and its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Arc<[Column]>,
}

impl Board {
    /// Build a board, rejecting snapshots that violate the id invariants.
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Result<Self, BoardModelError> {
        let board = Self {
            columns: columns.into_iter().collect(),
        };
        board.validate()?;
        Ok(board)
    }

    /// A board with no columns.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: Arc::new([]),
        }
    }

    /// Start a [`BoardBuilder`].
    #[must_use]
    pub fn builder() -> BoardBuilder {
        BoardBuilder::default()
    }

    /// Re-check the id invariants on this snapshot.
    pub fn validate(&self) -> Result<(), BoardModelError> {
        let mut column_ids: AHashSet<&str> = AHashSet::with_capacity(self.columns.len());
        for (index, column) in self.columns.iter().enumerate() {
            if column.id.is_empty() {
                return Err(BoardModelError::EmptyColumnId { index });
            }
            if !column_ids.insert(column.id.as_str()) {
                return Err(BoardModelError::DuplicateColumnId {
                    id: column.id.clone(),
                });
            }
        }

        let mut owners: AHashMap<&str, &ColumnId> = AHashMap::with_capacity(self.card_count());
        for column in self.columns.iter() {
            for (index, card) in column.cards.iter().enumerate() {
                if card.id.is_empty() {
                    return Err(BoardModelError::EmptyCardId {
                        column: column.id.clone(),
                        index,
                    });
                }
                if column_ids.contains(card.id.as_str()) {
                    return Err(BoardModelError::AmbiguousId {
                        id: card.id.clone(),
                    });
                }
                if let Some(first) = owners.insert(card.id.as_str(), &column.id) {
                    return Err(BoardModelError::DuplicateCardId {
                        id: card.id.clone(),
                        first: first.clone(),
                        second: column.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Columns in display order.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    #[must_use]
    pub fn column_by_id(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == *id)
    }

    /// Total number of cards across all columns.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Every card id on the board, column by column.
    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> + '_ {
        self.columns.iter().flat_map(Column::card_ids)
    }

    /// Resolve an opaque id against this snapshot. See [`locate::locate`].
    #[must_use]
    pub fn locate(&self, id: Option<&DragId>) -> Option<Location> {
        locate::locate(self, id)
    }

    /// Returns true if both boards are the very same snapshot allocation.
    #[inline]
    #[must_use]
    pub fn same_snapshot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.columns, &other.columns)
    }

    /// Copy of this board with the given columns swapped in by index.
    ///
    /// Columns not named in `replacements` are cloned, which only bumps the
    /// reference count on their card slices.
    pub(crate) fn with_columns(&self, replacements: &[(usize, Column)]) -> Self {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                replacements
                    .iter()
                    .find(|(replaced, _)| *replaced == index)
                    .map_or_else(|| column.clone(), |(_, column)| column.clone())
            })
            .collect();
        Self {
            columns: columns.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// BoardBuilder
// ---------------------------------------------------------------------------

/// Fluent construction of a [`Board`].
///
/// ```
/// use sortboard_core::Board;
///
/// let board = Board::builder()
///     .column("Column1", "Column1")
///     .card("Card1", "Card1")
///     .card("Card2", "Card2")
///     .column("Column2", "Column2")
///     .build()
///     .unwrap();
/// assert_eq!(board.card_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct BoardBuilder {
    columns: Vec<(ColumnId, Arc<str>, Vec<Card>)>,
    orphan: Option<CardId>,
}

impl BoardBuilder {
    /// Append a column; subsequent [`card`](Self::card) calls fill it.
    #[must_use]
    pub fn column(mut self, id: impl Into<ColumnId>, title: impl Into<Arc<str>>) -> Self {
        self.columns.push((id.into(), title.into(), Vec::new()));
        self
    }

    /// Append a card to the most recently added column.
    #[must_use]
    pub fn card(mut self, id: impl Into<CardId>, title: impl Into<Arc<str>>) -> Self {
        let card = Card::new(id, title);
        match self.columns.last_mut() {
            Some((_, _, cards)) => cards.push(card),
            None => {
                if self.orphan.is_none() {
                    self.orphan = Some(card.id);
                }
            }
        }
        self
    }

    /// Validate and produce the board.
    pub fn build(self) -> Result<Board, BoardModelError> {
        if let Some(id) = self.orphan {
            return Err(BoardModelError::CardWithoutColumn { id });
        }
        Board::new(
            self.columns
                .into_iter()
                .map(|(id, title, cards)| Column::new(id, title, cards)),
        )
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Ways a board snapshot can violate the id invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardModelError {
    EmptyColumnId { index: usize },
    EmptyCardId { column: ColumnId, index: usize },
    DuplicateColumnId { id: ColumnId },
    DuplicateCardId {
        id: CardId,
        first: ColumnId,
        second: ColumnId,
    },
    AmbiguousId { id: CardId },
    CardWithoutColumn { id: CardId },
}

impl fmt::Display for BoardModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyColumnId { index } => write!(f, "column at index {index} has an empty id"),
            Self::EmptyCardId { column, index } => {
                write!(f, "card at index {index} of column {column} has an empty id")
            }
            Self::DuplicateColumnId { id } => write!(f, "duplicate column id {id}"),
            Self::DuplicateCardId { id, first, second } => {
                if first == second {
                    write!(f, "card {id} appears twice in column {first}")
                } else {
                    write!(f, "card {id} appears in both column {first} and column {second}")
                }
            }
            Self::AmbiguousId { id } => write!(f, "card id {id} collides with a column id"),
            Self::CardWithoutColumn { id } => write!(f, "card {id} was added before any column"),
        }
    }
}

impl std::error::Error for BoardModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_columns() -> Board {
        Board::builder()
            .column("Column1", "Column1")
            .card("Card1", "Card1")
            .card("Card2", "Card2")
            .column("Column2", "Column2")
            .card("Card3", "Card3")
            .build()
            .expect("valid board")
    }

    #[test]
    fn builder_keeps_order() {
        let board = two_columns();
        let ids: Vec<&str> = board.card_ids().map(CardId::as_str).collect();
        assert_eq!(ids, ["Card1", "Card2", "Card3"]);
        assert_eq!(board.columns()[1].title(), "Column2");
    }

    #[test]
    fn rejects_duplicate_card_across_columns() {
        let err = Board::new([
            Column::new("a", "A", [Card::new("x", "X")]),
            Column::new("b", "B", [Card::new("x", "X")]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            BoardModelError::DuplicateCardId {
                id: "x".into(),
                first: "a".into(),
                second: "b".into(),
            }
        );
        assert_eq!(err.to_string(), "card x appears in both column a and column b");
    }

    #[test]
    fn rejects_duplicate_card_within_column() {
        let err = Board::new([Column::new(
            "a",
            "A",
            [Card::new("x", "X"), Card::new("x", "X again")],
        )])
        .unwrap_err();
        assert!(matches!(err, BoardModelError::DuplicateCardId { .. }));
        assert_eq!(err.to_string(), "card x appears twice in column a");
    }

    #[test]
    fn rejects_duplicate_column() {
        let err = Board::new([Column::empty("a", "A"), Column::empty("a", "A2")]).unwrap_err();
        assert_eq!(err, BoardModelError::DuplicateColumnId { id: "a".into() });
    }

    #[test]
    fn rejects_card_named_like_a_column() {
        let err = Board::new([
            Column::empty("a", "A"),
            Column::new("b", "B", [Card::new("a", "clash")]),
        ])
        .unwrap_err();
        assert_eq!(err, BoardModelError::AmbiguousId { id: "a".into() });
    }

    #[test]
    fn rejects_empty_ids() {
        assert_eq!(
            Board::new([Column::empty("", "nameless")]).unwrap_err(),
            BoardModelError::EmptyColumnId { index: 0 }
        );
        assert!(matches!(
            Board::new([Column::new("a", "A", [Card::new("", "blank")])]).unwrap_err(),
            BoardModelError::EmptyCardId { index: 0, .. }
        ));
    }

    #[test]
    fn builder_rejects_card_before_column() {
        let err = Board::builder().card("x", "X").column("a", "A").build().unwrap_err();
        assert_eq!(err, BoardModelError::CardWithoutColumn { id: "x".into() });
    }

    #[test]
    fn with_columns_shares_untouched_slices() {
        let board = two_columns();
        let replaced = board.columns()[0].with_cards(vec![Card::new("Card2", "Card2")]);
        let next = board.with_columns(&[(0, replaced)]);
        assert!(!next.columns()[0].shares_cards_with(&board.columns()[0]));
        assert!(next.columns()[1].shares_cards_with(&board.columns()[1]));
        assert_eq!(board.columns()[0].len(), 2, "previous snapshot untouched");
    }

    #[test]
    fn clone_is_same_snapshot() {
        let board = two_columns();
        assert!(board.same_snapshot(&board.clone()));
        assert!(!board.same_snapshot(&two_columns()));
        assert!(Board::empty().columns().is_empty());
    }
}
