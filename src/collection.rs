use std::{
    collections::VecDeque,
    fmt,
    marker::PhantomData,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{
    capacity,
    error::{CollectionError, CollectionResult},
    removal::{PendingRemoval, RemovalController, RemovalRequest},
    token::Token,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Stack,
    Queue,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Stack => "Stack",
            CollectionKind::Queue => "Queue",
        }
    }

    /// Past tense used when a removal commits ("Element popped: x")
    pub fn removed_verb(&self) -> &'static str {
        match self {
            CollectionKind::Stack => "popped",
            CollectionKind::Queue => "dequeued",
        }
    }

    /// Which end `peek` looks at
    pub fn peek_label(&self) -> &'static str {
        match self {
            CollectionKind::Stack => "Top",
            CollectionKind::Queue => "Front",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering rule of a bounded collection.
///
/// New elements always go to the back of `items`; the discipline decides
/// which element `peek` and removals target.
pub trait Discipline {
    const KIND: CollectionKind;

    /// Index targeted by peek and removal for a non-empty collection of `len`
    fn target_index(len: usize) -> usize;
}

/// A capacity-bounded sequence of tokens with a two-phase removal.
///
/// `items.len() <= capacity` holds at all times. Insertion into a full
/// collection is rejected rather than evicting anything.
#[derive(Debug, Clone)]
pub struct BoundedCollection<D: Discipline> {
    items: VecDeque<Token>,
    capacity: usize,
    removal: RemovalController,
    _discipline: PhantomData<D>,
}

impl<D: Discipline> BoundedCollection<D> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity::clamp_capacity(capacity as i64);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            removal: RemovalController::new(),
            _discipline: PhantomData,
        }
    }

    pub fn kind(&self) -> CollectionKind {
        D::KIND
    }

    pub fn items(&self) -> &VecDeque<Token> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        capacity::is_empty(self.items.len())
    }

    pub fn can_insert(&self) -> bool {
        capacity::can_insert(self.items.len(), self.capacity)
    }

    pub fn is_full(&self) -> bool {
        !self.can_insert()
    }

    pub fn pending(&self) -> Option<&PendingRemoval> {
        self.removal.pending()
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.removal.pending().map(|pending| pending.index)
    }

    pub fn pending_token(&self) -> Option<&Token> {
        self.pending_index().and_then(|index| self.items.get(index))
    }

    /// Append a token at the back.
    ///
    /// Checks run in order: removal in flight, overflow, blank input.
    pub fn insert(&mut self, raw: &str) -> CollectionResult<()> {
        if self.removal.is_pending() {
            return Err(CollectionError::RemovalPending(D::KIND));
        }
        if !self.can_insert() {
            return Err(CollectionError::Overflow(D::KIND));
        }
        let token = Token::parse(raw).ok_or(CollectionError::EmptyInput)?;

        tracing::debug!(kind = %D::KIND, token = %token, len = self.items.len() + 1, "inserted");
        self.items.push_back(token);
        Ok(())
    }

    /// Validate and start a removal. The element stays in place until
    /// [`commit_due`](Self::commit_due) is polled past the deadline.
    pub fn request_removal(&mut self, now: Instant, delay: Duration) -> CollectionResult<RemovalRequest> {
        if self.is_empty() {
            return Err(CollectionError::Underflow(D::KIND));
        }

        let index = D::target_index(self.items.len());
        Ok(self.removal.begin(index, now, delay))
    }

    /// Physically remove the pending element if its deadline has passed.
    pub fn commit_due(&mut self, now: Instant) -> Option<Token> {
        let index = self.removal.take_due(now)?;
        let token = self.items.remove(index)?;
        tracing::info!(kind = %D::KIND, token = %token, len = self.items.len(), "removal committed");
        Some(token)
    }

    pub fn peek(&self) -> CollectionResult<&Token> {
        if self.is_empty() {
            return Err(CollectionError::Empty(D::KIND));
        }
        self.items
            .get(D::target_index(self.items.len()))
            .ok_or(CollectionError::Empty(D::KIND))
    }

    /// Change the capacity and empty the collection. Elements are never
    /// carried across a resize, and an in-flight removal is dropped.
    pub fn resize(&mut self, requested: i64) -> usize {
        self.capacity = capacity::clamp_capacity(requested);
        self.items.clear();
        if let Some(dropped) = self.removal.reset() {
            tracing::debug!(kind = %D::KIND, index = dropped.index, "pending removal dropped by resize");
        }
        tracing::info!(kind = %D::KIND, capacity = self.capacity, "resized");
        self.capacity
    }
}

impl<D: Discipline> Default for BoundedCollection<D> {
    fn default() -> Self {
        Self::new(capacity::DEFAULT_CAPACITY)
    }
}
