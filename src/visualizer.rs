use std::time::{Duration, Instant};

use crate::{
    capacity,
    collection::{BoundedCollection, Discipline},
    error::CollectionResult,
    notice::{Notice, Notifier},
    queue::{BoundedQueue, Fifo},
    removal::RemovalRequest,
    stack::{BoundedStack, Lifo},
    token::Token,
};

type InsertFn<D> = fn(&mut BoundedCollection<D>, &str) -> CollectionResult<()>;
type RemoveFn<D> = fn(&mut BoundedCollection<D>, Instant, Duration) -> CollectionResult<RemovalRequest>;

/// One visualizer session: the collection it owns, the value being typed and
/// the channel its notices go out on.
#[derive(Debug)]
pub struct Visualizer<D: Discipline> {
    pub collection: BoundedCollection<D>,
    pub input: String,
    commit_delay: Duration,
    notifier: Notifier,
}

impl<D: Discipline> Visualizer<D> {
    pub fn new(capacity: usize, commit_delay: Duration, notifier: Notifier) -> Self {
        Self {
            collection: BoundedCollection::new(capacity),
            input: String::new(),
            commit_delay,
            notifier,
        }
    }

    fn report<T>(&self, result: CollectionResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.notifier.send(Notice::Failed(err));
                None
            }
        }
    }

    /// Insert the input buffer, clearing it on success.
    fn submit_with(&mut self, insert: InsertFn<D>) -> bool {
        let result = insert(&mut self.collection, &self.input);
        let inserted = self.report(result).is_some();
        if inserted {
            self.input.clear();
        }
        inserted
    }

    /// Errors are reported now; the success notice follows from
    /// [`tick`](Self::tick) once the removal commits.
    fn remove_with(&mut self, now: Instant, remove: RemoveFn<D>) -> Option<RemovalRequest> {
        let result = remove(&mut self.collection, now, self.commit_delay);
        let request = self.report(result)?;
        match request {
            RemovalRequest::Started { index, deadline } => {
                tracing::debug!(
                    kind = %D::KIND,
                    index,
                    delay_ms = deadline.saturating_duration_since(now).as_millis() as u64,
                    "removal pending"
                );
            }
            RemovalRequest::AlreadyPending { index, deadline } => {
                tracing::trace!(
                    kind = %D::KIND,
                    index,
                    remaining_ms = deadline.saturating_duration_since(now).as_millis() as u64,
                    "removal already pending, request ignored"
                );
            }
        }
        Some(request)
    }

    pub fn peek(&self) -> Option<Token> {
        let result = self.collection.peek().cloned();
        let token = self.report(result)?;
        self.notifier.send(Notice::Peeked {
            kind: D::KIND,
            token: token.clone(),
        });
        Some(token)
    }

    pub fn report_emptiness(&self) -> bool {
        let empty = self.collection.is_empty();
        self.notifier.send(Notice::Emptiness {
            kind: D::KIND,
            empty,
        });
        empty
    }

    pub fn set_capacity(&mut self, requested: i64) -> usize {
        let capacity = self.collection.resize(requested);
        self.notifier.send(Notice::Resized {
            kind: D::KIND,
            capacity,
        });
        capacity
    }

    pub fn set_capacity_from_input(&mut self, raw: &str) -> usize {
        self.set_capacity(capacity::clamp_capacity_input(raw) as i64)
    }

    pub fn grow(&mut self) -> usize {
        let next = self.collection.capacity() as i64 + 1;
        self.set_capacity(next)
    }

    /// Shrink by one, never below one. The collection is reset either way.
    pub fn shrink(&mut self) -> usize {
        let next = self.collection.capacity() as i64 - 1;
        self.set_capacity(next)
    }

    /// Commit a due removal and announce it.
    pub fn tick(&mut self, now: Instant) -> Option<Token> {
        let token = self.collection.commit_due(now)?;
        self.notifier.send(Notice::Removed {
            kind: D::KIND,
            token: token.clone(),
        });
        Some(token)
    }
}

impl Visualizer<Lifo> {
    pub fn push(&mut self) -> bool {
        self.submit_with(BoundedStack::push)
    }

    pub fn pop(&mut self, now: Instant) -> Option<RemovalRequest> {
        self.remove_with(now, BoundedStack::pop)
    }
}

impl Visualizer<Fifo> {
    pub fn enqueue(&mut self) -> bool {
        self.submit_with(BoundedQueue::enqueue)
    }

    pub fn dequeue(&mut self, now: Instant) -> Option<RemovalRequest> {
        self.remove_with(now, BoundedQueue::dequeue)
    }
}
