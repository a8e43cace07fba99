use std::time::{Duration, Instant};

use crate::{
    collection::{BoundedCollection, CollectionKind, Discipline},
    error::CollectionResult,
    removal::RemovalRequest,
};

/// First in, first out: the front is the first element.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl Discipline for Fifo {
    const KIND: CollectionKind = CollectionKind::Queue;

    fn target_index(_len: usize) -> usize {
        0
    }
}

pub type BoundedQueue = BoundedCollection<Fifo>;

impl BoundedCollection<Fifo> {
    pub fn enqueue(&mut self, raw: &str) -> CollectionResult<()> {
        self.insert(raw)
    }

    /// Mark the front for removal; it leaves the queue when the commit is due.
    pub fn dequeue(&mut self, now: Instant, delay: Duration) -> CollectionResult<RemovalRequest> {
        self.request_removal(now, delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_fifo_order() {
        let mut queue = BoundedQueue::new(5);
        let mut now = Instant::now();
        for token in ["a", "b", "c"] {
            queue.enqueue(token).unwrap();
        }

        let mut removed = Vec::new();
        for _ in 0..2 {
            queue.dequeue(now, DELAY).unwrap();
            now += DELAY;
            removed.push(queue.commit_due(now).unwrap().to_string());
        }

        assert_eq!(removed, vec!["a", "b"]);
        let remaining: Vec<_> = queue.items().iter().map(|t| t.as_str()).collect();
        assert_eq!(remaining, vec!["c"]);
    }

    #[test]
    fn test_peek_returns_front() {
        let mut queue = BoundedQueue::new(3);
        queue.enqueue("first").unwrap();
        queue.enqueue("second").unwrap();

        assert_eq!(queue.peek().unwrap().as_str(), "first");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_dequeue_empty_underflows() {
        let mut queue = BoundedQueue::new(3);
        assert_eq!(
            queue.dequeue(Instant::now(), DELAY),
            Err(CollectionError::Underflow(CollectionKind::Queue))
        );
        assert_eq!(
            queue.peek(),
            Err(CollectionError::Empty(CollectionKind::Queue))
        );
    }

    #[test]
    fn test_dequeue_marks_front() {
        let mut queue = BoundedQueue::new(3);
        queue.enqueue("a").unwrap();
        queue.enqueue("b").unwrap();

        queue.dequeue(Instant::now(), DELAY).unwrap();
        assert_eq!(queue.pending_index(), Some(0));
        assert_eq!(queue.pending_token().map(|t| t.as_str()), Some("a"));
    }

    #[test]
    fn test_repeated_dequeue_while_pending_removes_once() {
        let mut queue = BoundedQueue::new(3);
        queue.enqueue("a").unwrap();
        queue.enqueue("b").unwrap();
        let start = Instant::now();

        queue.dequeue(start, DELAY).unwrap();
        let again = queue.dequeue(start + Duration::from_millis(10), DELAY).unwrap();
        assert!(matches!(again, RemovalRequest::AlreadyPending { index: 0, .. }));

        assert_eq!(queue.commit_due(start + DELAY).unwrap().as_str(), "a");
        assert_eq!(queue.commit_due(start + DELAY * 2), None);
        assert_eq!(queue.peek().map(|t| t.as_str()), Ok("b"));
    }

    #[test]
    fn test_resize_resets_queue() {
        let mut queue = BoundedQueue::new(3);
        queue.enqueue("a").unwrap();
        assert_eq!(queue.resize(8), 8);
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 8);
    }
}
