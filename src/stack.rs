use std::time::{Duration, Instant};

use crate::{
    collection::{BoundedCollection, CollectionKind, Discipline},
    error::CollectionResult,
    removal::RemovalRequest,
};

/// Last in, first out: the top is the last element.
#[derive(Debug, Clone, Copy)]
pub struct Lifo;

impl Discipline for Lifo {
    const KIND: CollectionKind = CollectionKind::Stack;

    fn target_index(len: usize) -> usize {
        len - 1
    }
}

pub type BoundedStack = BoundedCollection<Lifo>;

impl BoundedCollection<Lifo> {
    pub fn push(&mut self, raw: &str) -> CollectionResult<()> {
        self.insert(raw)
    }

    /// Mark the top for removal; it leaves the stack when the commit is due.
    pub fn pop(&mut self, now: Instant, delay: Duration) -> CollectionResult<RemovalRequest> {
        self.request_removal(now, delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::CollectionError, token::Token};

    const DELAY: Duration = Duration::from_millis(500);

    fn pop_and_commit(stack: &mut BoundedStack, now: &mut Instant) -> Token {
        stack.pop(*now, DELAY).unwrap();
        *now += DELAY;
        stack.commit_due(*now).unwrap()
    }

    #[test]
    fn test_push_then_pop_commit_empties_stack() {
        let mut stack = BoundedStack::new(1);
        let mut now = Instant::now();
        stack.push("solo").unwrap();

        let removed = pop_and_commit(&mut stack, &mut now);
        assert_eq!(removed.as_str(), "solo");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = BoundedStack::new(5);
        let mut now = Instant::now();
        for token in ["a", "b", "c"] {
            stack.push(token).unwrap();
        }

        assert_eq!(pop_and_commit(&mut stack, &mut now).as_str(), "c");
        assert_eq!(pop_and_commit(&mut stack, &mut now).as_str(), "b");
        let remaining: Vec<_> = stack.items().iter().map(|t| t.as_str()).collect();
        assert_eq!(remaining, vec!["a"]);
    }

    #[test]
    fn test_capacity_pushes_then_overflow() {
        let mut stack = BoundedStack::new(5);
        for i in 0..5 {
            stack.push(&format!("item{}", i)).unwrap();
        }
        assert_eq!(
            stack.push("extra"),
            Err(CollectionError::Overflow(CollectionKind::Stack))
        );
        assert_eq!(stack.len(), 5);
        assert_eq!(stack.peek().map(|t| t.as_str()), Ok("item4"));
    }

    #[test]
    fn test_peek_returns_top_without_mutation() {
        let mut stack = BoundedStack::new(3);
        stack.push("x").unwrap();
        stack.push("y").unwrap();

        assert_eq!(stack.peek().unwrap().as_str(), "y");
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_pop_marks_top() {
        let mut stack = BoundedStack::new(3);
        stack.push("x").unwrap();
        stack.push("y").unwrap();

        let request = stack.pop(Instant::now(), DELAY).unwrap();
        assert!(matches!(request, RemovalRequest::Started { index: 1, .. }));
        assert_eq!(stack.pending_index(), Some(1));
    }

    #[test]
    fn test_repeated_pop_while_pending_removes_once() {
        let mut stack = BoundedStack::new(3);
        stack.push("a").unwrap();
        stack.push("b").unwrap();
        let start = Instant::now();

        stack.pop(start, DELAY).unwrap();
        for offset in [50, 100, 450] {
            let request = stack.pop(start + Duration::from_millis(offset), DELAY);
            assert!(matches!(
                request,
                Ok(RemovalRequest::AlreadyPending { index: 1, .. })
            ));
        }

        assert_eq!(stack.commit_due(start + DELAY).map(|t| t.to_string()), Some("b".to_string()));
        assert_eq!(stack.commit_due(start + DELAY * 4), None);
        assert_eq!(stack.len(), 1);
    }
}
