use std::{
    collections::VecDeque,
    fmt,
    time::{Duration, Instant},
};

use tokio::sync::mpsc;

use crate::{collection::CollectionKind, error::CollectionError, token::Token};

/// Toast visibility used when nothing else is configured
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(700);

/// Upper bound on toasts shown at once; older ones are dropped first
pub const MAX_VISIBLE_NOTICES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Success,
    Info,
}

/// Something the user should be told about an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Failed(CollectionError),
    Removed { kind: CollectionKind, token: Token },
    Peeked { kind: CollectionKind, token: Token },
    Emptiness { kind: CollectionKind, empty: bool },
    Resized { kind: CollectionKind, capacity: usize },
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::Failed(_) => NoticeLevel::Error,
            Notice::Removed { .. } | Notice::Peeked { .. } => NoticeLevel::Success,
            Notice::Emptiness { .. } | Notice::Resized { .. } => NoticeLevel::Info,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Failed(err) => write!(f, "{}", err),
            Notice::Removed { kind, token } => {
                write!(f, "Element {}: {}", kind.removed_verb(), token)
            }
            Notice::Peeked { kind, token } => {
                write!(f, "{} Element: {}", kind.peek_label(), token)
            }
            Notice::Emptiness { kind, empty } => {
                if *empty {
                    write!(f, "{} is Empty", kind)
                } else {
                    write!(f, "{} is Not Empty", kind)
                }
            }
            Notice::Resized { kind, capacity } => {
                write!(f, "{} size set to {} (cleared)", kind, capacity)
            }
        }
    }
}

/// Sending half of the notice stream handed to each visualizer
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn send(&self, notice: Notice) {
        if let Notice::Failed(err) = &notice {
            tracing::debug!(class = err.class(), "{}", err);
        }
        if self.sender.send(notice).is_err() {
            tracing::warn!("notice receiver dropped");
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Toasts currently on screen, each visible for a fixed duration.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    toasts: VecDeque<Toast>,
    duration: Duration,
    max_visible: usize,
}

impl NoticeBoard {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
            max_visible: MAX_VISIBLE_NOTICES,
        }
    }

    pub fn push(&mut self, notice: Notice, now: Instant) {
        self.toasts.push_back(Toast {
            notice,
            shown_at: now,
        });
        if self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }

    /// Move everything waiting on the channel onto the board.
    pub fn collect(&mut self, receiver: &mut mpsc::UnboundedReceiver<Notice>, now: Instant) -> usize {
        let mut received = 0;
        while let Ok(notice) = receiver.try_recv() {
            self.push(notice, now);
            received += 1;
        }
        received
    }

    /// Drop toasts whose display time is over.
    pub fn expire(&mut self, now: Instant) {
        let duration = self.duration;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < duration);
    }

    /// Oldest first
    pub fn toasts(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> Token {
        Token::parse(s).unwrap()
    }

    #[test]
    fn test_notice_text() {
        let removed = Notice::Removed {
            kind: CollectionKind::Stack,
            token: token("7"),
        };
        assert_eq!(removed.to_string(), "Element popped: 7");
        assert_eq!(removed.level(), NoticeLevel::Success);

        let dequeued = Notice::Removed {
            kind: CollectionKind::Queue,
            token: token("q"),
        };
        assert_eq!(dequeued.to_string(), "Element dequeued: q");

        let peeked = Notice::Peeked {
            kind: CollectionKind::Queue,
            token: token("q"),
        };
        assert_eq!(peeked.to_string(), "Front Element: q");

        let empty = Notice::Emptiness {
            kind: CollectionKind::Stack,
            empty: false,
        };
        assert_eq!(empty.to_string(), "Stack is Not Empty");
        assert_eq!(empty.level(), NoticeLevel::Info);

        let failed = Notice::Failed(CollectionError::Overflow(CollectionKind::Queue));
        assert_eq!(failed.to_string(), "Queue Overflow");
        assert_eq!(failed.level(), NoticeLevel::Error);
    }

    #[test]
    fn test_notifier_delivers_in_order() {
        let (notifier, mut receiver) = Notifier::channel();
        notifier.send(Notice::Failed(CollectionError::EmptyInput));
        notifier.send(Notice::Emptiness {
            kind: CollectionKind::Queue,
            empty: true,
        });

        assert_eq!(
            receiver.try_recv().ok(),
            Some(Notice::Failed(CollectionError::EmptyInput))
        );
        assert!(matches!(
            receiver.try_recv(),
            Ok(Notice::Emptiness { empty: true, .. })
        ));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_board_expires_after_duration() {
        let (notifier, mut receiver) = Notifier::channel();
        let mut board = NoticeBoard::new(Duration::from_millis(700));
        let start = Instant::now();

        notifier.send(Notice::Failed(CollectionError::EmptyInput));
        assert_eq!(board.collect(&mut receiver, start), 1);

        board.expire(start + Duration::from_millis(699));
        assert_eq!(board.toasts().count(), 1);
        board.expire(start + Duration::from_millis(700));
        assert!(board.is_empty());
    }

    #[test]
    fn test_board_keeps_newest() {
        let mut board = NoticeBoard::default();
        let now = Instant::now();
        for i in 0..(MAX_VISIBLE_NOTICES + 2) {
            board.push(
                Notice::Resized {
                    kind: CollectionKind::Stack,
                    capacity: i + 1,
                },
                now,
            );
        }

        assert_eq!(board.toasts().count(), MAX_VISIBLE_NOTICES);
        let first = board.toasts().next().map(|t| t.notice.clone());
        assert_eq!(
            first,
            Some(Notice::Resized {
                kind: CollectionKind::Stack,
                capacity: 3
            })
        );
    }
}
