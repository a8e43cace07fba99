use thiserror::Error;

use crate::collection::CollectionKind;

/// Result type for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Precondition violations reported back to the user.
///
/// None of these are fatal: the collection is left untouched and the Display
/// text is what the user sees in the notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("{0} Overflow")]
    Overflow(CollectionKind),

    #[error("{0} Underflow Error")]
    Underflow(CollectionKind),

    #[error("{0} is Empty")]
    Empty(CollectionKind),

    #[error("Please Enter Value")]
    EmptyInput,

    #[error("{0} removal in progress, wait for it to finish")]
    RemovalPending(CollectionKind),
}

impl CollectionError {
    /// Short name of the error class, used in logs
    pub fn class(&self) -> &'static str {
        match self {
            CollectionError::Overflow(_) => "overflow",
            CollectionError::Underflow(_) => "underflow",
            CollectionError::Empty(_) => "empty",
            CollectionError::EmptyInput => "empty_input",
            CollectionError::RemovalPending(_) => "removal_pending",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_collection() {
        assert_eq!(
            CollectionError::Overflow(CollectionKind::Stack).to_string(),
            "Stack Overflow"
        );
        assert_eq!(
            CollectionError::Underflow(CollectionKind::Queue).to_string(),
            "Queue Underflow Error"
        );
        assert_eq!(
            CollectionError::Empty(CollectionKind::Stack).to_string(),
            "Stack is Empty"
        );
        assert_eq!(CollectionError::EmptyInput.to_string(), "Please Enter Value");
    }

    #[test]
    fn test_class_names() {
        assert_eq!(CollectionError::EmptyInput.class(), "empty_input");
        assert_eq!(
            CollectionError::RemovalPending(CollectionKind::Queue).class(),
            "removal_pending"
        );
    }
}
