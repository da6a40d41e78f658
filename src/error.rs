/// Errors returned by list, stack and queue operations.
///
/// Every error is detected before the collection is touched, so a failed call
/// leaves the collection exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// Node storage could not be reserved.
    #[error("failed to allocate node storage")]
    AllocationFailure,

    /// The operation needs at least one element.
    #[error("collection is empty")]
    EmptyCollection,

    /// An index was outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ListError>;
