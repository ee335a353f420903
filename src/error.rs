//! The errors returned by a [`CognateSet`].
//!
//! [`CognateSet`]: ../cognate_sets/cognate_set/struct.CognateSet.html

use thiserror::Error;

/// Errors that can occur when working with a `CognateSet`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CognateError {
    /// The element is not a member of any cognate.
    #[error("element is not a member of any cognate")]
    ElementNotFound,

    /// There is no cognate left to pop.
    #[error("cognate set is empty")]
    Empty,
}

/// A failure while joining one of the cognates of a bulk load.
///
/// The failure is handed back as is, so it can still be matched on, but it is not reported as
/// the `source` of this error. Walking the chain of sources ends here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cognate {position} could not be joined: {error}")]
pub struct TransferError<E> {
    /// The position of the failing cognate in the source.
    pub position: usize,
    /// The failure itself.
    pub error: E,
}

impl<E> TransferError<E> {
    pub(crate) fn new(position: usize, error: E) -> Self {
        Self { position, error }
    }

    /// Returns the failure and drops the position.
    #[inline]
    pub fn into_inner(self) -> E {
        self.error
    }
}

/// A `Result` whose error is a [`CognateError`].
///
/// [`CognateError`]: enum.CognateError.html
pub type Result<T> = std::result::Result<T, CognateError>;
