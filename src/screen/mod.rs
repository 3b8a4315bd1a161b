pub mod institute;
pub mod student;

pub use institute::*;
pub use student::*;

use thiserror::Error;

use crate::logic::ValidationError;
use crate::store::StoreError;

/// Whether the next submit creates a new record or overwrites the edit
/// target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Screen-level failure: either the input was rejected before any store
/// call, or the store round trip itself failed. Both leave the screen
/// interactive with its form state intact.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Store(#[from] StoreError),
}
