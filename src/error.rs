use thiserror::Error;

use crate::element::ElementId;

/// Errors from the store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to access persisted document: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors restoring a persisted document.
///
/// A blob that fails to parse into a valid document (unknown kind,
/// missing required field, duplicate id) is corrupt; the engine keeps its
/// current document and never adopts a partially-valid one. Unmet
/// operation preconditions (nothing selected, empty undo stack, reorder
/// at a boundary) are not errors anywhere in this crate; they degrade to
/// documented no-ops.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("corrupt document blob: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("corrupt document blob: duplicate element id {id}")]
    DuplicateId { id: ElementId },

    #[error(transparent)]
    Store(#[from] StoreError),
}
