//! Error types for the calendar layout engine.

use thiserror::Error;

use crate::item::{ItemId, ItemKind};

/// Errors that can occur in calgrid operations.
///
/// Layout never fails on bad item data; items are excluded one by one instead.
/// Only business-rule violations and configuration problems surface here.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{kind} '{id}' cannot be rescheduled")]
    NotDraggable { id: ItemId, kind: ItemKind },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
