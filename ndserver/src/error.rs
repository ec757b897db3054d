//! Server-level error type: wraps `ndserver_kernel::KernelError` with the
//! argument-parsing and symbol-table failures that occur before a
//! request ever reaches the kernel.

use ndserver_kernel::KernelError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServerError {
    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("Error: unknown symbol '{0}'")]
    UndefinedSymbol(String),

    #[error("Error: symbol '{0}' already exists")]
    DuplicateSymbol(String),

    #[error("Error: malformed scalar '{value}' for dtype '{dtype}'")]
    MalformedScalar { value: String, dtype: String },

    #[error("Error: unrecognized command '{0}'")]
    UnknownCommand(String),

    #[error("Error: clip bounds must be both scalar, both array, or one of each; got {0}")]
    MalformedClipBounds(String),
}

pub type ServerResult<T> = Result<T, ServerError>;
