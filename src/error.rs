//! Engine errors. Two kinds, both terminal for the current synthesis run.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The caller handed the engine something it cannot start from: a
    /// non-object root, or a resolve request with both/neither input set.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A shape the class model refuses to represent (nested arrays).
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),
}
