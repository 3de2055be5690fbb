//! Generation-time errors.
//!
//! All of these are fatal: the whole compilation run aborts with no
//! partial output. They signal a broken or stale input, not a runtime
//! condition.

use thiserror::Error;

/// Errors raised while compiling contracts into a generated module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A `special` model carried a kind outside {any, unknown, undefined}.
    /// This means the schema was produced by a newer writer than this
    /// compiler understands.
    #[error("unsupported special model kind '{0}'")]
    UnsupportedModelVariant(String),

    /// A contract declared no code-200 response.
    #[error("contract '{0}' declares no code-200 success response")]
    MissingSuccessResponse(String),

    /// Two contracts in the same batch share an id.
    #[error("duplicate contract id '{0}'")]
    DuplicateContractId(String),
}
