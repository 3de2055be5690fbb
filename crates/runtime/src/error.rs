//! Errors of the dispatch engine.
//!
//! Only binding construction surfaces an error to the caller. Call-time
//! problems are never errors: they are classified into one arm of the
//! two-outcome result (see `outcome`).

use thiserror::Error;

/// Binding-construction failure. Fatal for that binding and surfaced to
/// the generation driver; never raised at call time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A `${name}` placeholder in the URL template has no entry in the
    /// static variables.
    #[error("'{0}' is not found in variables")]
    MissingVariable(String),
}

/// A transport-level failure reported by a [`Transport`] implementation.
///
/// At call time these are swallowed into the unexpected-failure outcome;
/// the message only survives in logs.
///
/// [`Transport`]: crate::Transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);
