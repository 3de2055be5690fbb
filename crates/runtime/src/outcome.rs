//! The two-outcome result of every invocation.
//!
//! A call always resolves: callers branch on success vs. failure as
//! data, never through error-handling control flow.

/// Status marker carried by every unexpected failure.
pub const UNEXPECTED_STATUS: u16 = 0;

/// Fixed message carried by every unexpected failure. The underlying
/// cause is logged, not returned.
pub const UNEXPECTED_MESSAGE: &str = "unexpected internal server error";

/// Result of one binding invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The endpoint answered 200 and the payload parsed as the
    /// contract's success shape.
    Success(T),
    /// Anything else, classified further by [`Failure`].
    Failure(Failure<E>),
}

/// The failure arm of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<E> {
    /// A contract-declared non-200 outcome: the endpoint answered with
    /// some other status and a payload matching a declared failure shape.
    Domain { status: u16, body: E },
    /// A transport or parsing breakdown. Carries the fixed status marker
    /// and message; the cause is in the logs.
    Unexpected { status: u16, message: String },
}

impl<T, E> Outcome<T, E> {
    /// The catch-all failure outcome for transport/parsing errors.
    pub fn unexpected() -> Self {
        Outcome::Failure(Failure::Unexpected {
            status: UNEXPECTED_STATUS,
            message: UNEXPECTED_MESSAGE.to_string(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The success value, if this outcome is one.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The failure, if this outcome is one.
    pub fn failure(self) -> Option<Failure<E>> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }
}
