//! Runtime dispatch engine for contract bindings.
//!
//! This crate is the call-time half of restbind: given a contract's URL
//! template, method and static options it constructs a [`Binding`]
//! (resolving `${name}` URL variables once, up front), and each
//! invocation performs one exchange through the [`Transport`] seam and
//! classifies the response:
//!
//! - status 200 → [`Outcome::Success`] carrying the parsed success shape
//! - any other status → a declared domain failure carrying the parsed
//!   failure shape
//! - transport or parsing breakdowns → the catch-all unexpected failure
//!   (status marker 0, fixed message), never a raised error
//!
//! The engine is independent of the generator: the `restbind` CLI uses
//! it to invoke contracts directly, and the generated TypeScript
//! bindings link the same dispatch contract through their runtime
//! import.

mod binding;
mod error;
mod options;
mod outcome;
mod transport;

pub use binding::{Binding, bind};
pub use error::{BindError, TransportError};
pub use options::{CallOptions, Overrider, RequestOptions, Target};
pub use outcome::{Failure, Outcome, UNEXPECTED_MESSAGE, UNEXPECTED_STATUS};
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
