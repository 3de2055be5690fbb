//! Data model for HTTP endpoint contracts.
//!
//! This crate defines the two inputs of the binding compiler:
//! - [`Model`]: a closed, recursive description of a value shape
//! - [`Contract`]: one HTTP endpoint (url template, method, request and
//!   response shapes)
//!
//! Both are plain data deserialized from contract JSON files; all logic
//! over them lives in `restbind-codegen` and `restbind-runtime`.

mod contract;
mod model;

pub use contract::{Contract, ResponseSpec};
pub use model::{DictionaryField, Model};
