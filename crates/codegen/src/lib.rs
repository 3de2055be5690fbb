//! Contract → TypeScript binding compiler.
//!
//! The pipeline mirrors the data flow of the system:
//! 1. Compile: each [`Contract`] into its `{request, success, exceptions}`
//!    type expressions and binding expression (`contract`)
//! 2. Assemble: all compiled contracts into one generated module,
//!    parameterized over the externally-supplied reference types
//!    (`module`)
//!
//! The per-model building blocks (the type emitter and the reference
//! extractor) are pure functions over the closed [`Model`] variant set.
//! Every error here is generation-time and fatal: the run aborts whole
//! with no partial output.
//!
//! [`Model`]: restbind_model::Model

mod contract;
mod emitter;
mod error;
mod module;
mod refs;
pub mod ts;

use restbind_model::Contract;
use tracing::debug;

pub use contract::{CompiledContract, compile};
pub use emitter::{MODEL_REFERENCES_PARAM, emit};
pub use error::GenerateError;
pub use module::{GenerateOptions, RuntimeFlavor, assemble};
pub use refs::{merge_references, references};

/// Generate the module text for a batch of contracts.
pub fn generate(contracts: &[Contract], options: &GenerateOptions) -> Result<String, GenerateError> {
    let compiled = contracts
        .iter()
        .map(|contract| {
            debug!(id = %contract.id, url = %contract.url, "Compiling contract.");
            compile(contract)
        })
        .collect::<Result<Vec<_>, _>>()?;
    assemble(&compiled, options)
}
