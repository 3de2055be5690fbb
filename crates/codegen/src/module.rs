//! Assembly of compiled contracts into one generated module.
//!
//! The module carries a header comment with the generator version and
//! timestamp, the runtime import for the selected engine flavor, the
//! `ModelReferenceIds` constraint object (one required slot per external
//! reference id), the generic `Contracts` alias, and the `makeClient`
//! factory with one binding per contract.

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::contract::CompiledContract;
use crate::error::GenerateError;
use crate::refs::merge_references;
use crate::ts::{Emit, quote_if_needed};

/// Which Runtime Dispatch Engine implementation the generated bindings
/// link against. The external contract is identical across flavors; only
/// the import path differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeFlavor {
    /// Browser-style fetch transport.
    #[default]
    Browser,
    /// Direct socket transport.
    Node,
}

impl RuntimeFlavor {
    /// Import path of the runtime module for this flavor.
    pub fn import_path(&self) -> &'static str {
        match self {
            RuntimeFlavor::Browser => "@restbind/runtime/browser",
            RuntimeFlavor::Node => "@restbind/runtime/node",
        }
    }
}

/// Static options of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub runtime: RuntimeFlavor,
    /// Timestamp recorded in the header comment; defaults to now.
    /// Injectable so tests and reproducible builds get stable output.
    pub generated_at: Option<DateTime<Utc>>,
}

/// Assemble the generated module text from a batch of compiled contracts.
///
/// The only cross-contract concerns live here: the id-uniqueness check
/// and the union of all reference sets.
pub fn assemble(
    contracts: &[CompiledContract],
    options: &GenerateOptions,
) -> Result<String, GenerateError> {
    let mut ids = HashSet::new();
    for contract in contracts {
        if !ids.insert(contract.id.as_str()) {
            return Err(GenerateError::DuplicateContractId(contract.id.clone()));
        }
    }

    let reference_ids = merge_references(contracts.iter().map(|c| c.references.as_slice()));
    debug!(
        contracts = contracts.len(),
        references = reference_ids.len(),
        "Assembling generated module."
    );

    let timestamp = options
        .generated_at
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut out = String::new();
    out.push_str(&format!(
        "// Generated by restbind v{} at {}. Do not edit by hand.\n",
        env!("CARGO_PKG_VERSION"),
        timestamp
    ));
    out.push_str(&format!(
        "import {{ call, type RequestOptions }} from \"{}\";\n\n",
        options.runtime.import_path()
    ));

    if reference_ids.is_empty() {
        out.push_str("export type ModelReferenceIds = {};\n\n");
    } else {
        out.push_str("export type ModelReferenceIds = {\n");
        for id in &reference_ids {
            out.push_str(&format!("  {}: unknown;\n", quote_if_needed(id)));
        }
        out.push_str("};\n\n");
    }

    out.push_str("export type Contracts<ModelReferences extends ModelReferenceIds> = {\n");
    for contract in contracts {
        out.push_str(&format!("  {}: {{\n", quote_if_needed(&contract.id)));
        out.push_str(&format!("    request: {};\n", contract.request.emit()));
        out.push_str(&format!("    success: {};\n", contract.success.emit()));
        out.push_str(&format!("    exceptions: {};\n", contract.exceptions.emit()));
        out.push_str("  };\n");
    }
    out.push_str("};\n\n");

    out.push_str(
        "export function makeClient<ModelReferences extends ModelReferenceIds>(options: RequestOptions) {\n",
    );
    out.push_str("  return {\n");
    for contract in contracts {
        out.push_str(&format!(
            "    {}: {},\n",
            quote_if_needed(&contract.id),
            contract.binding_expr()
        ));
    }
    out.push_str("  };\n");
    out.push_str("}\n");

    Ok(out)
}
