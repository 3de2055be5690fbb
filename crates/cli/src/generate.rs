//! The `generate` subcommand: contracts directory in, module text out.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use restbind_codegen::{GenerateOptions, RuntimeFlavor};
use restbind_model::Contract;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory scanned recursively for contract `.json` files.
    #[arg(long)]
    pub contracts: PathBuf,

    /// Path the generated module is written to.
    #[arg(long)]
    pub out: PathBuf,

    /// Runtime engine flavor the generated bindings link against.
    #[arg(long, value_enum, default_value_t = Flavor::Browser)]
    pub runtime: Flavor,
}

/// CLI-facing spelling of the runtime flavor selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Flavor {
    Browser,
    Node,
}

impl From<Flavor> for RuntimeFlavor {
    fn from(flavor: Flavor) -> Self {
        match flavor {
            Flavor::Browser => RuntimeFlavor::Browser,
            Flavor::Node => RuntimeFlavor::Node,
        }
    }
}

pub fn run(args: &GenerateArgs) -> Result<(), String> {
    let contracts = load_contracts(&args.contracts)?;
    info!(contracts = contracts.len(), "Compiling contracts.");

    let options = GenerateOptions {
        runtime: args.runtime.into(),
        ..GenerateOptions::default()
    };
    let module = restbind_codegen::generate(&contracts, &options).map_err(|e| e.to_string())?;

    if let Some(parent) = args.out.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("Failed to create output directory: {err}"))?;
    }
    fs::write(&args.out, &module)
        .map_err(|err| format!("Failed to write {}: {err}", args.out.display()))?;

    info!(
        out = %args.out.display(),
        bytes = module.len(),
        "Generated module written."
    );
    Ok(())
}

/// Collect and parse every `.json` file under the contracts directory,
/// sorted by path so batch order (and therefore output) is reproducible.
fn load_contracts(dir: &Path) -> Result<Vec<Contract>, String> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(format!("No contract files found under {}", dir.display()));
    }

    let mut contracts = Vec::with_capacity(files.len());
    for path in files {
        let text = fs::read_to_string(&path)
            .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
        let contract = Contract::from_json(&text)
            .map_err(|err| format!("{}: {err}", path.display()))?;
        debug!(path = %path.display(), id = %contract.id, "Loaded contract.");
        contracts.push(contract);
    }
    Ok(contracts)
}
