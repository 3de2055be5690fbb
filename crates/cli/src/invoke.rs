//! The `call` subcommand: bind one contract and invoke it directly.
//!
//! This drives the dispatch engine end to end against a live endpoint,
//! which makes it a convenient smoke test for a contract before (or
//! after) generating bindings from it.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use restbind_model::Contract;
use restbind_runtime::{Failure, HttpTransport, Outcome, RequestOptions, bind};
use serde_json::Value;
use tracing::info;

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Path of the contract file to invoke.
    pub contract: PathBuf,

    /// URL template variable, as NAME=VALUE. Repeatable.
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Extra request header, as NAME:VALUE. Repeatable.
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Request body as a JSON document.
    #[arg(long, default_value = "{}")]
    pub body: String,
}

pub async fn run(args: &CallArgs) -> Result<(), String> {
    let text = fs::read_to_string(&args.contract)
        .map_err(|err| format!("Failed to read {}: {err}", args.contract.display()))?;
    let contract = Contract::from_json(&text)?;

    let mut options = RequestOptions::new();
    for var in &args.vars {
        let (name, value) = var
            .split_once('=')
            .ok_or_else(|| format!("Invalid --var '{var}', expected NAME=VALUE"))?;
        options = options.variable(name, value);
    }
    for header in &args.headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| format!("Invalid --header '{header}', expected NAME:VALUE"))?;
        options = options.header(name, value.trim_start());
    }

    let body: Value = serde_json::from_str(&args.body)
        .map_err(|err| format!("Invalid --body JSON: {err}"))?;

    let transport = Arc::new(HttpTransport::new().map_err(|e| e.to_string())?);
    let binding =
        bind(&contract.url, &contract.method, &options, transport).map_err(|e| e.to_string())?;
    info!(id = %contract.id, url = %binding.url(), method = %binding.method(), "Calling contract.");

    let outcome: Outcome<Value, Value> = binding.call(&body, None).await;
    match outcome {
        Outcome::Success(value) => {
            println!("{}", pretty(&value)?);
            Ok(())
        }
        Outcome::Failure(Failure::Domain { status, body }) => {
            println!("{}", pretty(&body)?);
            Err(format!("Call to '{}' failed with status {status}", contract.id))
        }
        Outcome::Failure(Failure::Unexpected { status, message }) => Err(format!(
            "Call to '{}' failed unexpectedly: {message} (status {status})",
            contract.id
        )),
    }
}

fn pretty(value: &Value) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}
