//! The HTTP endpoint descriptor parsed from contract files.

use serde::{Deserialize, Serialize};

use crate::Model;

/// Description of one HTTP endpoint.
///
/// The `url` is a template with zero or more `${name}` placeholders,
/// resolved at binding-construction time by the dispatch engine. The
/// `id` must be unique within a compilation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub url: String,
    pub method: String,
    pub request_body: Model,
    pub responses: Vec<ResponseSpec>,
}

/// One possible response of a contract, keyed by status code.
///
/// The entry with code 200 is the success case; every other entry is a
/// declared domain failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    pub code: u16,
    pub body: Model,
}

impl Contract {
    /// Parse a contract from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse contract: {e}"))
    }

    /// The success (code 200) response, if the contract declares one.
    ///
    /// Response order is preserved from the contract file; if a contract
    /// carries more than one 200 entry the first one wins.
    pub fn success_response(&self) -> Option<&ResponseSpec> {
        self.responses.iter().find(|r| r.code == 200)
    }

    /// All declared domain-failure responses (code != 200), in order.
    pub fn failure_responses(&self) -> impl Iterator<Item = &ResponseSpec> {
        self.responses.iter().filter(|r| r.code != 200)
    }
}
