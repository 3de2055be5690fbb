//! Per-contract compilation into request/success/exception types and a
//! call-binding expression.
//!
//! No contract's compilation depends on any other contract's; the only
//! cross-contract step is the id-uniqueness check in the assembler.

use restbind_model::Contract;

use crate::emitter::emit;
use crate::error::GenerateError;
use crate::refs::{merge_references, references};
use crate::ts::{Emit, TsType, escape_ts_string};

/// The compiled form of one contract: the three type expressions of its
/// signature plus everything the assembler needs to place its binding.
#[derive(Debug, Clone)]
pub struct CompiledContract {
    pub id: String,
    pub url: String,
    pub method: String,
    /// Type of the request body.
    pub request: TsType,
    /// Type of the code-200 response body.
    pub success: TsType,
    /// Union of all non-200 response body types; `never` when the
    /// contract declares no domain failure.
    pub exceptions: TsType,
    /// External reference ids this contract's shapes depend on, in
    /// first-occurrence order across request body then responses.
    pub references: Vec<String>,
}

/// Compile a single contract.
pub fn compile(contract: &Contract) -> Result<CompiledContract, GenerateError> {
    let success_body = contract
        .success_response()
        .ok_or_else(|| GenerateError::MissingSuccessResponse(contract.id.clone()))?;

    let request = emit(&contract.request_body)?;
    let success = emit(&success_body.body)?;
    let exceptions = TsType::union(
        contract
            .failure_responses()
            .map(|r| emit(&r.body))
            .collect::<Result<Vec<_>, _>>()?,
    );

    let reference_sets: Vec<Vec<String>> = std::iter::once(&contract.request_body)
        .chain(contract.responses.iter().map(|r| &r.body))
        .map(references)
        .collect();

    Ok(CompiledContract {
        id: contract.id.clone(),
        url: contract.url.clone(),
        method: contract.method.clone(),
        request,
        success,
        exceptions,
        references: merge_references(reference_sets.iter().map(Vec::as_slice)),
    })
}

impl CompiledContract {
    /// The binding expression evaluated against the dispatch engine:
    /// `call<Request, Success, Exceptions>(url, method, options)`.
    pub fn binding_expr(&self) -> String {
        format!(
            "call<{}, {}, {}>(\"{}\", \"{}\", options)",
            self.request.emit(),
            self.success.emit(),
            self.exceptions.emit(),
            escape_ts_string(&self.url),
            escape_ts_string(&self.method),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use restbind_model::{Model, ResponseSpec};

    use super::*;

    fn dictionary(fields: Vec<(&str, Model)>) -> Model {
        Model::Dictionary {
            fields: fields
                .into_iter()
                .map(|(name, model)| restbind_model::DictionaryField {
                    name: name.into(),
                    model,
                    optional: false,
                })
                .collect(),
        }
    }

    fn contract(responses: Vec<ResponseSpec>) -> Contract {
        Contract {
            id: "getUser".into(),
            url: "/users/${id}".into(),
            method: "GET".into(),
            request_body: dictionary(vec![]),
            responses,
        }
    }

    fn ok_body() -> Model {
        dictionary(vec![("name", Model::String { enum_values: None, format: None })])
    }

    #[test]
    fn test_compile_without_failures_has_never_exceptions() {
        let compiled =
            compile(&contract(vec![ResponseSpec { code: 200, body: ok_body() }])).unwrap();
        assert_eq!(compiled.request.emit(), "{}");
        assert_eq!(compiled.success.emit(), "{ name: string }");
        assert_eq!(compiled.exceptions.emit(), "never");
    }

    #[test]
    fn test_compile_unions_the_failure_shapes() {
        let compiled = compile(&contract(vec![
            ResponseSpec { code: 200, body: ok_body() },
            ResponseSpec {
                code: 404,
                body: dictionary(vec![(
                    "code",
                    Model::String {
                        enum_values: Some(vec!["NotFound".into()]),
                        format: None,
                    },
                )]),
            },
            ResponseSpec {
                code: 403,
                body: dictionary(vec![(
                    "code",
                    Model::String {
                        enum_values: Some(vec!["Forbidden".into()]),
                        format: None,
                    },
                )]),
            },
        ]))
        .unwrap();
        assert_eq!(
            compiled.exceptions.emit(),
            "{ code: \"NotFound\" } | { code: \"Forbidden\" }"
        );
    }

    #[test]
    fn test_missing_success_response_is_fatal() {
        let err = compile(&contract(vec![ResponseSpec {
            code: 404,
            body: ok_body(),
        }]))
        .unwrap_err();
        assert_eq!(err, GenerateError::MissingSuccessResponse("getUser".into()));
    }

    #[test]
    fn test_references_cross_request_and_responses() {
        let mut c = contract(vec![
            ResponseSpec { code: 200, body: Model::Reference { id: "User".into() } },
            ResponseSpec { code: 404, body: Model::Reference { id: "ApiError".into() } },
        ]);
        c.request_body = dictionary(vec![("query", Model::Reference { id: "Query".into() })]);
        let compiled = compile(&c).unwrap();
        assert_eq!(compiled.references, vec!["Query", "User", "ApiError"]);
    }

    #[test]
    fn test_binding_expr_shape() {
        let compiled =
            compile(&contract(vec![ResponseSpec { code: 200, body: ok_body() }])).unwrap();
        assert_eq!(
            compiled.binding_expr(),
            "call<{}, { name: string }, never>(\"/users/${id}\", \"GET\", options)"
        );
    }
}
