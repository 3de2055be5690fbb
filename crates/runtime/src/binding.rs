//! Binding construction and call dispatch.
//!
//! A binding is constructed once per contract: the overrider hook runs
//! first, then URL variables are substituted, and the resolved URL and
//! method stay fixed for the binding's lifetime. Invocations are
//! independent asynchronous operations sharing no mutable state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::error::{BindError, TransportError};
use crate::options::{CallOptions, RequestOptions, Target};
use crate::outcome::{Failure, Outcome};
use crate::transport::{Transport, TransportRequest};

/// Characters left verbatim by query-value encoding, matching JavaScript's
/// `encodeURIComponent`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A callable bound to one contract's resolved URL and method.
pub struct Binding {
    url: String,
    method: String,
    headers: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Construct a binding from a URL template, method and static options.
///
/// The overrider hook, if present, rewrites the raw `(url, method)` pair
/// before anything else. Variable resolution is a construction-time
/// concern: a placeholder with no matching variable fails here, not at
/// call time.
pub fn bind(
    url_template: &str,
    method: &str,
    options: &RequestOptions,
    transport: Arc<dyn Transport>,
) -> Result<Binding, BindError> {
    let target = Target {
        url: url_template.to_string(),
        method: method.to_string(),
    };
    let target = match &options.overrider {
        Some(overrider) => overrider(target),
        None => target,
    };

    let url = resolve_variables(&target.url, &options.variables)?;
    debug!(%url, method = %target.method, "Constructed binding.");

    Ok(Binding {
        url,
        method: target.method,
        headers: options.headers.clone(),
        transport,
    })
}

impl Binding {
    /// The fully-resolved URL, fixed at construction.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The (possibly overridden) HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Invoke the binding. Always resolves; transport and parsing
    /// breakdowns come back as the unexpected-failure outcome, never as
    /// a raised error.
    pub async fn call<B, S, E>(&self, body: &B, per_call: Option<&CallOptions>) -> Outcome<S, E>
    where
        B: Serialize + Sync + ?Sized,
        S: DeserializeOwned,
        E: DeserializeOwned,
    {
        match self.dispatch(body, per_call).await {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(error = %err, url = %self.url, "Call failed unexpectedly.");
                Outcome::unexpected()
            }
        }
    }

    async fn dispatch<B, S, E>(
        &self,
        body: &B,
        per_call: Option<&CallOptions>,
    ) -> Result<Outcome<S, E>, DispatchError>
    where
        B: Serialize + Sync + ?Sized,
        S: DeserializeOwned,
        E: DeserializeOwned,
    {
        let payload = serde_json::to_value(body).map_err(DispatchError::Serialize)?;

        // Lowest precedence first; each layer overrides same-named keys.
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in &self.headers {
            merge_header(&mut headers, name, value);
        }
        if let Some(options) = per_call {
            for (name, value) in &options.headers {
                merge_header(&mut headers, name, value);
            }
        }

        let (url, request_body) = if is_query_method(&self.method) {
            (append_query(&self.url, &payload), None)
        } else {
            let serialized =
                serde_json::to_string(&payload).map_err(DispatchError::Serialize)?;
            (self.url.clone(), Some(serialized))
        };

        let response = self
            .transport
            .send(TransportRequest {
                url,
                method: self.method.clone(),
                headers,
                body: request_body,
            })
            .await?;

        if response.status == 200 {
            let value = serde_json::from_str(&response.body).map_err(DispatchError::Parse)?;
            Ok(Outcome::Success(value))
        } else {
            let value = serde_json::from_str(&response.body).map_err(DispatchError::Parse)?;
            Ok(Outcome::Failure(Failure::Domain {
                status: response.status,
                body: value,
            }))
        }
    }
}

/// Call-time breakdowns, all converted into the unexpected outcome.
#[derive(Debug, Error)]
enum DispatchError {
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse response payload: {0}")]
    Parse(#[source] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Methods whose body is serialized into the query string instead of a
/// payload.
fn is_query_method(method: &str) -> bool {
    method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("HEAD")
}

/// Substitute `${name}` placeholders left-most first until none remain.
/// Substituted values are themselves re-scanned, as in the original
/// template semantics.
fn resolve_variables(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, BindError> {
    let mut url = template.to_string();
    while let Some(start) = url.find("${") {
        let Some(close) = url[start..].find('}') else {
            break;
        };
        let end = start + close;
        let name = url[start + 2..end].to_string();
        let value = variables
            .get(&name)
            .ok_or(BindError::MissingVariable(name))?;
        url.replace_range(start..=end, value);
    }
    Ok(url)
}

fn merge_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

/// Serialize the body's top-level pairs into a percent-encoded query
/// string. Non-object and empty bodies append nothing.
fn append_query(url: &str, payload: &Value) -> String {
    let Value::Object(entries) = payload else {
        return url.to_string();
    };
    if entries.is_empty() {
        return url.to_string();
    }
    let query = entries
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(&query_value(value))))
        .collect::<Vec<_>>()
        .join("&");
    format!("{url}?{query}")
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, QUERY_VALUE).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::*;
    use crate::outcome::{UNEXPECTED_MESSAGE, UNEXPECTED_STATUS};
    use crate::transport::TransportResponse;

    /// Records every request and answers with a fixed response.
    struct StubTransport {
        status: u16,
        body: String,
        seen: Mutex<Vec<TransportRequest>>,
    }

    impl StubTransport {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> TransportRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            Ok(TransportResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(
            &self,
            _request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            Err(TransportError("connection refused".into()))
        }
    }

    fn options_with_id() -> RequestOptions {
        RequestOptions::new().variable("id", "42")
    }

    #[test]
    fn test_bind_resolves_variables() {
        let transport = StubTransport::new(200, "{}");
        let binding = bind("/users/${id}", "GET", &options_with_id(), transport).unwrap();
        assert_eq!(binding.url(), "/users/42");
        assert_eq!(binding.method(), "GET");
    }

    #[test]
    fn test_bind_resolves_repeated_and_multiple_variables() {
        let transport = StubTransport::new(200, "{}");
        let options = RequestOptions::new()
            .variable("base", "http://api")
            .variable("id", "7");
        let binding = bind("${base}/users/${id}/items/${id}", "GET", &options, transport).unwrap();
        assert_eq!(binding.url(), "http://api/users/7/items/7");
    }

    #[test]
    fn test_bind_missing_variable_fails_at_construction() {
        let transport = StubTransport::new(200, "{}");
        let err = bind("/users/${id}", "GET", &RequestOptions::new(), transport).unwrap_err();
        assert_eq!(err, BindError::MissingVariable("id".into()));
    }

    #[test]
    fn test_overrider_runs_before_substitution() {
        let transport = StubTransport::new(200, "{}");
        let options = options_with_id().overrider(|target| Target {
            url: format!("/v2{}", target.url),
            method: "POST".into(),
        });
        let binding = bind("/users/${id}", "GET", &options, transport).unwrap();
        assert_eq!(binding.url(), "/v2/users/42");
        assert_eq!(binding.method(), "POST");
    }

    #[tokio::test]
    async fn test_get_serializes_body_into_query_string() {
        let transport = StubTransport::new(200, "{}");
        let binding = bind("/search", "GET", &RequestOptions::new(), transport.clone()).unwrap();
        let _: Outcome<Value, Value> =
            binding.call(&json!({ "a": "x y", "b": "y", "n": 3 }), None).await;

        let request = transport.last_request();
        assert_eq!(request.url, "/search?a=x%20y&b=y&n=3");
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_get_with_empty_body_appends_no_query() {
        let transport = StubTransport::new(200, "{}");
        let binding = bind("/ping", "GET", &RequestOptions::new(), transport.clone()).unwrap();
        let _: Outcome<Value, Value> = binding.call(&json!({}), None).await;
        assert_eq!(transport.last_request().url, "/ping");
    }

    #[tokio::test]
    async fn test_post_sends_json_payload_and_no_query() {
        let transport = StubTransport::new(200, "{}");
        let binding = bind("/users", "POST", &RequestOptions::new(), transport.clone()).unwrap();
        let _: Outcome<Value, Value> = binding.call(&json!({ "name": "Ann" }), None).await;

        let request = transport.last_request();
        assert_eq!(request.url, "/users");
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Ann"}"#));
    }

    #[tokio::test]
    async fn test_header_merge_precedence() {
        let transport = StubTransport::new(200, "{}");
        let options = RequestOptions::new()
            .header("X-Token", "static")
            .header("Accept", "application/json");
        let binding = bind("/users", "POST", &options, transport.clone()).unwrap();
        let per_call = CallOptions::new().header("x-token", "per-call");
        let _: Outcome<Value, Value> = binding.call(&json!({}), Some(&per_call)).await;

        let headers = transport.last_request().headers;
        assert!(headers.contains(&("Content-Type".into(), "application/json".into())));
        assert!(headers.contains(&("Accept".into(), "application/json".into())));
        // Per-call layer wins, its spelling included.
        assert!(headers.contains(&("x-token".into(), "per-call".into())));
        assert!(!headers.iter().any(|(_, v)| v == "static"));
    }

    #[tokio::test]
    async fn test_static_headers_override_the_default_content_type() {
        let transport = StubTransport::new(200, "{}");
        let options = RequestOptions::new().header("Content-Type", "application/vnd.api+json");
        let binding = bind("/users", "POST", &options, transport.clone()).unwrap();
        let _: Outcome<Value, Value> = binding.call(&json!({}), None).await;

        let headers = transport.last_request().headers;
        let content_types: Vec<_> = headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
            .collect();
        assert_eq!(content_types, vec![&("Content-Type".into(), "application/vnd.api+json".into())]);
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct User {
        name: String,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct NotFound {
        code: String,
        message: String,
    }

    #[tokio::test]
    async fn test_status_200_classifies_as_success() {
        let transport = StubTransport::new(200, r#"{"name":"Ann"}"#);
        let binding = bind("/users/42", "GET", &RequestOptions::new(), transport).unwrap();
        let outcome: Outcome<User, NotFound> = binding.call(&json!({}), None).await;
        assert_eq!(outcome.success().unwrap(), User { name: "Ann".into() });
    }

    #[tokio::test]
    async fn test_other_status_classifies_as_domain_failure() {
        let transport =
            StubTransport::new(404, r#"{"code":"NotFound","message":"no such user"}"#);
        let binding = bind("/users/42", "GET", &RequestOptions::new(), transport).unwrap();
        let outcome: Outcome<User, NotFound> = binding.call(&json!({}), None).await;
        assert_eq!(
            outcome.failure().unwrap(),
            Failure::Domain {
                status: 404,
                body: NotFound { code: "NotFound".into(), message: "no such user".into() },
            }
        );
    }

    #[tokio::test]
    async fn test_transport_error_becomes_unexpected_failure() {
        let binding =
            bind("/users/42", "GET", &RequestOptions::new(), Arc::new(FailingTransport)).unwrap();
        let outcome: Outcome<User, NotFound> = binding.call(&json!({}), None).await;
        assert_eq!(
            outcome.failure().unwrap(),
            Failure::Unexpected {
                status: UNEXPECTED_STATUS,
                message: UNEXPECTED_MESSAGE.into(),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_becomes_unexpected_failure() {
        let transport = StubTransport::new(200, "not json");
        let binding = bind("/users/42", "GET", &RequestOptions::new(), transport).unwrap();
        let outcome: Outcome<User, NotFound> = binding.call(&json!({}), None).await;
        assert!(matches!(
            outcome.failure().unwrap(),
            Failure::Unexpected { status: 0, .. }
        ));
    }
}
