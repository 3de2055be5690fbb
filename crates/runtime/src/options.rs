//! Static and per-call options of a binding.

use std::collections::HashMap;
use std::fmt;

/// The `(url, method)` pair an overrider hook may rewrite before the
/// binding is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: String,
    pub method: String,
}

/// Hook applied to the raw `(url template, method)` pair, before URL
/// variables are substituted.
pub type Overrider = Box<dyn Fn(Target) -> Target + Send + Sync>;

/// Static options fixed at binding-construction time.
#[derive(Default)]
pub struct RequestOptions {
    /// Values substituted into `${name}` placeholders of the URL
    /// template. Resolution happens once, at construction.
    pub variables: HashMap<String, String>,
    /// Headers sent on every call; override the defaults and are
    /// overridden by per-call headers.
    pub headers: Vec<(String, String)>,
    /// Optional rewrite of the `(url, method)` pair, applied first.
    pub overrider: Option<Overrider>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn overrider(mut self, overrider: impl Fn(Target) -> Target + Send + Sync + 'static) -> Self {
        self.overrider = Some(Box::new(overrider));
        self
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("variables", &self.variables)
            .field("headers", &self.headers)
            .field("overrider", &self.overrider.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Options of a single invocation. Per-call headers take precedence over
/// the static layer.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub headers: Vec<(String, String)>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
