//! TypeScript type expressions and their string emission.
//!
//! The generator never needs statements or a full expression AST: the
//! factory it produces has a single fixed shape. What it does need is a
//! faithful type-expression layer, emitted via the [`Emit`] trait.

/// Trait for emitting TypeScript source from AST nodes.
pub trait Emit {
    /// Convert the node to its TypeScript string representation.
    fn emit(&self) -> String;
}

/// TypeScript type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, never, ...
    Primitive(TsPrimitive),
    /// Literal type: `"foo"`, `42`
    Literal(TsLiteral),
    /// Array type: `T[]`
    Array(Box<TsType>),
    /// Tuple type: `[A, B, C]`
    Tuple(Vec<TsType>),
    /// Union type: `A | B | C`
    Union(Vec<TsType>),
    /// Structural object type: `{ foo: string; bar?: number }`
    Object(Vec<TsProp>),
    /// Keyed collection type: `Record<K, V>`
    Record {
        key: Box<TsType>,
        value: Box<TsType>,
    },
    /// Indexed access into a named type: `ModelReferences["User"]`
    Index { object: String, key: String },
}

impl TsType {
    /// Build a union, collapsing the degenerate cases: an empty union is
    /// `never`, a one-element union is the element itself.
    pub fn union(mut types: Vec<TsType>) -> TsType {
        match types.len() {
            0 => TsType::Primitive(TsPrimitive::Never),
            1 => types.remove(0),
            _ => TsType::Union(types),
        }
    }
}

/// TypeScript primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Any,
    Unknown,
    Undefined,
    Never,
}

/// TypeScript literal types.
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    String(String),
    Number(f64),
}

/// One property of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Any => "any",
            TsPrimitive::Unknown => "unknown",
            TsPrimitive::Undefined => "undefined",
            TsPrimitive::Never => "never",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("\"{}\"", escape_ts_string(s)),
            TsLiteral::Number(n) => n.to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Literal(lit) => lit.emit(),
            TsType::Array(inner) => {
                // Union elements need parentheses: (A | B)[]
                if matches!(**inner, TsType::Union(_)) {
                    format!("({})[]", inner.emit())
                } else {
                    format!("{}[]", inner.emit())
                }
            }
            TsType::Tuple(items) => {
                let items_str = items.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                format!("[{items_str}]")
            }
            TsType::Union(types) => types.iter().map(Emit::emit).collect::<Vec<_>>().join(" | "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(Emit::emit).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            TsType::Record { key, value } => {
                format!("Record<{}, {}>", key.emit(), value.emit())
            }
            TsType::Index { object, key } => {
                format!("{object}[\"{}\"]", escape_ts_string(key))
            }
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{key}{opt}: {}", self.ty.emit())
    }
}

/// Escape a string for use in a TypeScript double-quoted literal.
pub fn escape_ts_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Whether a name is a valid TypeScript identifier (usable unquoted as a
/// property key).
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Quote a property key unless it is a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", escape_ts_string(name))
    }
}
