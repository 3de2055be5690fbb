//! The closed value-shape description used by contracts.

use serde::{Deserialize, Serialize};

/// A closed, recursive tagged union describing the shape of a value.
///
/// The variant set is closed by construction: serde rejects any
/// unrecognized `"type"` tag at parse time, and every consumer matches
/// exhaustively over the enum. The one open seam is [`Model::Special`],
/// whose `kind` is carried verbatim and validated by the type emitter
/// (only `any`, `unknown` and `undefined` are passthrough kinds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Model {
    /// A boolean value.
    Boolean,
    /// A number, optionally restricted to an enumerated literal set.
    Number {
        #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
        enum_values: Option<Vec<f64>>,
    },
    /// A string, optionally restricted to an enumerated literal set and
    /// optionally tagged with a semantic format (e.g. `date-time`).
    ///
    /// The format tag is metadata only; it never changes the emitted type.
    String {
        #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
        enum_values: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    /// A homogeneous list of elements.
    Array { items: Box<Model> },
    /// A fixed-length heterogeneous list; element order is significant.
    Tuple { items: Vec<Model> },
    /// A structural record; field order is significant and preserved.
    Dictionary { fields: Vec<DictionaryField> },
    /// A homogeneous keyed collection.
    Map { key: Box<Model>, value: Box<Model> },
    /// One of several alternative shapes, in declaration order.
    Union { variants: Vec<Model> },
    /// A named, externally-resolved type. The referenced type is never
    /// expanded here; the consumer of the generated module supplies it.
    Reference { id: String },
    /// A passthrough kind: `any`, `unknown` or `undefined`. Any other
    /// kind is a schema/compiler version mismatch and fails compilation.
    Special { kind: String },
}

/// One named field of a [`Model::Dictionary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryField {
    pub name: String,
    pub model: Model,
    #[serde(default)]
    pub optional: bool,
}
