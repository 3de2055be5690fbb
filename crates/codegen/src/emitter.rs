//! Model → TypeScript type expression mapping.
//!
//! `emit` is pure and deterministic: the same model always produces an
//! identical type expression. It is total over the closed variant set;
//! the only failure is a `special` kind outside the passthrough set,
//! which aborts compilation (a schema/compiler version mismatch).

use restbind_model::Model;

use crate::error::GenerateError;
use crate::ts::{TsLiteral, TsPrimitive, TsProp, TsType};

/// Name of the open type parameter every reference indexes into.
pub const MODEL_REFERENCES_PARAM: &str = "ModelReferences";

/// Map a model to its TypeScript type expression.
pub fn emit(model: &Model) -> Result<TsType, GenerateError> {
    match model {
        Model::Boolean => Ok(TsType::Primitive(TsPrimitive::Boolean)),

        Model::Number { enum_values } => Ok(match enum_values {
            Some(values) => TsType::union(
                values
                    .iter()
                    .map(|n| TsType::Literal(TsLiteral::Number(*n)))
                    .collect(),
            ),
            None => TsType::Primitive(TsPrimitive::Number),
        }),

        // The format tag is semantic metadata; the emitted type is
        // unaffected by it.
        Model::String { enum_values, format: _ } => Ok(match enum_values {
            Some(values) => TsType::union(
                values
                    .iter()
                    .map(|s| TsType::Literal(TsLiteral::String(s.clone())))
                    .collect(),
            ),
            None => TsType::Primitive(TsPrimitive::String),
        }),

        Model::Array { items } => Ok(TsType::Array(Box::new(emit(items)?))),

        Model::Tuple { items } => Ok(TsType::Tuple(
            items.iter().map(emit).collect::<Result<Vec<_>, _>>()?,
        )),

        Model::Dictionary { fields } => {
            let props = fields
                .iter()
                .map(|f| {
                    Ok(TsProp {
                        name: f.name.clone(),
                        ty: emit(&f.model)?,
                        optional: f.optional,
                    })
                })
                .collect::<Result<Vec<_>, GenerateError>>()?;
            Ok(TsType::Object(props))
        }

        Model::Map { key, value } => Ok(TsType::Record {
            key: Box::new(emit(key)?),
            value: Box::new(emit(value)?),
        }),

        Model::Union { variants } => Ok(TsType::union(
            variants.iter().map(emit).collect::<Result<Vec<_>, _>>()?,
        )),

        Model::Reference { id } => Ok(TsType::Index {
            object: MODEL_REFERENCES_PARAM.to_string(),
            key: id.clone(),
        }),

        Model::Special { kind } => match kind.as_str() {
            "any" => Ok(TsType::Primitive(TsPrimitive::Any)),
            "unknown" => Ok(TsType::Primitive(TsPrimitive::Unknown)),
            "undefined" => Ok(TsType::Primitive(TsPrimitive::Undefined)),
            other => Err(GenerateError::UnsupportedModelVariant(other.to_string())),
        },
    }
}
