//! Extraction of externally-referenced type ids from models.
//!
//! Same recursive shape as the type emitter, but accumulating
//! `reference(id)` leaves instead of emitting types. Deduplication
//! preserves first-occurrence order so generated output stays
//! diff-friendly across runs.

use std::collections::HashSet;

use restbind_model::Model;

/// Collect the deduplicated, first-occurrence-ordered set of reference
/// ids reachable from a model.
pub fn references(model: &Model) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    collect(model, &mut seen, &mut out);
    out
}

/// Merge per-model reference sets, keeping first-occurrence order across
/// the whole sequence.
pub fn merge_references<'a, I>(sets: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for set in sets {
        for id in set {
            if seen.insert(id.clone()) {
                out.push(id.clone());
            }
        }
    }
    out
}

fn collect(model: &Model, seen: &mut HashSet<String>, out: &mut Vec<String>) {
    match model {
        Model::Boolean
        | Model::Number { .. }
        | Model::String { .. }
        | Model::Special { .. } => {}
        Model::Array { items } => collect(items, seen, out),
        Model::Tuple { items } | Model::Union { variants: items } => {
            for item in items {
                collect(item, seen, out);
            }
        }
        Model::Dictionary { fields } => {
            for field in fields {
                collect(&field.model, seen, out);
            }
        }
        Model::Map { key, value } => {
            collect(key, seen, out);
            collect(value, seen, out);
        }
        Model::Reference { id } => {
            if seen.insert(id.clone()) {
                out.push(id.clone());
            }
        }
    }
}
