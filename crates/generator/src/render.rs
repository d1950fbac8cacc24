//! Text emission for generated documents.

use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::debug;

use ghflow_types::Workflow;

use crate::document::Document;
use crate::generate::generate;
use crate::options::RenderOptions;

/// Error raised while turning a document into text.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize workflow document: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Generates and serializes `workflow` in one call.
pub fn render(workflow: &Workflow, options: &RenderOptions) -> Result<String, RenderError> {
    render_document(generate(workflow), options)
}

/// Serializes an already generated document.
pub fn render_document(document: Document, options: &RenderOptions) -> Result<String, RenderError> {
    render_value(document.into_value(), options)
}

/// Serializes any plain YAML structure with the same option handling as [`render`], so callers
/// can compare generated text against a hand-built structure.
pub fn render_value(value: Value, options: &RenderOptions) -> Result<String, RenderError> {
    debug!(sort_keys = options.sort_keys, no_refs = options.no_refs, "rendering workflow document");
    let value = if options.sort_keys { sort_keys(value) } else { value };
    Ok(serde_yaml::to_string(&value)?)
}

/// Recursively orders every mapping by key. String keys compare bytewise; non-string keys sort
/// before them and keep their relative order.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<(Value, Value)> = mapping
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            entries.sort_by(|(left, _), (right, _)| left.as_str().cmp(&right.as_str()));
            Value::Mapping(entries.into_iter().collect::<Mapping>())
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
