// ABOUTME: Manifest template loading and placeholder substitution.
// ABOUTME: Rendering is a pure tree walk producing a new document per call.

use serde_yaml::Value;
use serde_yaml::value::TaggedValue;
use std::path::Path;
use std::sync::Arc;

use crate::config::ConfigError;

use super::VariableSet;

/// A parsed manifest template, shared read-only between concurrent renders.
#[derive(Debug, Clone)]
pub struct Template {
    root: Arc<Value>,
}

impl Template {
    pub fn new(root: Value) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml).map(Self::new)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Template {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn render(&self, variables: &VariableSet) -> Value {
        render(&self.root, variables)
    }
}

/// Substitute every `{{KEY}}` occurrence in the string leaves of `template`.
///
/// Container shape, mapping keys and non-string scalars are preserved.
/// Placeholders without a matching key are left as they are. Values are
/// inserted verbatim, so a value containing `{{...}}` would be substituted
/// again by a later render pass.
pub fn render(template: &Value, variables: &VariableSet) -> Value {
    match template {
        Value::String(s) => Value::String(substitute(s, variables)),
        Value::Sequence(items) => Value::Sequence(
            items
                .iter()
                .map(|item| render(item, variables))
                .collect(),
        ),
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .iter()
                .map(|(key, value)| (key.clone(), render(value, variables)))
                .collect(),
        ),
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: render(&tagged.value, variables),
        })),
        Value::Null | Value::Bool(_) | Value::Number(_) => template.clone(),
    }
}

/// Literal, non-overlapping replacement of each placeholder in key order.
pub fn substitute(input: &str, variables: &VariableSet) -> String {
    let mut output = input.to_string();
    for (key, value) in variables.iter() {
        let placeholder = format!("{{{{{key}}}}}");
        if output.contains(&placeholder) {
            output = output.replace(&placeholder, value);
        }
    }
    output
}
