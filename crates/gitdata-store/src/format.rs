//! Record file formats and their codecs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value as YamlValue};

/// Supported record formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Detect format from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }

    /// Decode file content into a generic value.
    pub fn decode(&self, source: &str) -> Result<Value, String> {
        self.decode_document(source).map(|(value, _)| value)
    }

    /// Decode file content, also returning the YAML document for YAML input.
    ///
    /// The JSON value is a view: `.inf`/`.nan` read as `null`, scalar keys
    /// as strings and tags are dropped. The document keeps all of it.
    pub(crate) fn decode_document(
        &self,
        source: &str,
    ) -> Result<(Value, Option<YamlValue>), String> {
        match self {
            Self::Json => serde_json::from_str(source)
                .map(|value| (value, None))
                .map_err(|e| e.to_string()),
            Self::Yaml => {
                let document: YamlValue = serde_yaml::from_str(source).map_err(|e| e.to_string())?;
                Ok((yaml_to_json(&document), Some(document)))
            }
        }
    }

    /// Encode `value`, reusing every part of `original` that `value` left
    /// unchanged.
    pub(crate) fn encode_over(
        &self,
        value: &Value,
        original: Option<&YamlValue>,
    ) -> Result<String, String> {
        match (self, original) {
            (Self::Yaml, Some(original)) => {
                serde_yaml::to_string(&merge_yaml(original, value)?).map_err(|e| e.to_string())
            }
            _ => self.encode(value),
        }
    }

    /// Encode a value as file content, ending with a newline.
    pub fn encode(&self, value: &Value) -> Result<String, String> {
        match self {
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(value)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| e.to_string()),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert YAML into the JSON data model, keeping key order.
///
/// Scalar keys (`4.1: ...`, `true: ...`) become their string form; tags
/// are dropped in favour of the tagged value.
fn yaml_to_json(value: &YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => Value::Array(items.iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

fn yaml_key(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn json_to_yaml(value: &Value) -> Result<YamlValue, String> {
    serde_yaml::to_value(value).map_err(|e| e.to_string())
}

/// Rebuild a YAML document from its edited JSON view.
///
/// Subtrees whose view is unchanged are taken from `original` as they are.
/// Changed mappings keep the original key of each surviving entry and follow
/// the key order of `current`; a changed tagged node keeps its tag.
fn merge_yaml(original: &YamlValue, current: &Value) -> Result<YamlValue, String> {
    if yaml_to_json(original) == *current {
        return Ok(original.clone());
    }

    match (original, current) {
        (YamlValue::Mapping(mapping), Value::Object(object)) => {
            let mut merged = Mapping::new();
            for (key, value) in object {
                let (key, value) = match mapping.iter().find(|(k, _)| yaml_key(k) == *key) {
                    Some((old_key, old_value)) => (old_key.clone(), merge_yaml(old_value, value)?),
                    None => (YamlValue::String(key.clone()), json_to_yaml(value)?),
                };
                merged.insert(key, value);
            }
            Ok(YamlValue::Mapping(merged))
        }
        (YamlValue::Sequence(items), Value::Array(values)) => values
            .iter()
            .enumerate()
            .map(|(i, value)| match items.get(i) {
                Some(item) => merge_yaml(item, value),
                None => json_to_yaml(value),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(YamlValue::Sequence),
        (YamlValue::Tagged(tagged), _) => Ok(YamlValue::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: merge_yaml(&tagged.value, current)?,
        }))),
        _ => json_to_yaml(current),
    }
}
