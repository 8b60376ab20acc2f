//! Records and record collections

use std::collections::BTreeMap;
use std::collections::btree_map;

use gitdata_fs::{NormalizedPath, io};
use serde_json::Value;
use serde_yaml::Value as YamlValue;

use crate::format::Format;
use crate::{Error, Result};

/// One decoded record file.
///
/// Changes to [`data`](Self::data) stay in memory until [`save`](Self::save).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    key: String,
    path: NormalizedPath,
    format: Format,
    /// Decoded file content
    pub data: Value,
    /// YAML document as read, so unedited parts are saved verbatim
    document: Option<YamlValue>,
}

impl Record {
    pub fn new(key: impl Into<String>, path: NormalizedPath, format: Format, data: Value) -> Self {
        Self {
            key: key.into(),
            path,
            format,
            data,
            document: None,
        }
    }

    /// Read and decode a record file.
    pub fn load(path: NormalizedPath, format: Format) -> Result<Self> {
        let key = path
            .stem()
            .map(str::to_string)
            .ok_or_else(|| Error::data_load(path.to_native(), "path has no file name"))?;
        let content = io::read_text(&path)
            .map_err(|e| Error::data_load(path.to_native(), e.to_string()))?;
        let (data, document) = format
            .decode_document(&content)
            .map_err(|message| Error::data_load(path.to_native(), format!("invalid {format}: {message}")))?;

        Ok(Self {
            document,
            ..Self::new(key, path, format, data)
        })
    }

    /// The file name without its extension.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn data_mut(&mut self) -> &mut Value {
        &mut self.data
    }

    /// Look up a field by JSON pointer, e.g. `/from/stream`.
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.data.pointer(pointer)
    }

    /// Set a top-level field; non-object content is replaced by an object.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        if !self.data.is_object() {
            self.data = Value::Object(Default::default());
        }
        if let Value::Object(map) = &mut self.data {
            map.insert(field.into(), value.into());
        }
    }

    /// Set a field addressed by dots, e.g. `from.stream`, creating
    /// intermediate objects and replacing non-object values on the way.
    pub fn set_dotted(&mut self, field: &str, value: impl Into<Value>) {
        let mut parts = field.split('.').peekable();
        let mut current = &mut self.data;
        while let Some(part) = parts.next() {
            if !current.is_object() {
                *current = Value::Object(Default::default());
            }
            let Value::Object(map) = current else {
                return;
            };
            if parts.peek().is_none() {
                map.insert(part.to_string(), value.into());
                return;
            }
            current = map.entry(part).or_insert(Value::Null);
        }
    }

    /// Overwrite the source file with the current content.
    ///
    /// For YAML, values the caller did not touch are written exactly as they
    /// were read, including tags, `.inf`/`.nan` and non-string keys.
    pub fn save(&self) -> Result<()> {
        let content = self
            .format
            .encode_over(&self.data, self.document.as_ref())
            .map_err(|message| Error::data_load(self.path.to_native(), message))?;
        io::write_text(&self.path, &content)
            .map_err(|e| Error::data_load(self.path.to_native(), e.to_string()))?;
        tracing::debug!(key = %self.key, path = %self.path, "Saved record");
        Ok(())
    }
}

/// Records from one load, keyed by [`Record::key`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordCollection {
    records: BTreeMap<String, Record>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, replacing any record with the same key.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.key.clone(), record)
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.records.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.records.values_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl std::ops::Index<&str> for RecordCollection {
    type Output = Record;

    fn index(&self, key: &str) -> &Record {
        self.records
            .get(key)
            .unwrap_or_else(|| panic!("no record with key '{key}'"))
    }
}

impl IntoIterator for RecordCollection {
    type Item = (String, Record);
    type IntoIter = btree_map::IntoIter<String, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<Record> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}
