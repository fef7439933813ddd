use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::core::constants::defaults;

/// Which half of the directory a tool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    Personal,
    Enterprise,
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolType::Personal => write!(f, "personal"),
            ToolType::Enterprise => write!(f, "enterprise"),
        }
    }
}

/// One entry of the tool directory.
///
/// The record is kept as the ordered JSON object it was read from, so fields this
/// crate knows nothing about (and the original key order) survive a rewrite of the
/// data file. Typed accessors cover the fields the audit and the fixer use.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tool {
    fields: Map<String, Value>,
}

impl Tool {
    /// Create a tool with the three fields every record is expected to carry.
    ///
    /// # Examples
    /// ```
    /// use toolaudit::core::Tool;
    ///
    /// let tool = Tool::new("7", "Pitch", "https://pitch.com");
    /// assert_eq!(tool.name(), "Pitch");
    /// assert_eq!(tool.id(), "7");
    /// ```
    pub fn new(id: &str, name: &str, source_url: &str) -> Self {
        Self::default()
            .with_field("id", id)
            .with_field("name", name)
            .with_field("source_url", source_url)
    }

    /// Set a field, returning the tool for chaining.
    pub fn with_field<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// The id as text. Numeric ids are rendered, a missing id is empty.
    pub fn id(&self) -> String {
        match self.fields.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => String::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or_default()
    }

    pub fn source_url(&self) -> &str {
        self.str_field("source_url").unwrap_or_default()
    }

    pub fn short_description(&self) -> &str {
        self.str_field("short_description").unwrap_or_default()
    }

    pub fn category(&self) -> Option<&str> {
        self.str_field("category")
    }

    /// Enterprise sector, `"Unknown"` when the record has none.
    pub fn sector(&self) -> &str {
        self.str_field("sector").unwrap_or(defaults::UNKNOWN_SECTOR)
    }

    /// Anything that is not explicitly `"personal"` counts as enterprise.
    pub fn tool_type(&self) -> ToolType {
        match self.str_field("type") {
            Some("personal") => ToolType::Personal,
            _ => ToolType::Enterprise,
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.fields
            .insert("name".to_string(), Value::String(name.to_string()));
    }

    pub fn set_source_url(&mut self, url: &str) {
        self.fields
            .insert("source_url".to_string(), Value::String(url.to_string()));
    }

    pub fn set_short_description(&mut self, description: &str) {
        self.fields.insert(
            "short_description".to_string(),
            Value::String(description.to_string()),
        );
    }

    /// Raw access to every field of the record.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.name(), self.id())
    }
}
