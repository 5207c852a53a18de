//! Declared configuration shapes.
//!
//! A [`Schema`] describes the attributes a host may set or read on the
//! provider or on a resource. It is plain data; rendering it for a specific
//! plugin protocol is the host's concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
}

/// One attribute of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub kind: AttributeType,
    pub description: String,
    /// The host must supply this attribute.
    pub required: bool,
    /// The provider fills in this attribute.
    pub computed: bool,
    /// The host must redact this attribute in output.
    pub sensitive: bool,
}

impl Attribute {
    /// A string the host must configure.
    pub fn required_string(description: impl Into<String>) -> Self {
        Self {
            kind: AttributeType::String,
            description: description.into(),
            required: true,
            computed: false,
            sensitive: false,
        }
    }

    /// A string the provider computes.
    pub fn computed_string(description: impl Into<String>) -> Self {
        Self {
            kind: AttributeType::String,
            description: description.into(),
            required: false,
            computed: true,
            sensitive: false,
        }
    }

    /// Mark the attribute sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Attributes keyed by name, plus a description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// An empty schema with a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of attributes the host must supply.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.required)
            .map(|(name, _)| name.as_str())
    }

    /// Names of attributes marked sensitive.
    pub fn sensitive(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.sensitive)
            .map(|(name, _)| name.as_str())
    }
}
