//! Precompiled serializer context.
//!
//! The context is the metadata table the precompiled strategy reads instead of
//! asking a record for its description. It is built once, keyed by type name,
//! and can be persisted to JSON and restored with deterministic ordering.

use crate::{
    error::Result, Error, FieldName, FieldType, FormatVersion, SkipPolicy, TypeDescription,
    TypeName,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the context format for future compatibility.
pub const CONTEXT_FORMAT_VERSION: FormatVersion = 1;

/// Resolved metadata for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    /// Output key
    pub key: FieldName,
    /// Declared type
    pub field_type: FieldType,
    /// Field-level skip policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<SkipPolicy>,
    /// Whether a text encoding exists for `field_type`
    pub encodable: bool,
}

/// Resolved metadata for one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMetadata {
    pub name: TypeName,
    /// Fields in declaration order
    pub fields: Vec<FieldMetadata>,
}

impl TypeMetadata {
    /// Resolve metadata from a type description.
    pub fn compile(description: &TypeDescription) -> Self {
        let fields = description
            .fields
            .iter()
            .map(|f| FieldMetadata {
                key: f.name.clone(),
                field_type: f.field_type,
                skip: f.skip,
                encodable: f.field_type.is_encodable(),
            })
            .collect();

        Self {
            name: description.name.clone(),
            fields,
        }
    }
}

/// Metadata table for every registered record type.
///
/// Uses BTreeMap instead of HashMap for deterministic serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializerContext {
    /// Context format version
    pub format_version: FormatVersion,
    /// Metadata by type name
    pub types: BTreeMap<TypeName, TypeMetadata>,
}

impl Default for SerializerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SerializerContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self {
            format_version: CONTEXT_FORMAT_VERSION,
            types: BTreeMap::new(),
        }
    }

    /// Register a type, replacing any previous metadata under the same name.
    pub fn register(&mut self, description: TypeDescription) -> &mut Self {
        let metadata = TypeMetadata::compile(&description);
        self.types.insert(metadata.name.clone(), metadata);
        self
    }

    /// Builder-style method to register a type.
    pub fn with_type(mut self, description: TypeDescription) -> Self {
        self.register(description);
        self
    }

    /// Get metadata for a type.
    pub fn get(&self, type_name: &str) -> Result<&TypeMetadata> {
        self.types
            .get(type_name)
            .ok_or_else(|| Error::MissingTypeMetadata(type_name.to_string()))
    }

    /// Check whether a type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Serialize to JSON with deterministic ordering.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidContext(e.to_string()))
    }

    /// Serialize to pretty JSON with deterministic ordering.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidContext(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let context: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidContext(e.to_string()))?;

        if context.format_version > CONTEXT_FORMAT_VERSION {
            return Err(Error::ContextVersionTooNew {
                found: context.format_version,
                supported: CONTEXT_FORMAT_VERSION,
            });
        }

        // Keys must agree with the metadata they hold
        for (name, metadata) in &context.types {
            if name != &metadata.name {
                return Err(Error::InvalidContext(format!(
                    "type registered as '{}' describes '{}'",
                    name, metadata.name
                )));
            }
        }

        Ok(context)
    }
}
