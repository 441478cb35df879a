//! Serializer adapter.
//!
//! Both strategies reduce a record to the same thing: an ordered emission plan
//! of `(key, value)` pairs with skipped fields already removed. The plan is
//! then written through `serde_json`, compact or pretty. They differ only in
//! where field metadata comes from:
//!
//! - [`Strategy::Reflective`] calls [`Model::describe`] on every call
//! - [`Strategy::Precompiled`] looks the type up in a [`SerializerContext`]

use crate::{error::Result, Error, FieldValue, Model, SerializerContext, SkipPolicy};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

/// Where the serializer gets its field metadata from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Inspect the record's type description at call time
    Reflective,
    /// Use metadata registered ahead of time in the context
    Precompiled,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Reflective, Strategy::Precompiled];
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Reflective => write!(f, "Reflective"),
            Strategy::Precompiled => write!(f, "Precompiled"),
        }
    }
}

/// Global serialization options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializerOptions {
    /// Policy for fields without their own override
    pub skip: SkipPolicy,
    /// Indent output; cosmetic only
    pub pretty: bool,
}

impl SerializerOptions {
    /// Compact output, nothing skipped.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(mut self, skip: SkipPolicy) -> Self {
        self.skip = skip;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// One field to be written. `None` is written as `null`.
struct Entry<'a> {
    key: &'a str,
    value: Option<&'a FieldValue>,
}

struct Plan<'a>(Vec<Entry<'a>>);

impl Serialize for Plan<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(entry.key, &entry.value)?;
        }
        map.end()
    }
}

impl Plan<'_> {
    fn write(&self, pretty: bool) -> Result<String> {
        let written = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        written.map_err(|e| Error::Encoding(e.to_string()))
    }
}

/// Serializes records with either strategy.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    context: SerializerContext,
}

impl Serializer {
    /// Create a serializer backed by a precompiled context.
    pub fn new(context: SerializerContext) -> Self {
        Self { context }
    }

    /// The precompiled metadata this serializer uses.
    pub fn context(&self) -> &SerializerContext {
        &self.context
    }

    /// Serialize `record` with the given strategy.
    pub fn serialize(
        &self,
        record: &dyn Model,
        options: &SerializerOptions,
        strategy: Strategy,
    ) -> Result<String> {
        match strategy {
            Strategy::Reflective => self.serialize_reflective(record, options),
            Strategy::Precompiled => self.serialize_precompiled(record, options),
        }
    }

    /// Serialize from the type description the record supplies now.
    pub fn serialize_reflective(
        &self,
        record: &dyn Model,
        options: &SerializerOptions,
    ) -> Result<String> {
        let description = record.describe();
        let values = record.field_values();
        description.check_values(&values)?;

        let mut entries = Vec::with_capacity(values.len());
        for (field, value) in description.fields.iter().zip(&values) {
            field.field_type.ensure_encodable(&field.name)?;

            let policy = SkipPolicy::resolve(field.skip, options.skip);
            if !policy.skips(value.as_ref()) {
                entries.push(Entry {
                    key: &field.name,
                    value: value.as_ref(),
                });
            }
        }

        Plan(entries).write(options.pretty)
    }

    /// Serialize from metadata registered in the context.
    pub fn serialize_precompiled(
        &self,
        record: &dyn Model,
        options: &SerializerOptions,
    ) -> Result<String> {
        let metadata = self.context.get(record.type_name())?;
        let values = record.field_values();

        if values.len() != metadata.fields.len() {
            return Err(Error::FieldCountMismatch {
                type_name: metadata.name.clone(),
                expected: metadata.fields.len(),
                actual: values.len(),
            });
        }

        let mut entries = Vec::with_capacity(values.len());
        for (field, value) in metadata.fields.iter().zip(&values) {
            if !field.encodable {
                return Err(Error::UnsupportedFieldType {
                    field: field.key.clone(),
                    field_type: field.field_type.to_string(),
                });
            }
            if let Some(v) = value {
                if v.field_type() != field.field_type {
                    return Err(Error::TypeMismatch {
                        field: field.key.clone(),
                        expected: field.field_type.to_string(),
                        got: v.field_type().to_string(),
                    });
                }
            }

            let policy = SkipPolicy::resolve(field.skip, options.skip);
            if !policy.skips(value.as_ref()) {
                entries.push(Entry {
                    key: &field.key,
                    value: value.as_ref(),
                });
            }
        }

        Plan(entries).write(options.pretty)
    }
}
