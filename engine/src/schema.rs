//! Type descriptions.
//!
//! A [`TypeDescription`] is what the reflective strategy discovers about a
//! record at call time, and what the precompiled context captures once at
//! registration.

use crate::{error::Result, Error, FieldName, FieldValue, SkipPolicy, TypeName};
use serde::{Deserialize, Serialize};

/// Semantic types a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Integer,
    Timestamp,
    Boolean,
    Decimal,
    /// Raw bytes; no text encoding is defined
    Binary,
}

impl FieldType {
    /// Whether values of this type can be written as JSON.
    pub fn is_encodable(self) -> bool {
        !matches!(self, FieldType::Binary)
    }

    /// Fail with [`Error::UnsupportedFieldType`] unless this type is encodable.
    pub fn ensure_encodable(self, field: &str) -> Result<()> {
        if self.is_encodable() {
            Ok(())
        } else {
            Err(Error::UnsupportedFieldType {
                field: field.to_string(),
                field_type: self.to_string(),
            })
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Text => write!(f, "Text"),
            FieldType::Integer => write!(f, "Integer"),
            FieldType::Timestamp => write!(f, "Timestamp"),
            FieldType::Boolean => write!(f, "Boolean"),
            FieldType::Decimal => write!(f, "Decimal"),
            FieldType::Binary => write!(f, "Binary"),
        }
    }
}

/// Definition of a field in a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    /// Output key
    pub name: FieldName,
    /// Field type
    pub field_type: FieldType,
    /// Field-level skip policy, overriding the global one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<SkipPolicy>,
}

impl FieldDef {
    /// Create a field that follows the global skip policy.
    pub fn new(name: impl Into<FieldName>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            skip: None,
        }
    }

    /// Create a field carrying its own skip policy.
    pub fn with_skip(name: impl Into<FieldName>, field_type: FieldType, skip: SkipPolicy) -> Self {
        Self {
            name: name.into(),
            field_type,
            skip: Some(skip),
        }
    }

    /// Check that a present value matches the declared type.
    pub fn check_value(&self, value: Option<&FieldValue>) -> Result<()> {
        match value {
            None => Ok(()),
            Some(v) if v.field_type() == self.field_type => Ok(()),
            Some(v) => Err(Error::TypeMismatch {
                field: self.name.clone(),
                expected: self.field_type.to_string(),
                got: v.field_type().to_string(),
            }),
        }
    }
}

/// Runtime description of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescription {
    /// Type name, used as the precompiled context key
    pub name: TypeName,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl TypeDescription {
    /// Create a new type description.
    pub fn new(name: impl Into<TypeName>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Look up a field by its output key.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Output keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Validate a record's values against this description.
    pub fn check_values(&self, values: &[Option<FieldValue>]) -> Result<()> {
        if values.len() != self.fields.len() {
            return Err(Error::FieldCountMismatch {
                type_name: self.name.clone(),
                expected: self.fields.len(),
                actual: values.len(),
            });
        }

        for (field, value) in self.fields.iter().zip(values) {
            field.check_value(value.as_ref())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_description() -> TypeDescription {
        TypeDescription::new(
            "Account",
            vec![
                FieldDef::new("Owner", FieldType::Text),
                FieldDef::with_skip("Balance", FieldType::Decimal, SkipPolicy::WhenNull),
                FieldDef::new("Open", FieldType::Boolean),
            ],
        )
    }

    #[test]
    fn check_matching_values() {
        let desc = test_description();
        let values = vec![
            Some(FieldValue::from("Alice")),
            None,
            Some(FieldValue::Boolean(false)),
        ];
        assert!(desc.check_values(&values).is_ok());
    }

    #[test]
    fn check_wrong_type() {
        let desc = test_description();
        let values = vec![Some(FieldValue::Integer(3)), None, None];
        let result = desc.check_values(&values);

        assert!(matches!(result, Err(Error::TypeMismatch { field, .. }) if field == "Owner"));
    }

    #[test]
    fn check_wrong_arity() {
        let desc = test_description();
        let result = desc.check_values(&[None, None]);

        assert!(matches!(
            result,
            Err(Error::FieldCountMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn keys_follow_declaration_order() {
        let desc = test_description();
        let keys: Vec<_> = desc.keys().collect();
        assert_eq!(keys, vec!["Owner", "Balance", "Open"]);
        assert_eq!(
            desc.field("Balance").and_then(|f| f.skip),
            Some(SkipPolicy::WhenNull)
        );
    }

    #[test]
    fn binary_is_unsupported() {
        assert!(FieldType::Decimal.ensure_encodable("Salary").is_ok());
        assert!(matches!(
            FieldType::Binary.ensure_encodable("Avatar"),
            Err(Error::UnsupportedFieldType { field, field_type })
                if field == "Avatar" && field_type == "Binary"
        ));
    }

    #[test]
    fn field_type_display() {
        assert_eq!(FieldType::Text.to_string(), "Text");
        assert_eq!(FieldType::Timestamp.to_string(), "Timestamp");
        assert_eq!(FieldType::Binary.to_string(), "Binary");
    }

    #[test]
    fn description_serialization() {
        let desc = test_description();
        let json = serde_json::to_string(&desc).unwrap();
        assert!(json.contains("fieldType"));
        assert!(json.contains("\"skip\":\"whenNull\""));

        let parsed: TypeDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(desc, parsed);
    }
}
