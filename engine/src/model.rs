//! Record models.
//!
//! Both models carry the same five optional fields. [`Person`] leaves every
//! skip decision to the global policy; [`AnnotatedPerson`] pins
//! `WhenDefault` on all fields except `Name`.

use crate::{Decimal, FieldDef, FieldType, FieldValue, SkipPolicy, TypeDescription};
use chrono::NaiveDateTime;

/// A record the serializer can write.
pub trait Model {
    /// Name the precompiled context is keyed by.
    fn type_name(&self) -> &str;

    /// Runtime type description, consulted by the reflective strategy.
    fn describe(&self) -> TypeDescription;

    /// Field values in declaration order.
    fn field_values(&self) -> Vec<Option<FieldValue>>;
}

/// Plain record: no per-field annotations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub birth_date: Option<NaiveDateTime>,
    pub is_active: Option<bool>,
    pub salary: Option<Decimal>,
}

impl Person {
    pub const TYPE_NAME: &'static str = "Person";

    pub fn description() -> TypeDescription {
        TypeDescription::new(
            Self::TYPE_NAME,
            vec![
                FieldDef::new("Name", FieldType::Text),
                FieldDef::new("Age", FieldType::Integer),
                FieldDef::new("BirthDate", FieldType::Timestamp),
                FieldDef::new("IsActive", FieldType::Boolean),
                FieldDef::new("Salary", FieldType::Decimal),
            ],
        )
    }
}

impl Model for Person {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn describe(&self) -> TypeDescription {
        Self::description()
    }

    fn field_values(&self) -> Vec<Option<FieldValue>> {
        vec![
            self.name.clone().map(FieldValue::from),
            self.age.map(FieldValue::from),
            self.birth_date.map(FieldValue::from),
            self.is_active.map(FieldValue::from),
            self.salary.map(FieldValue::from),
        ]
    }
}

/// Annotated record: optional fields carry their own `WhenDefault` policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotatedPerson {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub birth_date: Option<NaiveDateTime>,
    pub is_active: Option<bool>,
    pub salary: Option<Decimal>,
}

impl AnnotatedPerson {
    pub const TYPE_NAME: &'static str = "AnnotatedPerson";

    pub fn description() -> TypeDescription {
        let skip = SkipPolicy::WhenDefault;
        TypeDescription::new(
            Self::TYPE_NAME,
            vec![
                FieldDef::new("Name", FieldType::Text),
                FieldDef::with_skip("Age", FieldType::Integer, skip),
                FieldDef::with_skip("BirthDate", FieldType::Timestamp, skip),
                FieldDef::with_skip("IsActive", FieldType::Boolean, skip),
                FieldDef::with_skip("Salary", FieldType::Decimal, skip),
            ],
        )
    }
}

impl Model for AnnotatedPerson {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn describe(&self) -> TypeDescription {
        Self::description()
    }

    fn field_values(&self) -> Vec<Option<FieldValue>> {
        vec![
            self.name.clone().map(FieldValue::from),
            self.age.map(FieldValue::from),
            self.birth_date.map(FieldValue::from),
            self.is_active.map(FieldValue::from),
            self.salary.map(FieldValue::from),
        ]
    }
}

impl From<Person> for AnnotatedPerson {
    fn from(p: Person) -> Self {
        Self {
            name: p.name,
            age: p.age,
            birth_date: p.birth_date,
            is_active: p.is_active,
            salary: p.salary,
        }
    }
}
