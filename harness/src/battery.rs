//! The fixed set of comparison cases.
//!
//! Each case pairs one immutable record with one set of options and lists the
//! keys every strategy's output must (or must not) contain.

use chrono::NaiveDate;
use skipcheck_engine::{AnnotatedPerson, Decimal, Model, Person, SerializerOptions, SkipPolicy};

/// Key-level checks applied to every strategy's output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectations {
    /// Keys that must appear
    pub present: Vec<String>,
    /// Keys that must not appear
    pub absent: Vec<String>,
    /// Keys that must be written as an explicit `null`
    pub null_markers: Vec<String>,
}

fn owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// One record under one configuration.
pub struct Case {
    pub id: &'static str,
    pub title: &'static str,
    pub record: Box<dyn Model>,
    pub options: SerializerOptions,
    pub expect: Expectations,
}

impl Case {
    pub fn new(
        id: &'static str,
        title: &'static str,
        record: impl Model + 'static,
        options: SerializerOptions,
    ) -> Self {
        Self {
            id,
            title,
            record: Box::new(record),
            options,
            expect: Expectations::default(),
        }
    }

    pub fn expect_present(mut self, keys: &[&str]) -> Self {
        self.expect.present = owned(keys);
        self
    }

    pub fn expect_absent(mut self, keys: &[&str]) -> Self {
        self.expect.absent = owned(keys);
        self
    }

    pub fn expect_null(mut self, keys: &[&str]) -> Self {
        self.expect.null_markers = owned(keys);
        self
    }
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case")
            .field("id", &self.id)
            .field("type", &self.record.type_name())
            .field("options", &self.options)
            .finish()
    }
}

const ALL_KEYS: [&str; 5] = ["Name", "Age", "BirthDate", "IsActive", "Salary"];

fn sparse(name: &str) -> Person {
    Person {
        name: Some(name.to_string()),
        is_active: Some(true),
        ..Person::default()
    }
}

/// The standard battery, in run order.
pub fn standard_battery() -> Vec<Case> {
    let compact = SerializerOptions::new();

    vec![
        Case::new(
            "baseline",
            "No skip policy: absent values are written as null",
            sparse("John Doe"),
            compact,
        )
        .expect_present(&ALL_KEYS)
        .expect_null(&["Age", "BirthDate", "Salary"]),
        Case::new(
            "baseline-pretty",
            "No skip policy, indented output",
            sparse("John Doe"),
            compact.pretty(true),
        )
        .expect_present(&ALL_KEYS)
        .expect_null(&["Age", "BirthDate", "Salary"]),
        Case::new(
            "when-null",
            "Global WhenNull drops absent fields",
            sparse("Test User"),
            compact.skip(SkipPolicy::WhenNull),
        )
        .expect_present(&["Name", "IsActive"])
        .expect_absent(&["Age", "BirthDate", "Salary"]),
        Case::new(
            "when-default",
            "Global WhenDefault keeps explicit 0 and false",
            Person {
                age: Some(0),
                is_active: Some(false),
                ..Person::default()
            },
            compact.skip(SkipPolicy::WhenDefault),
        )
        .expect_present(&["Age", "IsActive"])
        .expect_absent(&["Name", "BirthDate", "Salary"]),
        Case::new(
            "field-override",
            "Field-level WhenDefault under global Never",
            AnnotatedPerson::from(sparse("Jane Doe")),
            compact,
        )
        .expect_present(&["Name", "IsActive"])
        .expect_absent(&["Age", "BirthDate", "Salary"]),
        Case::new(
            "field-override-global-null",
            "Field-level WhenDefault under global WhenNull",
            AnnotatedPerson::from(sparse("Jane Doe")),
            compact.skip(SkipPolicy::WhenNull),
        )
        .expect_present(&["Name", "IsActive"])
        .expect_absent(&["Age", "BirthDate", "Salary"]),
        Case::new(
            "field-override-unannotated",
            "Unannotated field still follows global Never",
            AnnotatedPerson {
                is_active: Some(false),
                ..AnnotatedPerson::default()
            },
            compact,
        )
        .expect_present(&["Name", "IsActive"])
        .expect_absent(&["Age", "BirthDate", "Salary"])
        .expect_null(&["Name"]),
        Case::new(
            "never",
            "Global Never writes every absent field as null",
            Person::default(),
            compact.skip(SkipPolicy::Never),
        )
        .expect_present(&ALL_KEYS)
        .expect_null(&ALL_KEYS),
        Case::new(
            "all-values-present",
            "Global WhenNull with every value present",
            Person {
                name: Some("Test User".into()),
                age: Some(25),
                birth_date: NaiveDate::from_ymd_opt(1999, 1, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0)),
                is_active: Some(true),
                salary: Some(Decimal::whole(50000)),
            },
            compact.skip(SkipPolicy::WhenNull),
        )
        .expect_present(&ALL_KEYS),
        Case::new(
            "empty-string-vs-null",
            "Global WhenNull keeps an empty string",
            Person {
                name: Some(String::new()),
                ..Person::default()
            },
            compact.skip(SkipPolicy::WhenNull),
        )
        .expect_present(&["Name"])
        .expect_absent(&["Age", "BirthDate", "IsActive", "Salary"]),
        Case::new(
            "mixed-values",
            "Global WhenNull with mixed null and present values",
            Person {
                name: Some("Test User".into()),
                age: Some(30),
                is_active: Some(true),
                ..Person::default()
            },
            compact.skip(SkipPolicy::WhenNull),
        )
        .expect_present(&["Name", "Age", "IsActive"])
        .expect_absent(&["BirthDate", "Salary"]),
    ]
}
