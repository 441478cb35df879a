//! # Skipcheck Engine
//!
//! Two interchangeable JSON serialization strategies for nullable records, and
//! the helpers needed to compare what they produce.
//!
//! The engine exists to check one property: for any record and any set of
//! options, the reflective and the precompiled strategy write byte-identical
//! JSON. A divergence between them is the defect signal the harness reports.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine returns strings; printing is the caller's concern
//! - **Deterministic**: same record and options always produce the same text
//! - **Declaration order**: fields are written in the order the type declares them
//!
//! ## Core Concepts
//!
//! ### Models
//!
//! A [`Model`] exposes its field values in declaration order and a runtime
//! [`TypeDescription`] of its fields. [`Person`] carries no per-field
//! annotations; [`AnnotatedPerson`] marks its optional fields with a
//! field-level [`SkipPolicy`].
//!
//! ### Skip Policies
//!
//! - [`SkipPolicy::Never`] - always write the field, absent values as `null`
//! - [`SkipPolicy::WhenNull`] - omit the field when the value is absent
//! - [`SkipPolicy::WhenDefault`] - omit the field when the value is the
//!   default of an optional field, which is "absent"; `0` and `false` are kept
//!
//! A field-level policy always wins over the global one in [`SerializerOptions`].
//!
//! ### Strategies
//!
//! - [`Strategy::Reflective`] asks the record for its type description on every call
//! - [`Strategy::Precompiled`] reads a [`SerializerContext`] built once ahead of time
//!
//! ## Quick Start
//!
//! ```rust
//! use skipcheck_engine::{
//!     outputs_equal, AnnotatedPerson, Person, SerializerContext, Serializer,
//!     SerializerOptions, SkipPolicy, Strategy,
//! };
//!
//! let context = SerializerContext::new()
//!     .with_type(Person::description())
//!     .with_type(AnnotatedPerson::description());
//! let serializer = Serializer::new(context);
//!
//! let record = Person {
//!     name: Some("Test User".into()),
//!     is_active: Some(true),
//!     ..Person::default()
//! };
//! let options = SerializerOptions::new().skip(SkipPolicy::WhenNull);
//!
//! let reflective = serializer.serialize(&record, &options, Strategy::Reflective).unwrap();
//! let precompiled = serializer.serialize(&record, &options, Strategy::Precompiled).unwrap();
//!
//! assert_eq!(reflective, r#"{"Name":"Test User","IsActive":true}"#);
//! assert!(outputs_equal(&reflective, &precompiled));
//! ```

pub mod compare;
pub mod context;
pub mod error;
pub mod model;
pub mod policy;
pub mod schema;
pub mod serializer;
pub mod value;

// Re-export main types at crate root
pub use compare::{
    contains_key, has_null_marker, normalize_whitespace, outputs_equal, presence_diff,
    PresenceDiff,
};
pub use context::{FieldMetadata, SerializerContext, TypeMetadata, CONTEXT_FORMAT_VERSION};
pub use error::Error;
pub use model::{AnnotatedPerson, Model, Person};
pub use policy::SkipPolicy;
pub use schema::{FieldDef, FieldType, TypeDescription};
pub use serializer::{Serializer, SerializerOptions, Strategy};
pub use value::{Decimal, FieldValue};

/// Type aliases for clarity
pub type TypeName = String;
pub type FieldName = String;
pub type FormatVersion = u32;
