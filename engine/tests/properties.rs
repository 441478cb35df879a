//! Property tests over generated records and options.

use chrono::{DateTime, NaiveDateTime};
use proptest::prelude::*;
use skipcheck_engine::{
    contains_key, has_null_marker, outputs_equal, AnnotatedPerson, Decimal, Model, Person,
    Serializer, SerializerContext, SerializerOptions, SkipPolicy, Strategy as Mode,
};

fn serializer() -> Serializer {
    Serializer::new(
        SerializerContext::new()
            .with_type(Person::description())
            .with_type(AnnotatedPerson::description()),
    )
}

fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..4_102_444_800, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
        DateTime::from_timestamp(secs, nanos)
            .map(|dt| dt.naive_utc())
            .unwrap_or_default()
    })
}

fn decimal() -> impl Strategy<Value = Decimal> {
    (any::<i64>(), 0u32..24).prop_map(|(m, s)| Decimal::new(m, s))
}

prop_compose! {
    fn person()(
        name in proptest::option::of(prop_oneof![
            "[A-Za-z0-9 \\\\\"]{0,12}",
            Just("Age".to_string()),
            Just("\"Salary\":null".to_string()),
        ]),
        age in proptest::option::of(any::<i32>()),
        birth_date in proptest::option::of(timestamp()),
        is_active in proptest::option::of(any::<bool>()),
        salary in proptest::option::of(decimal()),
    ) -> Person {
        Person { name, age, birth_date, is_active, salary }
    }
}

fn skip_policy() -> impl Strategy<Value = SkipPolicy> {
    prop_oneof![
        Just(SkipPolicy::Never),
        Just(SkipPolicy::WhenNull),
        Just(SkipPolicy::WhenDefault),
    ]
}

fn options() -> impl Strategy<Value = SerializerOptions> {
    (skip_policy(), any::<bool>())
        .prop_map(|(skip, pretty)| SerializerOptions::new().skip(skip).pretty(pretty))
}

proptest! {
    #[test]
    fn strategies_produce_identical_output(record in person(), options in options()) {
        let s = serializer();
        let annotated = AnnotatedPerson::from(record.clone());
        let models: [&dyn Model; 2] = [&record, &annotated];

        for model in models {
            let a = s.serialize(model, &options, Mode::Reflective).unwrap();
            let b = s.serialize(model, &options, Mode::Precompiled).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn serialization_is_idempotent(record in person(), options in options()) {
        let s = serializer();
        for strategy in Mode::ALL {
            let first = s.serialize(&record, &options, strategy).unwrap();
            let second = s.serialize(&record, &options, strategy).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn output_is_valid_json(record in person(), options in options()) {
        let json = serializer()
            .serialize(&record, &options, Mode::Precompiled)
            .unwrap();
        prop_assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
    }

    #[test]
    fn presence_follows_policy(record in person(), skip in skip_policy()) {
        let options = SerializerOptions::new().skip(skip);
        let json = serializer()
            .serialize(&record, &options, Mode::Reflective)
            .unwrap();
        let parsed: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&json).unwrap();

        for (field, value) in Person::description().fields.iter().zip(record.field_values()) {
            let expected = match skip {
                SkipPolicy::Never => true,
                SkipPolicy::WhenNull | SkipPolicy::WhenDefault => value.is_some(),
            };
            prop_assert_eq!(parsed.contains_key(&field.name), expected);
            if skip == SkipPolicy::Never && value.is_none() {
                prop_assert!(has_null_marker(&json, &field.name));
            }
        }
    }

    #[test]
    fn pretty_flag_is_cosmetic(record in person(), skip in skip_policy()) {
        let s = serializer();
        let compact = SerializerOptions::new().skip(skip);
        let a = s.serialize(&record, &compact, Mode::Reflective).unwrap();
        let b = s.serialize(&record, &compact.pretty(true), Mode::Reflective).unwrap();
        prop_assert!(outputs_equal(&a, &b));
    }

    #[test]
    fn override_only_touches_annotated_fields(record in person(), skip in skip_policy()) {
        let annotated = AnnotatedPerson::from(record.clone());
        let json = serializer()
            .serialize(&annotated, &SerializerOptions::new().skip(skip), Mode::Precompiled)
            .unwrap();

        // Name has no override and follows the global policy
        let name_expected = skip == SkipPolicy::Never || record.name.is_some();
        prop_assert_eq!(contains_key(&json, "Name"), name_expected);

        // The rest always behave as WhenDefault
        prop_assert_eq!(contains_key(&json, "Age"), record.age.is_some());
        prop_assert_eq!(contains_key(&json, "IsActive"), record.is_active.is_some());
    }
}
