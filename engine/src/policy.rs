//! Skip policies deciding whether a field is written.

use crate::FieldValue;
use serde::{Deserialize, Serialize};

/// Rule governing whether a field with a particular value is omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipPolicy {
    /// Always write the field; absent values become `null`.
    #[default]
    Never,
    /// Omit the field when its value is absent.
    WhenNull,
    /// Omit the field when its value equals the default of its type.
    ///
    /// Every field is optional, and the default of an optional is "absent",
    /// so a present `0`, `false` or `""` is still written.
    WhenDefault,
}

impl SkipPolicy {
    /// Effective policy for a field: its own override if it has one,
    /// otherwise the global policy.
    pub fn resolve(field_override: Option<SkipPolicy>, global: SkipPolicy) -> SkipPolicy {
        field_override.unwrap_or(global)
    }

    /// Whether a field holding `value` is left out of the output.
    pub fn skips(self, value: Option<&FieldValue>) -> bool {
        match self {
            SkipPolicy::Never => false,
            SkipPolicy::WhenNull | SkipPolicy::WhenDefault => value.is_none(),
        }
    }
}

impl std::fmt::Display for SkipPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipPolicy::Never => write!(f, "Never"),
            SkipPolicy::WhenNull => write!(f, "WhenNull"),
            SkipPolicy::WhenDefault => write!(f, "WhenDefault"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_takes_precedence() {
        assert_eq!(
            SkipPolicy::resolve(Some(SkipPolicy::WhenDefault), SkipPolicy::Never),
            SkipPolicy::WhenDefault
        );
        assert_eq!(
            SkipPolicy::resolve(Some(SkipPolicy::Never), SkipPolicy::WhenNull),
            SkipPolicy::Never
        );
        assert_eq!(
            SkipPolicy::resolve(None, SkipPolicy::WhenNull),
            SkipPolicy::WhenNull
        );
    }

    #[test]
    fn never_keeps_absent_values() {
        assert!(!SkipPolicy::Never.skips(None));
        assert!(!SkipPolicy::Never.skips(Some(&FieldValue::Integer(0))));
    }

    #[test]
    fn when_null_drops_only_absent() {
        assert!(SkipPolicy::WhenNull.skips(None));
        assert!(!SkipPolicy::WhenNull.skips(Some(&FieldValue::Text(String::new()))));
    }

    #[test]
    fn when_default_keeps_zero_and_false() {
        assert!(SkipPolicy::WhenDefault.skips(None));
        assert!(!SkipPolicy::WhenDefault.skips(Some(&FieldValue::Integer(0))));
        assert!(!SkipPolicy::WhenDefault.skips(Some(&FieldValue::Boolean(false))));
    }

    #[test]
    fn serialization_format() {
        let json = serde_json::to_string(&SkipPolicy::WhenDefault).unwrap();
        assert_eq!(json, "\"whenDefault\"");
        assert_eq!(SkipPolicy::default(), SkipPolicy::Never);
    }
}
