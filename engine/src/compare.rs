//! Text-level comparison of serializer outputs.
//!
//! Everything here works on the written JSON, the same way a consumer of the
//! output would see it. Key presence only looks at the keys of the top-level
//! object, never at string values.

use crate::FieldName;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Remove whitespace outside string literals.
///
/// Pretty printing only adds whitespace between tokens, so two outputs that
/// differ only in formatting normalize to the same text.
pub fn normalize_whitespace(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            ' ' | '\t' | '\n' | '\r' => {}
            '"' => {
                in_string = true;
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

/// Whether two outputs are equal once insignificant whitespace is removed.
pub fn outputs_equal(a: &str, b: &str) -> bool {
    a == b || normalize_whitespace(a) == normalize_whitespace(b)
}

fn top_level(json: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(json) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Whether the output object has the key, whatever its value.
///
/// Text that is not a JSON object has no keys.
pub fn contains_key(json: &str, key: &str) -> bool {
    top_level(json).is_some_and(|map| map.contains_key(key))
}

/// Whether the key is written with an explicit `null`.
pub fn has_null_marker(json: &str, key: &str) -> bool {
    top_level(json).is_some_and(|map| map.get(key).is_some_and(Value::is_null))
}

/// A key present in one output and absent from the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceDiff {
    pub key: FieldName,
    pub in_first: bool,
    pub in_second: bool,
}

/// Keys whose presence differs between two outputs, in the order given.
pub fn presence_diff<'a, I>(first: &str, second: &str, keys: I) -> Vec<PresenceDiff>
where
    I: IntoIterator<Item = &'a str>,
{
    let first = top_level(first).unwrap_or_default();
    let second = top_level(second).unwrap_or_default();

    keys.into_iter()
        .filter_map(|key| {
            let in_first = first.contains_key(key);
            let in_second = second.contains_key(key);
            (in_first != in_second).then(|| PresenceDiff {
                key: key.to_string(),
                in_first,
                in_second,
            })
        })
        .collect()
}
