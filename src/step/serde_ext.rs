//! Field adapters for the loosely typed data the designer has stored over the years.

use super::StepModel;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser};
use serde_json::{Map, Value};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

pub(crate) fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Accepts `30`, `"30"`, `""` and `null` for optional counters and durations.
pub(crate) fn optional_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => u32::try_from(n).map(Some).map_err(de::Error::custom),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// Menu digits were stored as numbers by older editors.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

/// Reads a stored `null` as the field's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Treats a missing, `null` or `{}` value as absent.
pub(crate) fn non_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// Writes an embedded step in its canonical form, `kind` included.
pub(crate) fn canonical<M, S>(step: &M, serializer: S) -> Result<S::Ok, S::Error>
where
    M: StepModel,
    S: Serializer,
{
    step.to_canonical()
        .map_err(ser::Error::custom)?
        .serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "optional_u32")]
        count: Option<u32>,
        #[serde(default, deserialize_with = "string_or_number")]
        digits: String,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    fn probe(value: Value) -> Result<Probe, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_optional_u32_accepts_numbers_and_numeric_text() {
        assert_eq!(probe(json!({"count": 30})).unwrap().count, Some(30));
        assert_eq!(probe(json!({"count": " 12 "})).unwrap().count, Some(12));
        assert_eq!(probe(json!({"count": ""})).unwrap().count, None);
        assert_eq!(probe(json!({"count": null})).unwrap().count, None);
        assert_eq!(probe(json!({})).unwrap().count, None);
        assert!(probe(json!({"count": "soon"})).is_err());
    }

    #[test]
    fn test_string_or_number_normalizes_digits() {
        assert_eq!(probe(json!({"digits": 1})).unwrap().digits, "1");
        assert_eq!(probe(json!({"digits": "#9"})).unwrap().digits, "#9");
        assert!(probe(json!({"digits": [1]})).is_err());
    }

    #[test]
    fn test_null_as_default_reads_null_as_empty() {
        assert!(probe(json!({"tags": null})).unwrap().tags.is_empty());
        assert_eq!(probe(json!({"tags": ["a"]})).unwrap().tags, vec!["a"]);
        assert!(probe(json!({"tags": 3})).is_err());
    }
}
