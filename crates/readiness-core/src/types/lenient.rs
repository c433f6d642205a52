//! Field-level decoders for upstream JSON.
//!
//! A field with an unexpected type decodes to its default instead of failing
//! the whole item. Only the caller decides which fields are required.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::finding::EvidenceType;

/// The field as `T`, or `T::default()` when it has any other shape.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Identifiers arrive as strings or numbers. Blank strings are absent.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Day numbers as integers or labels such as `"Day 3"`. Entries without a
/// day number are dropped; an empty result is absent.
pub(crate) fn day_list<'de, D>(deserializer: D) -> Result<Option<Vec<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(None);
    };
    let days: Vec<u32> = entries.iter().filter_map(day_number).collect();
    Ok((!days.is_empty()).then_some(days))
}

fn day_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .rev()
                .take_while(char::is_ascii_digit)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Evidence type names; non-string entries are dropped.
pub(crate) fn evidence_list<'de, D>(deserializer: D) -> Result<Option<Vec<EvidenceType>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .filter(Value::is_string)
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
    ))
}

pub(crate) fn evidence_vec<'de, D>(deserializer: D) -> Result<Vec<EvidenceType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(evidence_list(deserializer)?.unwrap_or_default())
}

/// A list decoded entry by entry. Entries that fail to decode are dropped
/// with a warning.
pub(crate) fn lossy_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping undecodable list entry");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn day_labels_yield_their_number() {
        assert_eq!(day_number(&json!("Day 3")), Some(3));
        assert_eq!(day_number(&json!(" 12 ")), Some(12));
        assert_eq!(day_number(&json!(4)), Some(4));
        assert_eq!(day_number(&json!("arrival")), None);
        assert_eq!(day_number(&json!(-1)), None);
    }
}
