//! Serde helpers for PATCH payloads

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable PATCH field into `Option<Option<T>>`
///
/// Use with `#[serde(default)]`:
/// - field absent → `None` (leave the stored value alone)
/// - `null` → `Some(None)` (clear it)
/// - a value → `Some(Some(v))`
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        note: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.note, None);

        let cleared: Patch = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(cleared.note, Some(None));

        let set: Patch = serde_json::from_str(r#"{"note": "extra hot"}"#).unwrap();
        assert_eq!(set.note, Some(Some("extra hot".to_string())));
    }
}
