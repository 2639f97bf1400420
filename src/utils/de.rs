//! Deserialization helpers

use serde::{Deserialize, Deserializer};

/// Deserialize an explicit JSON `null` as `T::default()`
///
/// Pair with `#[serde(default)]` so absent and null fields behave the same.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        values: Vec<f64>,
    }

    #[test]
    fn test_null_and_absent_are_default() {
        let sample: Sample = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(sample.name, "");
        assert!(sample.values.is_empty());
    }

    #[test]
    fn test_present_value_kept() {
        let sample: Sample = serde_json::from_str(r#"{"name": "x", "values": [0.5]}"#).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.values, vec![0.5]);
    }

    #[test]
    fn test_wrong_type_still_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"values": "hot"}"#).is_err());
    }
}
