use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseInteger {
    Unsigned(u64),
    Float(f64),
    Text(String),
}

/// Reads an optional unsigned integer that may arrive as a JSON number, a
/// decimal string, or `null`. Strings that do not start with digits read as
/// absent, and fractional values are truncated.
pub fn deserialize_loose_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseInteger>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(LooseInteger::Unsigned(value)) => Some(value),
        Some(LooseInteger::Float(value)) if value.is_finite() && value >= 0.0 => {
            Some(value.trunc() as u64)
        }
        Some(LooseInteger::Float(_)) => None,
        Some(LooseInteger::Text(text)) => parse_leading_digits(&text),
    })
}

fn parse_leading_digits(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits: String = trimmed
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct LimitHolder {
        #[serde(default, deserialize_with = "deserialize_loose_u64")]
        value: Option<u64>,
    }

    fn decode_limit(raw: &str) -> Option<u64> {
        serde_json::from_str::<LimitHolder>(raw).expect("limit json").value
    }

    #[test]
    fn loose_integer_accepts_numbers_strings_and_null() {
        assert_eq!(decode_limit(r#"{"value": 600}"#), Some(600));
        assert_eq!(decode_limit(r#"{"value": "600"}"#), Some(600));
        assert_eq!(decode_limit(r#"{"value": "600s"}"#), Some(600));
        assert_eq!(decode_limit(r#"{"value": 2.75}"#), Some(2));
        assert_eq!(decode_limit(r#"{"value": null}"#), None);
        assert_eq!(decode_limit(r#"{}"#), None);
    }

    #[test]
    fn loose_integer_reads_garbage_as_absent() {
        assert_eq!(decode_limit(r#"{"value": "fast"}"#), None);
        assert_eq!(decode_limit(r#"{"value": ""}"#), None);
        assert_eq!(decode_limit(r#"{"value": -3}"#), None);
    }
}
