//! Serde adapters for the loose JSON a browser form produces: numbers may
//! arrive as strings, and empty inputs arrive as `""` or `null`.

/// `Option<T>` for select fields: `""`/`null` is no selection.
pub mod optional_select {
    use std::fmt;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: fmt::Display,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.trim().is_empty()).map(T::from))
    }
}

/// `Option<T>` for number inputs: accepts JSON numbers, numeric strings,
/// `""` and `null`.
pub mod optional_number {
    use std::fmt;
    use std::str::FromStr;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = Value::deserialize(deserializer)?;
        let text = match raw {
            Value::Null => return Ok(None),
            Value::String(s) => s,
            // Whole-valued floats (1850.0) must still parse as integers.
            Value::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 => format!("{f:.0}"),
                _ => n.to_string(),
            },
            other => {
                return Err(D::Error::custom(format!(
                    "expected a number or numeric string, got {other}"
                )))
            }
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<T>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("'{trimmed}': {e}")))
    }
}
