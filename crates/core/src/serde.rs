//! Serde helper modules for entity fields.
//!
//! Timestamps are written as ISO-8601 strings with millisecond precision and a
//! `Z` suffix (`2024-01-15T10:30:00.000Z`). Any RFC 3339 string is accepted on
//! the way in. Decimals travel as JSON numbers, but numeric strings are
//! accepted too since resolver arguments are not always typed upstream. A
//! decimal that a JSON number cannot carry exactly is rejected on the way in.

use chrono::{DateTime, SecondsFormat, Utc};

/// Formats a timestamp the way it is stored.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `#[serde(with = "...")]` module for `Option<DateTime<Utc>>`.
pub mod optional_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_str(&super::format_timestamp(*timestamp)),
            None => serializer.serialize_none(),
        }
    }

    /// Empty strings deserialize as `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            Some(s) if !s.trim().is_empty() => DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

/// `#[serde(with = "...")]` module for `Option<Decimal>`.
pub mod optional_decimal {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(decimal) => match to_number(*decimal) {
                Some(number) => serializer.serialize_f64(number),
                None => Err(serde::ser::Error::custom(format!(
                    "decimal out of range: {decimal}"
                ))),
            },
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<Value> = Option::deserialize(deserializer)?;
        match raw {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => parse(&number.to_string()).map(Some),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => parse(s.trim()).map(Some),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected a decimal number, found {other}"
            ))),
        }
    }

    fn parse<E: serde::de::Error>(s: &str) -> Result<Decimal, E> {
        let decimal = Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|e| E::custom(format!("invalid decimal {s:?}: {e}")))?;
        if survives_f64(decimal) {
            Ok(decimal)
        } else {
            Err(E::custom(format!(
                "decimal {s:?} cannot be represented exactly as a number"
            )))
        }
    }

    /// Nearest `f64`, rounded once from the decimal text.
    fn to_number(decimal: Decimal) -> Option<f64> {
        decimal
            .to_string()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
    }

    /// Whether `serialize` writes `decimal` back without losing digits.
    fn survives_f64(decimal: Decimal) -> bool {
        to_number(decimal)
            .and_then(|number| Decimal::from_str(&number.to_string()).ok())
            .is_some_and(|written| written == decimal)
    }
}
