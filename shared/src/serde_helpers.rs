//! Serde helpers for wire formats the booking forms use

/// `NaiveTime` as `HH:MM`
///
/// Deserialization also accepts `HH:MM:SS`; seconds are dropped.
pub mod hh_mm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| D::Error::custom(format!("invalid time: {s}")))
    }

    /// Parse `HH:MM` or `HH:MM:SS`, truncated to the minute
    pub fn parse(s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
            .and_then(|t| t.with_second(0))
    }
}

/// A number that may arrive as a JSON number or a numeric string
///
/// HTML forms post everything as strings, so `"4"` and `4` are both
/// accepted wherever a count or amount is expected.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrString {
    /// Integer value; fractional input is truncated, garbage is `None`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberOrString::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            NumberOrString::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            }
        }
    }

    /// Decimal textual form, for exact money parsing
    pub fn as_decimal_str(&self) -> Option<String> {
        match self {
            NumberOrString::Number(n) => Some(n.to_string()),
            NumberOrString::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            NumberOrString::Text(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => n.as_f64(),
            NumberOrString::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|f| f.is_finite())
    }
}

impl From<i64> for NumberOrString {
    fn from(n: i64) -> Self {
        NumberOrString::Number(n.into())
    }
}

impl From<&str> for NumberOrString {
    fn from(s: &str) -> Self {
        NumberOrString::Text(s.to_string())
    }
}
