//! Custom serde helpers.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes class times as `HH:MM`, or `HH:MM:SS` when the seconds are set.
///
/// Deserialization accepts both forms.
pub mod time_of_day {
    use super::*;

    const FORMAT: &str = "%H:%M";
    const FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if time.second() == 0 {
            serializer.serialize_str(&time.format(FORMAT).to_string())
        } else {
            serializer.serialize_str(&time.format(FORMAT_WITH_SECONDS).to_string())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse(s: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(s, FORMAT_WITH_SECONDS))
            .map_err(|_| format!("invalid time of day `{s}`, expected HH:MM"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Slot {
        #[serde(with = "time_of_day")]
        start: NaiveTime,
    }

    #[test]
    fn test_time_of_day_accepts_minutes_and_seconds() {
        let a: Slot = serde_json::from_str(r#"{"start":"09:30"}"#).unwrap();
        let b: Slot = serde_json::from_str(r#"{"start":"09:30:00"}"#).unwrap();
        assert_eq!(a.start, b.start);
        assert_eq!(a.start, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn test_time_of_day_serializes_hh_mm() {
        let slot = Slot {
            start: NaiveTime::from_hms_opt(14, 5, 0).unwrap(),
        };
        assert_eq!(serde_json::to_string(&slot).unwrap(), r#"{"start":"14:05"}"#);
    }

    #[test]
    fn test_time_of_day_keeps_seconds() {
        let slot: Slot = serde_json::from_str(r#"{"start":"09:30:45"}"#).unwrap();
        assert_eq!(slot.start, NaiveTime::from_hms_opt(9, 30, 45).unwrap());
        assert_eq!(serde_json::to_string(&slot).unwrap(), r#"{"start":"09:30:45"}"#);
    }

    #[test]
    fn test_time_of_day_rejects_garbage() {
        assert!(serde_json::from_str::<Slot>(r#"{"start":"25:99"}"#).is_err());
        assert!(time_of_day::parse("noon").is_err());
    }
}
