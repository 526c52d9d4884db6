//! `HH:MM` wire form for times of day.

use chrono::NaiveTime;

/// ## Summary
/// Parses a time of day in `HH:MM:SS` or `HH:MM` form.
///
/// Storage hands back seconds; clients send minutes. Both are accepted.
#[must_use]
pub fn parse(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Serde adapter for `Option<NaiveTime>` fields written as `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// ## Errors
    /// Propagates serializer errors.
    #[expect(clippy::ref_option, reason = "signature required by serde `with`")]
    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.collect_str(&time.format("%H:%M")),
            None => serializer.serialize_none(),
        }
    }

    /// ## Errors
    /// Fails on a non-empty string that is not a valid time.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                super::parse(&raw)
                    .ok_or_else(|| D::Error::custom(format!("invalid time of day: {raw}")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_forms() {
        let expected = NaiveTime::from_hms_opt(9, 30, 0);
        assert_eq!(parse("09:30"), expected);
        assert_eq!(parse("09:30:00"), expected);
        assert_eq!(parse("9:30 am"), None);
    }

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Slot {
        #[serde(with = "hhmm", default)]
        time: Option<NaiveTime>,
    }

    #[test]
    fn test_hhmm_drops_seconds_on_output() {
        let slot: Slot = serde_json::from_str(r#"{"time":"17:45:00"}"#).expect("valid json");
        assert_eq!(
            serde_json::to_string(&slot).expect("serializes"),
            r#"{"time":"17:45"}"#
        );
    }

    #[test]
    fn test_hhmm_blank_is_none() {
        let slot: Slot = serde_json::from_str(r#"{"time":""}"#).expect("valid json");
        assert!(slot.time.is_none());
        let slot: Slot = serde_json::from_str("{}").expect("valid json");
        assert!(slot.time.is_none());
    }

    #[test]
    fn test_hhmm_rejects_garbage() {
        assert!(serde_json::from_str::<Slot>(r#"{"time":"noon"}"#).is_err());
    }
}
