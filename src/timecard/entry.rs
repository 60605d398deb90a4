use super::duration::{add_durations, calculate_hours};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One workday's clock-in/clock-out record
///
/// `day`, `time_in` and `time_out` hold whatever JSON the model or client
/// sent and are echoed back as-is; a missing key stays missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimecardEntry {
    /// Day label as printed on the card (e.g. "Monday"); not validated
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub day: Option<Value>,

    /// Clock-in time, 12-hour format ("08:00 AM")
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_in: Option<Value>,

    /// Clock-out time, 12-hour format ("04:30 PM")
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_out: Option<Value>,

    /// Computed "H:MM", or the invalid-format sentinel.
    /// Incoming values are ignored and recomputed.
    #[serde(
        default,
        deserialize_with = "ignore_incoming",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours_worked: Option<String>,

    /// Any other keys the model or client sent, echoed back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimecardEntry {
    pub fn new(
        day: impl Into<String>,
        time_in: impl Into<String>,
        time_out: impl Into<String>,
    ) -> Self {
        Self {
            day: Some(Value::String(day.into())),
            time_in: Some(Value::String(time_in.into())),
            time_out: Some(Value::String(time_out.into())),
            ..Default::default()
        }
    }

    /// Clock-in as text; absent or non-string values read as "".
    pub fn time_in_str(&self) -> &str {
        self.time_in.as_ref().and_then(Value::as_str).unwrap_or("")
    }

    /// Clock-out as text; absent or non-string values read as "".
    pub fn time_out_str(&self) -> &str {
        self.time_out.as_ref().and_then(Value::as_str).unwrap_or("")
    }
}

/// Response envelope shared by upload and edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimecardSummary {
    pub entries: Vec<TimecardEntry>,
    pub total_hours_worked: String,
}

impl TimecardSummary {
    /// Attach `hours_worked` to every entry and total them up.
    ///
    /// Entry order is preserved. Entries with unparseable times carry the
    /// sentinel and add nothing to the total.
    pub fn compute(mut entries: Vec<TimecardEntry>) -> Self {
        let mut hours_list = Vec::with_capacity(entries.len());

        for entry in entries.iter_mut() {
            let hours = calculate_hours(entry.time_in_str(), entry.time_out_str());
            hours_list.push(hours.clone());
            entry.hours_worked = Some(hours);
        }

        Self {
            total_hours_worked: add_durations(&hours_list),
            entries,
        }
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn ignore_incoming<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer)?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timecard::INVALID_TIME_FORMAT;
    use serde_json::json;

    #[test]
    fn test_compute_annotates_each_entry() {
        let summary = TimecardSummary::compute(vec![
            TimecardEntry::new("Monday", "08:00 AM", "04:30 PM"),
            TimecardEntry::new("Tuesday", "09:00 PM", "05:00 AM"),
            TimecardEntry::new("Wednesday", "", "05:00 PM"),
        ]);

        let hours: Vec<_> = summary
            .entries
            .iter()
            .map(|e| e.hours_worked.as_deref().unwrap())
            .collect();
        assert_eq!(hours, vec!["8:30", "8:00", INVALID_TIME_FORMAT]);
        assert_eq!(summary.total_hours_worked, "16:30");
        assert_eq!(summary.entries[2].day, Some(json!("Wednesday")));
    }

    #[test]
    fn test_compute_empty() {
        let summary = TimecardSummary::compute(Vec::new());
        assert!(summary.entries.is_empty());
        assert_eq!(summary.total_hours_worked, "0:00");
    }

    #[test]
    fn test_non_string_values_echoed_unchanged() {
        let entry: TimecardEntry = serde_json::from_value(
            json!({"day": 1, "time_in": 800, "time_out": "05:00 PM"}),
        )
        .unwrap();
        assert_eq!(entry.time_in_str(), "");

        let summary = TimecardSummary::compute(vec![entry]);
        assert_eq!(
            serde_json::to_value(&summary.entries[0]).unwrap(),
            json!({
                "day": 1,
                "time_in": 800,
                "time_out": "05:00 PM",
                "hours_worked": INVALID_TIME_FORMAT
            })
        );
    }

    #[test]
    fn test_missing_keys_stay_missing() {
        let entry: TimecardEntry =
            serde_json::from_value(json!({"time_in": "08:00 AM", "time_out": null})).unwrap();
        assert_eq!(entry.day, None);
        assert_eq!(entry.time_out, Some(Value::Null));

        let summary = TimecardSummary::compute(vec![entry]);
        assert_eq!(
            serde_json::to_value(&summary.entries[0]).unwrap(),
            json!({
                "time_in": "08:00 AM",
                "time_out": null,
                "hours_worked": INVALID_TIME_FORMAT
            })
        );
    }

    #[test]
    fn test_stale_hours_worked_is_replaced() {
        let entry: TimecardEntry = serde_json::from_value(json!({
            "day": "Monday",
            "time_in": "08:00 AM",
            "time_out": "09:00 AM",
            "hours_worked": "99:99"
        }))
        .unwrap();
        assert_eq!(entry.hours_worked, None);
        assert!(entry.extra.is_empty());

        let summary = TimecardSummary::compute(vec![entry]);
        assert_eq!(summary.entries[0].hours_worked.as_deref(), Some("1:00"));
    }

    #[test]
    fn test_extra_keys_round_trip() {
        let entry: TimecardEntry = serde_json::from_value(json!({
            "day": "Monday",
            "time_in": "08:00 AM",
            "time_out": "09:00 AM",
            "note": "lunch skipped"
        }))
        .unwrap();

        let summary = TimecardSummary::compute(vec![entry]);
        let out = serde_json::to_value(&summary).unwrap();
        assert_eq!(out["entries"][0]["note"], "lunch skipped");
        assert_eq!(out["entries"][0]["hours_worked"], "1:00");
        assert_eq!(out["total_hours_worked"], "1:00");
    }
}
