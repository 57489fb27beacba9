//! Departure projection used for statistics.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use super::de;

/// The slice of a ticket needed to tell upcoming from past departures.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DepartureSlot {
    #[serde(default, deserialize_with = "de::optional_id")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "de::optional_date")]
    pub departure_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "de::optional_time")]
    pub departure_time: Option<NaiveTime>,
}

impl DepartureSlot {
    pub fn new(id: impl Into<String>, departure: NaiveDateTime) -> Self {
        Self {
            id: Some(id.into()),
            departure_date: Some(departure.date()),
            departure_time: Some(departure.time()),
        }
    }

    /// Combined departure timestamp, if both parts are present.
    pub fn departure_at(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(self.departure_date?, self.departure_time?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_projection_row() {
        let slot: DepartureSlot = serde_json::from_value(json!({
            "id": 3,
            "departure_date": "2031-02-03",
            "departure_time": "23:59"
        }))
        .unwrap();

        assert_eq!(slot.id.as_deref(), Some("3"));
        assert_eq!(
            slot.departure_at(),
            NaiveDate::from_ymd_opt(2031, 2, 3).and_then(|d| d.and_hms_opt(23, 59, 0))
        );
    }

    #[test]
    fn missing_time_has_no_departure() {
        let slot: DepartureSlot =
            serde_json::from_value(json!({ "id": "x", "departure_date": "2031-02-03" })).unwrap();
        assert_eq!(slot.departure_at(), None);
    }
}
