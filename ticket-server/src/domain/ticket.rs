//! Ticket records.
//!
//! A record is a set of fields common to every ticket plus one block of
//! mode-specific fields. Every field a rule checks for presence is optional
//! here: the model carries whatever the store holds and leaves judgement to
//! the validation rules.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::de;
use super::mode::TransportMode;

/// Fields present on every ticket, whatever the mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommonFields {
    /// Row identifier assigned by the store.
    #[serde(
        default,
        deserialize_with = "de::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Booking reference (PNR).
    #[serde(default, rename = "pnr_number")]
    pub reference_code: Option<String>,

    #[serde(default)]
    pub passenger_name: Option<String>,

    #[serde(default, deserialize_with = "de::optional_date")]
    pub departure_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "de::optional_time")]
    pub departure_time: Option<NaiveTime>,

    #[serde(default, rename = "seat_number")]
    pub seat: Option<String>,

    #[serde(default, rename = "ticket_price", deserialize_with = "de::optional_price")]
    pub price: Option<f64>,
}

impl CommonFields {
    /// Combined departure timestamp, if both date and time are present.
    pub fn departure_at(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(self.departure_date?, self.departure_time?))
    }
}

/// Bus-specific fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusDetails {
    #[serde(default, rename = "bus_operator")]
    pub operator: Option<String>,
    #[serde(default)]
    pub source_location: Option<String>,
    #[serde(default)]
    pub destination_location: Option<String>,
}

/// Train-specific fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainDetails {
    #[serde(default)]
    pub train_number: Option<String>,
    #[serde(default)]
    pub train_name: Option<String>,
    #[serde(default)]
    pub source_station: Option<String>,
    #[serde(default)]
    pub destination_station: Option<String>,
    #[serde(default)]
    pub coach_number: Option<String>,
    #[serde(default)]
    pub ticket_class: Option<String>,
}

/// Plane-specific fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneDetails {
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub airline_name: Option<String>,
    #[serde(default)]
    pub source_airport: Option<String>,
    #[serde(default)]
    pub destination_airport: Option<String>,
    #[serde(default)]
    pub ticket_class: Option<String>,
    #[serde(default)]
    pub baggage_allowance: Option<String>,
    /// Not required; assigned close to departure.
    #[serde(default)]
    pub gate_number: Option<String>,
}

/// Mode-specific block of a ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "transport_mode", rename_all = "lowercase")]
pub enum TicketDetails {
    Bus(BusDetails),
    Train(TrainDetails),
    Plane(PlaneDetails),
}

impl TicketDetails {
    /// The mode this block belongs to.
    pub fn mode(&self) -> TransportMode {
        match self {
            TicketDetails::Bus(_) => TransportMode::Bus,
            TicketDetails::Train(_) => TransportMode::Train,
            TicketDetails::Plane(_) => TransportMode::Plane,
        }
    }
}

/// A complete ticket as held by one of the record sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketRecord {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(flatten)]
    pub details: TicketDetails,
    /// The row's own `transport_mode` column, when the store keeps one.
    ///
    /// Serialization always writes the tag of `details` instead.
    #[serde(skip)]
    pub stored_type: Option<String>,
}

/// Columns read alongside the common and detail blocks.
#[derive(Deserialize)]
struct RowTag {
    #[serde(default)]
    transport_mode: Option<String>,
}

impl TicketRecord {
    pub fn new(common: CommonFields, details: TicketDetails) -> Self {
        Self {
            common,
            details,
            stored_type: None,
        }
    }

    /// Decode a flat store row, reading the detail columns for `mode`.
    ///
    /// Columns belonging to other modes are ignored.
    pub fn from_row(
        mode: TransportMode,
        row: &serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        let common = CommonFields::deserialize(row)?;
        let details = match mode {
            TransportMode::Bus => TicketDetails::Bus(BusDetails::deserialize(row)?),
            TransportMode::Train => TicketDetails::Train(TrainDetails::deserialize(row)?),
            TransportMode::Plane => TicketDetails::Plane(PlaneDetails::deserialize(row)?),
        };
        let RowTag { transport_mode } = RowTag::deserialize(row)?;
        Ok(Self {
            stored_type: transport_mode.filter(|tag| !tag.trim().is_empty()),
            ..Self::new(common, details)
        })
    }

    /// The mode of the detail block.
    pub fn mode(&self) -> TransportMode {
        self.details.mode()
    }

    /// The stored reference code, if any.
    pub fn reference_code(&self) -> Option<&str> {
        self.common.reference_code.as_deref()
    }
}
