//! Ticket validation rules.
//!
//! Every rule is evaluated and every violation reported, in a fixed order:
//! common field rules, the departure-time rule, then the rules for the
//! ticket's transport mode. Validation is a pure function of the record,
//! the mode and the reference time.

use std::fmt;

use chrono::NaiveDateTime;

use crate::domain::{CommonFields, TicketDetails, TicketRecord, TransportMode};

/// A field that must be present on a valid ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ReferenceCode,
    PassengerName,
    DepartureDate,
    DepartureTime,
    Seat,
    BusOperator,
    SourceLocation,
    DestinationLocation,
    TrainNumber,
    TrainName,
    SourceStation,
    DestinationStation,
    CoachNumber,
    TicketClass,
    FlightNumber,
    AirlineName,
    SourceAirport,
    DestinationAirport,
    BaggageAllowance,
}

impl Field {
    /// Human-readable name, as shown to the person checking the ticket.
    pub fn label(&self) -> &'static str {
        match self {
            Field::ReferenceCode => "PNR number",
            Field::PassengerName => "Passenger name",
            Field::DepartureDate => "Departure date",
            Field::DepartureTime => "Departure time",
            Field::Seat => "Seat number",
            Field::BusOperator => "Bus operator",
            Field::SourceLocation => "Source location",
            Field::DestinationLocation => "Destination location",
            Field::TrainNumber => "Train number",
            Field::TrainName => "Train name",
            Field::SourceStation => "Source station",
            Field::DestinationStation => "Destination station",
            Field::CoachNumber => "Coach number",
            Field::TicketClass => "Ticket class",
            Field::FlightNumber => "Flight number",
            Field::AirlineName => "Airline name",
            Field::SourceAirport => "Source airport",
            Field::DestinationAirport => "Destination airport",
            Field::BaggageAllowance => "Baggage allowance",
        }
    }
}

/// One broken business rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// A required field is absent or blank.
    Missing(Field),
    /// Price is absent, zero or negative.
    InvalidPrice,
    /// Departure is at or before the reference time.
    DepartureNotInFuture,
    /// The ticket's type tag has no rule set.
    InvalidTicketType,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing(field) => write!(f, "{} is required", field.label()),
            Violation::InvalidPrice => f.write_str("Valid ticket price is required"),
            Violation::DepartureNotInFuture => {
                f.write_str("Departure date/time cannot be in the past")
            }
            Violation::InvalidTicketType => f.write_str("Invalid ticket type"),
        }
    }
}

/// Outcome of validating one ticket.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub violations: Vec<Violation>,
}

impl Validation {
    /// True iff no rule was broken.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation messages in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Validate `record` as a ticket of `mode` at time `now`.
///
/// If `mode` does not match the record's detail block the mode-specific
/// rules are replaced by a single [`Violation::InvalidTicketType`]; fields
/// of another mode are never read.
pub fn validate(record: &TicketRecord, mode: TransportMode, now: NaiveDateTime) -> Validation {
    let mut violations = common_violations(&record.common, now);

    match required_details(mode, &record.details) {
        Some(fields) => violations.extend(missing(fields)),
        None => violations.push(Violation::InvalidTicketType),
    }

    Validation { violations }
}

/// Validate `record` under a raw type tag, such as a stored
/// `transport_mode` column.
///
/// An unrecognised tag is reported as [`Violation::InvalidTicketType`]
/// after the common rules, as is a known tag that disagrees with the
/// record's detail block.
pub fn validate_tagged(record: &TicketRecord, tag: &str, now: NaiveDateTime) -> Validation {
    match tag.parse::<TransportMode>() {
        Ok(mode) => validate(record, mode, now),
        Err(_) => {
            let mut violations = common_violations(&record.common, now);
            violations.push(Violation::InvalidTicketType);
            Validation { violations }
        }
    }
}

/// Common field rules followed by the departure-time rule.
fn common_violations(common: &CommonFields, now: NaiveDateTime) -> Vec<Violation> {
    let mut violations: Vec<Violation> = missing([
        (Field::ReferenceCode, present(common.reference_code.as_deref())),
        (Field::PassengerName, present(common.passenger_name.as_deref())),
        (Field::DepartureDate, common.departure_date.is_some()),
        (Field::DepartureTime, common.departure_time.is_some()),
        (Field::Seat, present(common.seat.as_deref())),
    ])
    .collect();

    if !matches!(common.price, Some(price) if price > 0.0) {
        violations.push(Violation::InvalidPrice);
    }

    // Only judged when both parts exist; a missing part is already reported.
    if common.departure_at().is_some_and(|departure| departure <= now) {
        violations.push(Violation::DepartureNotInFuture);
    }

    violations
}

/// Required fields for `mode`, read from the matching detail block.
///
/// `None` when the block belongs to a different mode.
fn required_details(mode: TransportMode, details: &TicketDetails) -> Option<Vec<(Field, bool)>> {
    let fields = match (mode, details) {
        (TransportMode::Bus, TicketDetails::Bus(bus)) => vec![
            (Field::BusOperator, present(bus.operator.as_deref())),
            (Field::SourceLocation, present(bus.source_location.as_deref())),
            (Field::DestinationLocation, present(bus.destination_location.as_deref())),
        ],
        (TransportMode::Train, TicketDetails::Train(train)) => vec![
            (Field::TrainNumber, present(train.train_number.as_deref())),
            (Field::TrainName, present(train.train_name.as_deref())),
            (Field::SourceStation, present(train.source_station.as_deref())),
            (Field::DestinationStation, present(train.destination_station.as_deref())),
            (Field::CoachNumber, present(train.coach_number.as_deref())),
            (Field::TicketClass, present(train.ticket_class.as_deref())),
        ],
        (TransportMode::Plane, TicketDetails::Plane(plane)) => vec![
            (Field::FlightNumber, present(plane.flight_number.as_deref())),
            (Field::AirlineName, present(plane.airline_name.as_deref())),
            (Field::SourceAirport, present(plane.source_airport.as_deref())),
            (Field::DestinationAirport, present(plane.destination_airport.as_deref())),
            (Field::TicketClass, present(plane.ticket_class.as_deref())),
            (Field::BaggageAllowance, present(plane.baggage_allowance.as_deref())),
        ],
        _ => return None,
    };
    Some(fields)
}

fn missing(checks: impl IntoIterator<Item = (Field, bool)>) -> impl Iterator<Item = Violation> {
    checks
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(field, _)| Violation::Missing(field))
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlaneDetails, fixtures};
    use chrono::{Duration, NaiveDate};

    /// One day before the fixtures depart.
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 5, 31)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    fn messages(record: &TicketRecord, mode: TransportMode) -> Vec<String> {
        validate(record, mode, now()).messages()
    }

    #[test]
    fn complete_tickets_are_valid() {
        for mode in TransportMode::ALL {
            let validation = validate(&fixtures::for_mode(mode, "OK1"), mode, now());
            assert!(validation.is_valid(), "{mode}: {:?}", validation.violations);
        }
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut record = fixtures::bus("B1");
        record.common.passenger_name = Some("   ".into());
        record.common.seat = Some(String::new());

        assert_eq!(
            messages(&record, TransportMode::Bus),
            vec!["Passenger name is required", "Seat number is required"]
        );
    }

    #[test]
    fn price_must_be_positive() {
        for price in [None, Some(0.0), Some(-5.0), Some(f64::NAN)] {
            let mut record = fixtures::train("T1");
            record.common.price = price;
            assert_eq!(
                validate(&record, TransportMode::Train, now()).violations,
                vec![Violation::InvalidPrice],
                "price {price:?}"
            );
        }
    }

    #[test]
    fn departure_at_or_before_now_is_rejected() {
        let record = fixtures::plane("P1");
        let departure = record.common.departure_at().unwrap();

        for reference in [departure, departure + Duration::minutes(1)] {
            assert_eq!(
                validate(&record, TransportMode::Plane, reference).violations,
                vec![Violation::DepartureNotInFuture]
            );
        }

        let just_before = departure - Duration::seconds(1);
        assert!(validate(&record, TransportMode::Plane, just_before).is_valid());
    }

    #[test]
    fn missing_date_does_not_add_temporal_violation() {
        let mut record = fixtures::bus("B1");
        record.common.departure_date = None;
        let far_future = now() + Duration::days(365 * 50);

        assert_eq!(
            validate(&record, TransportMode::Bus, far_future).violations,
            vec![Violation::Missing(Field::DepartureDate)]
        );
    }

    #[test]
    fn violations_accumulate_in_rule_order() {
        let mut record = fixtures::train("T1");
        record.common.reference_code = None;
        record.common.price = Some(0.0);
        if let TicketDetails::Train(train) = &mut record.details {
            train.coach_number = None;
            train.train_name = Some(" ".into());
        }
        let late = record.common.departure_at().unwrap() + Duration::hours(1);

        assert_eq!(
            validate(&record, TransportMode::Train, late).messages(),
            vec![
                "PNR number is required",
                "Valid ticket price is required",
                "Departure date/time cannot be in the past",
                "Train name is required",
                "Coach number is required",
            ]
        );
    }

    #[test]
    fn empty_record_reports_every_field() {
        let record = TicketRecord::new(
            CommonFields::default(),
            TicketDetails::Plane(PlaneDetails::default()),
        );

        assert_eq!(
            messages(&record, TransportMode::Plane),
            vec![
                "PNR number is required",
                "Passenger name is required",
                "Departure date is required",
                "Departure time is required",
                "Seat number is required",
                "Valid ticket price is required",
                "Flight number is required",
                "Airline name is required",
                "Source airport is required",
                "Destination airport is required",
                "Ticket class is required",
                "Baggage allowance is required",
            ]
        );
    }

    #[test]
    fn gate_number_is_optional() {
        let mut record = fixtures::plane("P1");
        if let TicketDetails::Plane(plane) = &mut record.details {
            plane.gate_number = None;
        }
        assert!(validate(&record, TransportMode::Plane, now()).is_valid());
    }

    #[test]
    fn bus_rules() {
        let mut record = fixtures::bus("B1");
        if let TicketDetails::Bus(bus) = &mut record.details {
            bus.operator = None;
            bus.destination_location = None;
        }
        assert_eq!(
            messages(&record, TransportMode::Bus),
            vec!["Bus operator is required", "Destination location is required"]
        );
    }

    #[test]
    fn mismatched_mode_is_invalid_type() {
        let record = fixtures::bus("B1");
        assert_eq!(
            validate(&record, TransportMode::Plane, now()).violations,
            vec![Violation::InvalidTicketType]
        );
    }

    #[test]
    fn unknown_tag_is_invalid_type() {
        let mut record = fixtures::bus("B1");
        record.common.seat = None;

        assert_eq!(
            validate_tagged(&record, "ferry", now()).messages(),
            vec!["Seat number is required", "Invalid ticket type"]
        );
        assert_eq!(
            validate_tagged(&record, "bus", now()).violations,
            vec![Violation::Missing(Field::Seat)]
        );
        assert_eq!(
            validate_tagged(&record, "plane", now()).violations,
            vec![Violation::Missing(Field::Seat), Violation::InvalidTicketType]
        );
    }
}
