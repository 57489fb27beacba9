//! Domain types for ticket verification.
//!
//! Records are modelled as a closed tagged union over the three transport
//! modes. Identifiers that must be valid (reference codes, mode tags) are
//! checked at construction time; record fields are carried as-is and judged
//! later by the validation rules.

mod de;
mod departure;
mod mode;
mod reference;
mod ticket;

pub use departure::DepartureSlot;
pub use mode::{TransportMode, UnknownTransportMode};
pub use reference::{InvalidReferenceCode, ReferenceCode};
pub use ticket::{BusDetails, CommonFields, PlaneDetails, TicketDetails, TicketRecord, TrainDetails};

#[cfg(test)]
pub(crate) use ticket::fixtures;
