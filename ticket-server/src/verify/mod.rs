//! Ticket verification and statistics.
//!
//! Given a booking reference, every record source is queried at once, the
//! answers are reconciled into a single ticket (or a reason there is none),
//! and the ticket is checked against the rules for its transport mode.
//! Statistics use the same fan-out to count upcoming and past departures.
//!
//! The reference time is always passed in, either directly or through a
//! [`Clock`], so results are reproducible.

mod clock;
mod fanout;
mod lookup;
mod rules;
mod service;
mod stats;
mod verdict;


pub use clock::{Clock, FixedClock, SystemClock};
pub use fanout::{Settled, settle_all};
pub use lookup::{LookupOutcome, locate, reconcile};
pub use rules::{Field, Validation, Violation, validate, validate_tagged};
pub use service::TicketVerifier;
pub use stats::{StatisticsSnapshot, Tally, summarize, tally_settled};
pub use verdict::{
    MSG_CONFLICT, MSG_INVALID, MSG_NOT_FOUND, MSG_SYSTEM_ERROR, MSG_VALID, VerificationResult,
};
