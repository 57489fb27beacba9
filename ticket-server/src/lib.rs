//! Ticket verification server.
//!
//! Answers two questions for a bus, train and plane ticketing desk:
//! "is the ticket with this booking reference good to travel?" and
//! "how many tickets of each kind are upcoming or already departed?"

pub mod config;
pub mod domain;
pub mod store;
pub mod verify;
pub mod web;
