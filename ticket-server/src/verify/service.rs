//! Ticket verification service.

use chrono::NaiveDateTime;

use crate::domain::ReferenceCode;
use crate::store::{StoreSet, TicketStore};

use super::clock::{Clock, SystemClock};
use super::lookup::{LookupOutcome, locate};
use super::rules::{validate, validate_tagged};
use super::stats::{StatisticsSnapshot, summarize};
use super::verdict::VerificationResult;

/// Verifies tickets and reports statistics over one store per mode.
///
/// Holds no state between calls beyond the store handles and the clock,
/// so any number of calls may run concurrently.
#[derive(Debug, Clone)]
pub struct TicketVerifier<S, C = SystemClock> {
    stores: StoreSet<S>,
    clock: C,
}

impl<S: TicketStore> TicketVerifier<S> {
    /// Create a verifier that reads the local wall clock.
    pub fn new(stores: StoreSet<S>) -> Self {
        Self::with_clock(stores, SystemClock)
    }
}

impl<S: TicketStore, C: Clock> TicketVerifier<S, C> {
    /// Create a verifier with an explicit reference clock.
    pub fn with_clock(stores: StoreSet<S>, clock: C) -> Self {
        Self { stores, clock }
    }

    #[cfg(test)]
    pub(crate) fn stores(&self) -> &StoreSet<S> {
        &self.stores
    }

    /// Locate and validate a ticket at the clock's current time.
    pub async fn verify_ticket(&self, code: &ReferenceCode) -> VerificationResult {
        self.verify_ticket_at(code, self.clock.now()).await
    }

    /// Locate and validate a ticket at time `now`.
    ///
    /// Never fails: missing tickets, store failures and broken rules all
    /// come back as a verdict.
    pub async fn verify_ticket_at(
        &self,
        code: &ReferenceCode,
        now: NaiveDateTime,
    ) -> VerificationResult {
        match locate(&self.stores, code).await {
            LookupOutcome::Found { mode, record } => {
                // A row that names its own type is judged under that name.
                let validation = match record.stored_type.as_deref() {
                    Some(tag) => validate_tagged(&record, tag, now),
                    None => validate(&record, mode, now),
                };
                VerificationResult::validated(code, mode, record, validation)
            }
            LookupOutcome::NotFound => VerificationResult::not_found(code),
            LookupOutcome::Failed { .. } => VerificationResult::system_error(code),
            LookupOutcome::Conflict { .. } => VerificationResult::conflict(code),
        }
    }

    /// Ticket counts at the clock's current time.
    pub async fn get_statistics(&self) -> StatisticsSnapshot {
        self.statistics_at(self.clock.now()).await
    }

    /// Ticket counts split around `now`.
    pub async fn statistics_at(&self, now: NaiveDateTime) -> StatisticsSnapshot {
        summarize(&self.stores, now).await
    }
}
