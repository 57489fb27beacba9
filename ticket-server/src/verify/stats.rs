//! Ticket statistics across all sources.
//!
//! Counts are recomputed from the sources on every call. A source that
//! fails reports zero tickets; the other sources are still counted.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{DepartureSlot, TransportMode};
use crate::store::{StoreSet, TicketStore};

use super::fanout::{Settled, settle_all};

/// Ticket counts split by departure relative to a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Tally {
    pub total: usize,
    /// Departing strictly after the reference time.
    pub upcoming: usize,
    /// Departed at or before the reference time, or with no usable departure.
    pub past: usize,
}

impl Tally {
    /// Partition departures around `now`.
    ///
    /// A slot missing its date or time cannot be upcoming and counts as past.
    pub fn of(slots: &[DepartureSlot], now: NaiveDateTime) -> Self {
        let upcoming = slots
            .iter()
            .filter(|s| s.departure_at().is_some_and(|at| at > now))
            .count();

        Self {
            total: slots.len(),
            upcoming,
            past: slots.len() - upcoming,
        }
    }
}

impl std::ops::Add for Tally {
    type Output = Tally;

    fn add(self, other: Tally) -> Tally {
        Tally {
            total: self.total + other.total,
            upcoming: self.upcoming + other.upcoming,
            past: self.past + other.past,
        }
    }
}

/// Per-mode tallies plus their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatisticsSnapshot {
    pub bus: Tally,
    pub train: Tally,
    pub plane: Tally,
    pub total: Tally,
}

impl StatisticsSnapshot {
    /// Build a snapshot from per-mode tallies; `total` is their sum.
    pub fn new(bus: Tally, train: Tally, plane: Tally) -> Self {
        Self {
            bus,
            train,
            plane,
            total: bus + train + plane,
        }
    }

    pub fn get(&self, mode: TransportMode) -> Tally {
        match mode {
            TransportMode::Bus => self.bus,
            TransportMode::Train => self.train,
            TransportMode::Plane => self.plane,
        }
    }
}

/// Tally each mode's settled departures, zeroing any source that failed.
pub fn tally_settled(
    settled: &[Settled<Vec<DepartureSlot>>],
    now: NaiveDateTime,
) -> StatisticsSnapshot {
    let tally_for = |mode: TransportMode| {
        settled
            .iter()
            .find(|s| s.mode == mode)
            .and_then(|s| s.outcome.as_ref().ok())
            .map(|slots| Tally::of(slots, now))
            .unwrap_or_default()
    };

    StatisticsSnapshot::new(
        tally_for(TransportMode::Bus),
        tally_for(TransportMode::Train),
        tally_for(TransportMode::Plane),
    )
}

/// Fetch departures from every source concurrently and tally them at `now`.
pub async fn summarize<S: TicketStore>(
    stores: &StoreSet<S>,
    now: NaiveDateTime,
) -> StatisticsSnapshot {
    let settled = settle_all(
        stores
            .iter()
            .map(|(mode, store)| (mode, store.list_departures())),
    )
    .await;

    for Settled { mode, outcome } in &settled {
        if let Err(e) = outcome {
            warn!(%mode, error = %e, "departures unavailable, reporting zero tickets");
        }
    }

    let snapshot = tally_settled(&settled, now);
    for mode in TransportMode::ALL {
        let tally = snapshot.get(mode);
        debug!(%mode, total = tally.total, upcoming = tally.upcoming, past = tally.past, "tallied");
    }
    debug!(
        total = snapshot.total.total,
        upcoming = snapshot.total.upcoming,
        past = snapshot.total.past,
        "statistics computed"
    );
    snapshot
}
