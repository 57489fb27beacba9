//! Record store adapters.
//!
//! Each transport mode has its own record source. The verifier only relies
//! on the narrow [`TicketStore`] contract: a point lookup by reference code
//! that distinguishes "no such record" from an access failure, and a bulk
//! projection of departure times.
//!
//! Two adapters are provided:
//! - [`RestStore`] talks to a PostgREST-style HTTP endpoint
//! - [`MemoryStore`] serves records held in memory or loaded from JSON files

mod error;
mod memory;
mod rest;
#[cfg(test)]
pub(crate) mod testing;

use std::future::Future;

use crate::domain::{DepartureSlot, ReferenceCode, TicketRecord, TransportMode};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use rest::{RestClient, RestConfig, RestStore};

/// Access to the tickets of one transport mode.
pub trait TicketStore: Send + Sync {
    /// Look up the ticket with the given reference code.
    ///
    /// Returns `Ok(None)` when the source holds no such ticket.
    fn find_by_reference(
        &self,
        code: &ReferenceCode,
    ) -> impl Future<Output = Result<Option<TicketRecord>, StoreError>> + Send;

    /// Fetch the id and departure of every ticket in the source.
    ///
    /// An empty source yields an empty list, not an error.
    fn list_departures(
        &self,
    ) -> impl Future<Output = Result<Vec<DepartureSlot>, StoreError>> + Send;
}

/// One store per transport mode.
#[derive(Debug, Clone)]
pub struct StoreSet<S> {
    pub bus: S,
    pub train: S,
    pub plane: S,
}

impl<S> StoreSet<S> {
    pub fn new(bus: S, train: S, plane: S) -> Self {
        Self { bus, train, plane }
    }

    /// Build a set by constructing one store per mode.
    pub fn from_fn(mut f: impl FnMut(TransportMode) -> S) -> Self {
        Self {
            bus: f(TransportMode::Bus),
            train: f(TransportMode::Train),
            plane: f(TransportMode::Plane),
        }
    }

    /// Build a set, stopping at the first store that fails to construct.
    pub fn try_from_fn<E>(
        mut f: impl FnMut(TransportMode) -> Result<S, E>,
    ) -> Result<Self, E> {
        Ok(Self {
            bus: f(TransportMode::Bus)?,
            train: f(TransportMode::Train)?,
            plane: f(TransportMode::Plane)?,
        })
    }

    /// The store for one mode.
    pub fn get(&self, mode: TransportMode) -> &S {
        match mode {
            TransportMode::Bus => &self.bus,
            TransportMode::Train => &self.train,
            TransportMode::Plane => &self.plane,
        }
    }

    /// Stores paired with their modes, in bus, train, plane order.
    pub fn iter(&self) -> impl Iterator<Item = (TransportMode, &S)> {
        TransportMode::ALL.into_iter().map(|mode| (mode, self.get(mode)))
    }
}
