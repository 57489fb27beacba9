//! Scripted store for exercising the verifier without I/O.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{DepartureSlot, ReferenceCode, TicketRecord};

use super::{StoreError, TicketStore};

/// What a point lookup answers.
#[derive(Debug, Clone)]
pub(crate) enum Lookup {
    Match(TicketRecord),
    Missing,
    Fail,
}

/// A store with canned answers that counts how often it is queried.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedStore {
    lookup: Lookup,
    departures: Option<Vec<DepartureSlot>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedStore {
    fn with_lookup(lookup: Lookup) -> Self {
        Self {
            lookup,
            departures: Some(Vec::new()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answers every lookup with `record`.
    pub(crate) fn matching(record: TicketRecord) -> Self {
        Self::with_lookup(Lookup::Match(record))
    }

    /// Holds nothing.
    pub(crate) fn missing() -> Self {
        Self::with_lookup(Lookup::Missing)
    }

    /// Fails every query.
    pub(crate) fn failing() -> Self {
        Self {
            departures: None,
            ..Self::with_lookup(Lookup::Fail)
        }
    }

    /// Serves `slots` from the departures projection.
    pub(crate) fn with_departures(slots: Vec<DepartureSlot>) -> Self {
        Self {
            departures: Some(slots),
            ..Self::missing()
        }
    }

    pub(crate) fn from_lookup(lookup: Lookup) -> Self {
        match lookup {
            Lookup::Fail => Self::failing(),
            other => Self::with_lookup(other),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn unavailable() -> StoreError {
        StoreError::Api {
            status: 503,
            message: "store unavailable".to_string(),
        }
    }
}

impl TicketStore for ScriptedStore {
    async fn find_by_reference(
        &self,
        _code: &ReferenceCode,
    ) -> Result<Option<TicketRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.lookup {
            Lookup::Match(record) => Ok(Some(record.clone())),
            Lookup::Missing => Ok(None),
            Lookup::Fail => Err(Self::unavailable()),
        }
    }

    async fn list_departures(&self) -> Result<Vec<DepartureSlot>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.departures.clone().ok_or_else(Self::unavailable)
    }
}
