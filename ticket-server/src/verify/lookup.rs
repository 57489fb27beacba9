//! Multi-source ticket lookup.
//!
//! A reference code is looked up in all three sources at once. The settled
//! answers are then reconciled by [`reconcile`], which is a pure function of
//! the per-source outcomes and does not depend on which source answered
//! first.

use tracing::{debug, error, warn};

use crate::domain::{ReferenceCode, TicketRecord, TransportMode};
use crate::store::{StoreError, StoreSet, TicketStore};

use super::fanout::{Settled, settle_all};

/// Result of looking a reference code up across every source.
#[derive(Debug)]
pub enum LookupOutcome {
    /// Exactly one source holds the ticket.
    Found {
        mode: TransportMode,
        record: TicketRecord,
    },

    /// No source holds the ticket and every source answered cleanly.
    NotFound,

    /// No source holds the ticket, but at least one could not answer.
    Failed {
        failures: Vec<(TransportMode, StoreError)>,
    },

    /// More than one source holds a ticket with this reference code.
    Conflict { modes: Vec<TransportMode> },
}

/// Combine per-source outcomes into one lookup outcome.
///
/// - one match wins, even if other sources failed
/// - several matches are a conflict
/// - no match with any failure is a failed lookup
/// - otherwise the ticket does not exist
pub fn reconcile(settled: Vec<Settled<Option<TicketRecord>>>) -> LookupOutcome {
    let mut matches = Vec::new();
    let mut failures = Vec::new();

    for Settled { mode, outcome } in settled {
        match outcome {
            Ok(Some(record)) => matches.push((mode, record)),
            Ok(None) => {}
            Err(e) => failures.push((mode, e)),
        }
    }

    match matches.len() {
        0 if failures.is_empty() => LookupOutcome::NotFound,
        0 => LookupOutcome::Failed { failures },
        1 => {
            let (mode, record) = matches.remove(0);
            LookupOutcome::Found { mode, record }
        }
        _ => LookupOutcome::Conflict {
            modes: matches.into_iter().map(|(mode, _)| mode).collect(),
        },
    }
}

/// Look `code` up in every source concurrently and reconcile the answers.
pub async fn locate<S: TicketStore>(stores: &StoreSet<S>, code: &ReferenceCode) -> LookupOutcome {
    debug!(reference = %code, "looking up ticket in all sources");

    let settled = settle_all(
        stores
            .iter()
            .map(|(mode, store)| (mode, store.find_by_reference(code))),
    )
    .await;

    for Settled { mode, outcome } in &settled {
        if let Err(e) = outcome {
            warn!(reference = %code, %mode, error = %e, "ticket source failed");
        }
    }

    let outcome = reconcile(settled);

    match &outcome {
        LookupOutcome::Found { mode, .. } => debug!(reference = %code, %mode, "ticket found"),
        LookupOutcome::NotFound => debug!(reference = %code, "ticket not found"),
        LookupOutcome::Failed { failures } => error!(
            reference = %code,
            failed_sources = failures.len(),
            "lookup failed: no match and at least one source errored"
        ),
        LookupOutcome::Conflict { modes } => error!(
            reference = %code,
            ?modes,
            "reference code is held by more than one source"
        ),
    }

    outcome
}
