//! Concurrent fan-out to named record sources.

use std::future::Future;

use futures::future::join_all;

use crate::domain::TransportMode;
use crate::store::StoreError;

/// The settled outcome of one source's query.
#[derive(Debug)]
pub struct Settled<T> {
    pub mode: TransportMode,
    pub outcome: Result<T, StoreError>,
}

/// Run one query per source concurrently and wait for all of them.
///
/// Every query runs to completion whether or not the others fail. Results
/// come back in the order the sources were given, regardless of the order
/// in which the queries finished.
pub async fn settle_all<I, F, T>(sources: I) -> Vec<Settled<T>>
where
    I: IntoIterator<Item = (TransportMode, F)>,
    F: Future<Output = Result<T, StoreError>>,
{
    let (modes, queries): (Vec<_>, Vec<_>) = sources.into_iter().unzip();

    join_all(queries)
        .await
        .into_iter()
        .zip(modes)
        .map(|(outcome, mode)| Settled { mode, outcome })
        .collect()
}
