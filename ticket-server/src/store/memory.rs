//! In-memory record store.
//!
//! Serves tickets held in memory, optionally loaded from JSON files. This is
//! useful for development and testing without a database.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{DepartureSlot, ReferenceCode, TicketRecord, TransportMode};

use super::{StoreError, StoreSet, TicketStore};

/// Record store for one mode, backed by a vector of records.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    mode: TransportMode,
    records: Arc<[TicketRecord]>,
}

impl MemoryStore {
    /// Create a store holding the given records.
    ///
    /// Records of a different mode are dropped, so a store never serves a
    /// ticket from another source.
    pub fn new(mode: TransportMode, records: Vec<TicketRecord>) -> Self {
        let records = records.into_iter().filter(|r| r.mode() == mode).collect();
        Self { mode, records }
    }

    /// Create an empty store.
    pub fn empty(mode: TransportMode) -> Self {
        Self::new(mode, Vec::new())
    }

    /// Load one mode's tickets from `{data_dir}/{mode}.json`.
    ///
    /// The file holds a JSON array of flat rows using the table's column
    /// names. A missing file yields an empty store.
    pub fn load(data_dir: impl AsRef<Path>, mode: TransportMode) -> Result<Self, StoreError> {
        let path = data_dir.as_ref().join(format!("{}.json", mode.as_str()));

        if !path.is_file() {
            return Ok(Self::empty(mode));
        }

        let json = std::fs::read_to_string(&path).map_err(|e| StoreError::Load {
            message: format!("Failed to read {:?}: {}", path, e),
        })?;

        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&json).map_err(|e| StoreError::Load {
                message: format!("Failed to parse {:?}: {}", path, e),
            })?;

        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                TicketRecord::from_row(mode, row).map_err(|e| StoreError::Load {
                    message: format!("Invalid row {} in {:?}: {}", i, path, e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(mode, records))
    }

    /// Load all three modes from a directory.
    pub fn load_all(data_dir: impl AsRef<Path>) -> Result<StoreSet<Self>, StoreError> {
        let data_dir = data_dir.as_ref();
        StoreSet::try_from_fn(|mode| Self::load(data_dir, mode))
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TicketStore for MemoryStore {
    async fn find_by_reference(
        &self,
        code: &ReferenceCode,
    ) -> Result<Option<TicketRecord>, StoreError> {
        let mut matches = self
            .records
            .iter()
            .filter(|r| r.reference_code().map(str::trim) == Some(code.as_str()));

        let Some(first) = matches.next() else {
            return Ok(None);
        };

        let extra = matches.count();
        if extra > 0 {
            return Err(StoreError::Duplicate {
                code: code.to_string(),
                count: extra + 1,
            });
        }

        Ok(Some(first.clone()))
    }

    async fn list_departures(&self) -> Result<Vec<DepartureSlot>, StoreError> {
        Ok(self
            .records
            .iter()
            .map(|r| DepartureSlot {
                id: r.common.id.clone(),
                departure_date: r.common.departure_date,
                departure_time: r.common.departure_time,
            })
            .collect())
    }
}
