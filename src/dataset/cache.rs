//! Process-scoped cache for the prepared dataset.
//!
//! The table is loaded on first use and shared as `Arc<PatientTable>`
//! until it is invalidated. Failed loads are returned to the caller and
//! never stored.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use log::{debug, info};

use crate::config::DatasetConfig;
use crate::dataset::{PatientTable, prepare_dataset_with_config};
use crate::error::Result;
use crate::reader::DataSource;

/// Lazily loaded, explicitly invalidated dataset
#[derive(Debug)]
pub struct DatasetCache {
    config: DatasetConfig,
    table: Mutex<Option<Arc<PatientTable>>>,
}

impl DatasetCache {
    /// Create an empty cache for the given configuration
    #[must_use]
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            table: Mutex::new(None),
        }
    }

    /// Create an empty cache reading `source` with default options
    #[must_use]
    pub fn for_source(source: DataSource) -> Self {
        Self::new(DatasetConfig::for_source(source))
    }

    /// Source the cache loads from
    #[must_use]
    pub const fn source(&self) -> &DataSource {
        &self.config.source
    }

    /// Return the cached table, loading it on first use
    pub fn get(&self) -> Result<Arc<PatientTable>> {
        let mut slot = self.slot();
        if let Some(table) = slot.as_ref() {
            debug!("Dataset cache hit for {}", self.config.source);
            return Ok(Arc::clone(table));
        }

        debug!("Dataset cache miss for {}", self.config.source);
        let start = Instant::now();
        let table = Arc::new(prepare_dataset_with_config(&self.config)?);
        info!(
            "Cached {} patient records from {} in {:?}",
            table.num_rows(),
            self.config.source,
            start.elapsed()
        );

        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table; returns whether one was cached
    pub fn invalidate(&self) -> bool {
        let dropped = self.slot().take().is_some();
        if dropped {
            info!("Invalidated cached dataset from {}", self.config.source);
        }
        dropped
    }

    /// Invalidate and load again
    pub fn reload(&self) -> Result<Arc<PatientTable>> {
        self.invalidate();
        self.get()
    }

    /// Whether a table is currently cached
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.slot().is_some()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<PatientTable>>> {
        // The slot only ever holds a complete table, so a poisoned lock is still usable
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
