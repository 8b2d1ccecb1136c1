//! Memoized cleaning keyed by a content fingerprint.
//!
//! Cleaning is a pure function of the raw table and the cleaning options, so
//! reprocessing the same upload (for example with different report filters)
//! can reuse an earlier result.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use amr_model::{CleanedTable, CleaningOptions, RawTable};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::pipeline::clean_table;

const UNIT_SEPARATOR: u8 = 0x1f;
const RECORD_SEPARATOR: u8 = 0x1e;

/// SHA256 hex digest of the headers, every cell and the cleaning options.
pub fn fingerprint(raw: &RawTable, options: &CleaningOptions) -> String {
    let mut hasher = Sha256::new();
    for header in &raw.headers {
        hasher.update(header.as_bytes());
        hasher.update([UNIT_SEPARATOR]);
    }
    hasher.update([RECORD_SEPARATOR]);
    for row in &raw.rows {
        for cell in row {
            hasher.update(cell.as_bytes());
            hasher.update([UNIT_SEPARATOR]);
        }
        hasher.update([RECORD_SEPARATOR]);
    }
    hasher.update(options.max_age_years.to_bits().to_le_bytes());
    hasher.update([
        u8::from(options.complete_patients),
        u8::from(options.parallel),
    ]);
    hex::encode(hasher.finalize())
}

/// Thread-safe store of cleaned tables by fingerprint.
#[derive(Debug, Default)]
pub struct CleaningCache {
    entries: Mutex<HashMap<String, Arc<CleanedTable>>>,
}

impl CleaningCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for this input, cleaning it on a miss.
    ///
    /// The lock is not held while cleaning; two concurrent misses on the
    /// same input both clean and the first stored result is kept.
    pub fn get_or_clean(&self, raw: Arc<RawTable>, options: &CleaningOptions) -> Arc<CleanedTable> {
        let key = fingerprint(&raw, options);
        if let Some(hit) = self.lock().get(&key) {
            debug!(fingerprint = %key, "cleaning cache hit");
            return Arc::clone(hit);
        }
        debug!(fingerprint = %key, "cleaning cache miss");
        let cleaned = Arc::new(clean_table(raw, options));
        Arc::clone(self.lock().entry(key).or_insert(cleaned))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<CleanedTable>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
