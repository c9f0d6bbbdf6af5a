//! Duplicate substring enumeration
//!
//! Walks the LCP array of a built suffix array once. Every pair of adjacent
//! rows with a non-zero LCP shares a prefix; each prefix length from the
//! configured minimum up to the LCP value is a substring occurring at both
//! rows' positions. Lengths are capped by the distance between the two
//! positions so the occurrences never overlap.

use super::store::DuplicateStore;
use super::suffix_array::{Layout, SuffixIndex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for duplicate scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Shortest substring to report (default: 2, values below 1 act as 1)
    pub min_length: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { min_length: 2 }
    }
}

/// Enumerates repeated substrings of an indexed text
pub struct DuplicateScanner<'a, L: Layout> {
    index: &'a SuffixIndex<L>,
    config: ScanConfig,
}

impl<'a, L: Layout> DuplicateScanner<'a, L> {
    pub fn new(index: &'a SuffixIndex<L>) -> Self {
        Self::with_config(index, ScanConfig::default())
    }

    pub fn with_config(index: &'a SuffixIndex<L>, config: ScanConfig) -> Self {
        Self { index, config }
    }

    /// Scan into a fresh store
    pub fn scan(&self) -> DuplicateStore {
        let mut store = DuplicateStore::new();
        self.scan_into(&mut store);
        store
    }

    /// Scan, adding occurrences to `store`
    pub fn scan_into(&self, store: &mut DuplicateStore) {
        let index = self.index;
        let text = index.text();
        let lcp = index.lcp_array();
        let min_length = self.config.min_length.max(1);
        let before = store.len();

        for row in 1..index.len() {
            if lcp[row] <= 0 {
                continue;
            }

            let a = index.get_pos(row - 1);
            let b = index.get_pos(row);
            let cap = (lcp[row] as usize).min(a.abs_diff(b));

            for len in min_length..=cap {
                store.insert(&text[a..a + len], a);
                store.insert(&text[b..b + len], b);
            }
        }

        debug!(
            len = index.len(),
            min_length,
            added = store.len() - before,
            "scanned for duplicates"
        );
    }
}

impl<L: Layout> SuffixIndex<L> {
    /// Every duplicated substring of at least `min_length` bytes
    pub fn find_all_duplicates(&self, min_length: usize) -> DuplicateStore {
        DuplicateScanner::with_config(self, ScanConfig { min_length }).scan()
    }
}
