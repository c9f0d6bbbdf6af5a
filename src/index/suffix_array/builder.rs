//! Suffix array construction
//!
//! Builds the sorted suffix array of a text by:
//! 1. Creating the array of all suffix start offsets
//! 2. Sorting the offsets by comparing the suffixes they point to
//! 3. Deriving the LCP array in one pass over adjacent rows
//!
//! The same engine serves both key layouts; see [`Layout`].

use super::compare::{common_prefix_len, compare_suffixes};
use super::types::*;
use crate::error::{Error, Result};
use rayon::prelude::*;
use std::marker::PhantomData;
use std::time::Instant;
use tracing::debug;

/// Suffix array and LCP array over an owned, growable text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixIndex<L: Layout> {
    /// Indexed text (case-folded if configured)
    pub(super) text: Vec<u8>,
    /// One key per suffix, in sorted suffix order
    pub(super) keys: Vec<usize>,
    /// `lcp[0]` is [`LCP_SENTINEL`], `lcp[i]` compares rows `i - 1` and `i`
    pub(super) lcp: Vec<isize>,
    pub(super) config: SuffixArrayConfig,
    pub(super) _layout: PhantomData<L>,
}

/// Suffix array keyed by start offset
pub type SuffixArray = SuffixIndex<Forward>;

/// Suffix array keyed by distance from the end, grows on the left
pub type ReverseSuffixArray = SuffixIndex<Reverse>;

impl<L: Layout> SuffixIndex<L> {
    /// Build a suffix array with the default configuration
    pub fn new(text: impl AsRef<[u8]>) -> Result<Self> {
        Self::with_config(text, SuffixArrayConfig::default())
    }

    /// Build a suffix array
    ///
    /// Fails with [`Error::InvalidInput`] on an empty text.
    pub fn with_config(text: impl AsRef<[u8]>, config: SuffixArrayConfig) -> Result<Self> {
        let text = config.normalize(text.as_ref());
        if text.is_empty() {
            return Err(Error::invalid_input(
                "cannot build a suffix array over an empty sequence",
            ));
        }

        let started = Instant::now();
        let n = text.len();
        let keys = sort_suffixes(&text, config.parallel_sort_threshold)
            .into_iter()
            .map(|start| L::key(start, n))
            .collect();

        let mut index = Self {
            text,
            keys,
            lcp: Vec::new(),
            config,
            _layout: PhantomData,
        };
        index.rebuild_lcp();

        debug!(
            len = n,
            direction = ?L::DIRECTION,
            elapsed_us = started.elapsed().as_micros() as u64,
            "built suffix array"
        );
        Ok(index)
    }

    /// Assemble an index from parts that were already validated
    pub(super) fn from_parts(
        text: Vec<u8>,
        keys: Vec<usize>,
        lcp: Vec<isize>,
        config: SuffixArrayConfig,
    ) -> Self {
        Self {
            text,
            keys,
            lcp,
            config,
            _layout: PhantomData,
        }
    }

    /// Number of suffixes (equals the text length)
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false: construction rejects empty texts
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The indexed text
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Raw keys in sorted suffix order
    #[inline]
    pub fn suffix_array(&self) -> &[usize] {
        &self.keys
    }

    /// LCP array, `LCP[0] == LCP_SENTINEL`
    #[inline]
    pub fn lcp_array(&self) -> &[isize] {
        &self.lcp
    }

    pub fn config(&self) -> &SuffixArrayConfig {
        &self.config
    }

    pub fn direction(&self) -> Direction {
        L::DIRECTION
    }

    /// Start offset (from the left) of the suffix at `row`
    ///
    /// Panics if `row >= self.len()`.
    #[inline]
    pub fn get_pos(&self, row: usize) -> usize {
        L::start(self.keys[row], self.text.len())
    }

    /// Distance from the last byte of the text to the start of the suffix at `row`
    #[inline]
    pub fn get_pos_from_end(&self, row: usize) -> usize {
        self.text.len() - 1 - self.get_pos(row)
    }

    /// Content of the suffix at `row`
    #[inline]
    pub fn get_item(&self, row: usize) -> &[u8] {
        &self.text[self.get_pos(row)..]
    }

    /// Iterate suffix contents in sorted order
    pub fn suffixes(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.len()).map(move |row| self.get_item(row))
    }

    /// Start offsets (from the left) in sorted suffix order
    pub fn positions(&self) -> Vec<usize> {
        (0..self.len()).map(|row| self.get_pos(row)).collect()
    }

    /// One `row suffix` line per row
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (row, suffix) in self.suffixes().enumerate() {
            out.push_str(&format!("{} {}\n", row, String::from_utf8_lossy(suffix)));
        }
        out
    }

    /// LCP value between `row` and the row above it
    pub(super) fn lcp_with_previous(&self, row: usize) -> isize {
        if row == 0 {
            LCP_SENTINEL
        } else {
            common_prefix_len(self.get_item(row - 1), self.get_item(row)) as isize
        }
    }

    /// Re-derive the whole LCP array from the current rows
    pub(super) fn rebuild_lcp(&mut self) {
        let lcp = (0..self.len()).map(|row| self.lcp_with_previous(row)).collect();
        self.lcp = lcp;
    }
}

/// Sort all suffix start offsets of `text`
///
/// Time: O(n log n) comparisons, each O(n) in the worst case
/// Space: O(n) for the suffix array
pub(crate) fn sort_suffixes(text: &[u8], parallel_threshold: usize) -> Vec<usize> {
    let mut sa: Vec<usize> = (0..text.len()).collect();

    if text.len() > parallel_threshold {
        sa.par_sort_unstable_by(|&a, &b| compare_suffixes(text, a, b));
    } else {
        sa.sort_unstable_by(|&a, &b| compare_suffixes(text, a, b));
    }

    sa
}
