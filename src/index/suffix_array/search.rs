//! Binary search over an in-memory suffix array
//!
//! All occurrences of a pattern occupy a contiguous run of rows, so finding
//! any one of them is O(m log n) and collecting the rest only walks the run.

use super::builder::SuffixIndex;
use super::compare::{compare_prefix, compare_suffixes};
use super::types::Layout;
use std::cmp::Ordering;

impl<L: Layout> SuffixIndex<L> {
    /// Find a row whose suffix starts with `target`
    ///
    /// Returns the first row the bisection lands on, which is not necessarily
    /// the lowest matching row. An empty pattern matches nothing.
    pub fn search_row(&self, target: &[u8]) -> Option<usize> {
        if target.is_empty() {
            return None;
        }
        let target = self.config.fold(target);

        let mut lo = 0;
        let mut hi = self.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match compare_prefix(self.get_item(mid), &target) {
                Ordering::Equal => return Some(mid),
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
            }
        }

        None
    }

    /// Leftmost position of `target` in the text
    ///
    /// Unlike [`search_row`](Self::search_row) this walks the whole run of
    /// matching rows, so the answer does not depend on where the bisection
    /// lands.
    pub fn search(&self, target: &[u8]) -> Option<usize> {
        self.search_all(target).into_iter().min()
    }

    /// Position (distance from the end) of an occurrence of `target`
    pub fn search_reverse(&self, target: &[u8]) -> Option<usize> {
        self.search_row(target).map(|row| self.get_pos_from_end(row))
    }

    /// Positions of every occurrence of `target`
    ///
    /// The hit found by [`search_row`](Self::search_row) comes first, then
    /// the matches on the rows below it, then the rows above it.
    pub fn search_all(&self, target: &[u8]) -> Vec<usize> {
        let Some(hit) = self.search_row(target) else {
            return Vec::new();
        };
        let target = self.config.fold(target);
        let matches = |row: &usize| self.get_item(*row).starts_with(&target);

        let mut positions = vec![self.get_pos(hit)];
        positions.extend(
            (hit + 1..self.len())
                .take_while(matches)
                .map(|row| self.get_pos(row)),
        );
        positions.extend((0..hit).rev().take_while(matches).map(|row| self.get_pos(row)));
        positions
    }

    /// Number of occurrences of `target`
    pub fn count_matches(&self, target: &[u8]) -> usize {
        self.search_all(target).len()
    }

    /// Check if `target` occurs in the text
    pub fn contains(&self, target: &[u8]) -> bool {
        self.search_row(target).is_some()
    }

    /// Row at which the suffix starting at `start` belongs
    ///
    /// `start` must already be a valid offset into the text; the rows searched
    /// are the ones currently stored.
    pub(super) fn find_sa_pos(&self, start: usize) -> usize {
        let n = self.text.len();
        self.keys.partition_point(|&key| {
            compare_suffixes(&self.text, L::start(key, n), start) == Ordering::Less
        })
    }
}
