//! Incremental insertion
//!
//! Appending bytes changes the content of every existing suffix, so the LCP
//! array is re-derived afterwards. Prepending into a reverse array leaves every
//! existing suffix (and its key) untouched: each new suffix is placed with one
//! binary search and only the LCP entries on either side of it are patched.

use super::builder::{ReverseSuffixArray, SuffixIndex};
use super::compare::compare_suffixes;
use super::types::Layout;
use std::cmp::Ordering;
use tracing::trace;

impl<L: Layout> SuffixIndex<L> {
    /// Append `substring` to the text and index the new suffixes
    pub fn insert_right(&mut self, substring: impl AsRef<[u8]>) {
        let addition = self.config.normalize(substring.as_ref());
        if addition.is_empty() {
            return;
        }

        let old_len = self.text.len();
        self.text.extend_from_slice(&addition);
        let n = self.text.len();

        for key in &mut self.keys {
            *key = L::key(L::start(*key, old_len), n);
        }
        self.restore_order();

        for start in old_len..n {
            let row = self.find_sa_pos(start);
            self.keys.insert(row, L::key(start, n));
        }
        self.rebuild_lcp();

        trace!(added = addition.len(), len = n, "appended to suffix array");
    }

    /// Re-sort rows whose relative order changed after an append
    ///
    /// Only suffixes that were strict prefixes of other suffixes can move, so
    /// the keys are nearly sorted and the stable sort runs close to linear.
    fn restore_order(&mut self) {
        let n = self.text.len();
        let text = &self.text;
        let ordered = self.keys.windows(2).all(|pair| {
            compare_suffixes(text, L::start(pair[0], n), L::start(pair[1], n)) == Ordering::Less
        });

        if !ordered {
            self.keys
                .sort_by(|&a, &b| compare_suffixes(text, L::start(a, n), L::start(b, n)));
        }
    }
}

impl ReverseSuffixArray {
    /// Prepend `substring` to the text and index the new suffixes
    ///
    /// Bytes are indexed right to left, each with one binary search and at
    /// most two LCP comparisons.
    pub fn insert_left(&mut self, substring: impl AsRef<[u8]>) {
        let addition = self.config.normalize(substring.as_ref());
        if addition.is_empty() {
            return;
        }

        let old_len = self.text.len();
        let mut text = Vec::with_capacity(old_len + addition.len());
        text.extend_from_slice(&addition);
        text.extend_from_slice(&self.text);
        self.text = text;
        let n = self.text.len();

        // Keys of the new suffixes are old_len..n; start offsets run right to left
        for key in old_len..n {
            let row = self.find_sa_pos(n - 1 - key);
            self.keys.insert(row, key);
            self.lcp.insert(row, 0);
            self.patch_lcp(row);
        }

        trace!(added = addition.len(), len = n, "prepended to reverse suffix array");
    }

    /// Recompute the LCP entries touching a freshly inserted `row`
    fn patch_lcp(&mut self, row: usize) {
        self.lcp[row] = self.lcp_with_previous(row);
        if row + 1 < self.len() {
            self.lcp[row + 1] = self.lcp_with_previous(row + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::index::suffix_array::{ReverseSuffixArray, SuffixArray};

    fn items<L: crate::index::suffix_array::Layout>(
        sa: &crate::index::suffix_array::SuffixIndex<L>,
    ) -> Vec<String> {
        sa.suffixes()
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .collect()
    }

    #[test]
    fn test_reverse_insert_right() {
        let mut rsa = ReverseSuffixArray::new("ABCAB").unwrap();
        rsa.insert_right("Z");

        assert_eq!(
            items(&rsa),
            vec!["ABCABZ", "ABZ", "BCABZ", "BZ", "CABZ", "Z"]
        );
        assert_eq!(rsa.lcp_array(), &[-1, 2, 0, 1, 0, 0]);
    }

    #[test]
    fn test_insert_right_reorders_prefixes() {
        // "AB" sorts before "ABCAB" until the append
        let mut sa = SuffixArray::new("ABCAB").unwrap();
        assert_eq!(items(&sa)[..2], ["AB", "ABCAB"]);

        sa.insert_right("Z");
        assert_eq!(sa, SuffixArray::new("ABCABZ").unwrap());
    }

    #[test]
    fn test_insert_right_many() {
        let mut sa = SuffixArray::new("ban").unwrap();
        sa.insert_right("ana");
        assert_eq!(sa, SuffixArray::new("banana").unwrap());
        assert_eq!(sa.lcp_array(), &[-1, 1, 3, 0, 0, 2]);
    }

    #[test]
    fn test_insert_left_matches_rebuild() {
        let mut rsa = ReverseSuffixArray::new("B").unwrap();
        for chunk in ["A", "C", "BA", "ABC"] {
            rsa.insert_left(chunk);
        }
        assert_eq!(rsa.text(), b"ABCBACAB");
        assert_eq!(rsa, ReverseSuffixArray::new("ABCBACAB").unwrap());
    }

    #[test]
    fn test_insert_left_keeps_existing_keys() {
        let mut rsa = ReverseSuffixArray::new("AB").unwrap();
        let before = rsa.search_reverse(b"AB");
        rsa.insert_left("XYZ");
        assert_eq!(rsa.search_reverse(b"AB"), before);
        assert_eq!(rsa.search(b"AB"), Some(3));
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut rsa = ReverseSuffixArray::new("abc").unwrap();
        let snapshot = rsa.clone();
        rsa.insert_left("");
        rsa.insert_right(b"");
        assert_eq!(rsa, snapshot);
    }
}
