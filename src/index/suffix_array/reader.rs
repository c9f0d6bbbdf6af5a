//! Suffix array reader
//!
//! Provides memory-mapped access to a persisted suffix array with O(m log n)
//! search, and loading back into an in-memory [`SuffixIndex`].

use super::builder::SuffixIndex;
use super::compare::{common_prefix_len, compare_suffixes};
use super::types::*;
use crate::error::{Error, Result};
use memmap2::Mmap;
use std::cmp::Ordering;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Reader for a suffix array directory
///
/// Uses memory-mapped files so searches do not need to load the whole array.
pub struct SuffixArrayReader {
    /// Memory-mapped text
    text_mmap: Mmap,
    /// Memory-mapped suffix array
    sa_mmap: Mmap,
    /// Memory-mapped LCP array
    lcp_mmap: Mmap,
    /// Contents of meta.json
    meta: SuffixArrayMeta,
    /// Number of suffixes
    suffix_count: u64,
}

impl SuffixArrayReader {
    /// Open a suffix array from an index directory
    ///
    /// Returns `Ok(None)` if the directory holds no suffix array files.
    pub fn open(dir: &Path) -> Result<Option<Self>> {
        let text_path = dir.join("text.bin");
        let sa_path = dir.join("sa.bin");
        let lcp_path = dir.join("lcp.bin");
        let meta_path = dir.join("meta.json");

        if !text_path.exists() || !sa_path.exists() || !lcp_path.exists() || !meta_path.exists() {
            return Ok(None);
        }

        let meta: SuffixArrayMeta = serde_json::from_slice(&std::fs::read(&meta_path)?)?;

        // Memory-map the text and both arrays
        let text_mmap = unsafe { Mmap::map(&File::open(&text_path)?)? };
        let sa_mmap = unsafe { Mmap::map(&File::open(&sa_path)?)? };
        let lcp_mmap = unsafe { Mmap::map(&File::open(&lcp_path)?)? };

        let suffix_count = Self::check_header("sa.bin", &sa_mmap, &meta, 8)?;
        let lcp_count = Self::check_header("lcp.bin", &lcp_mmap, &meta, 8)?;

        if lcp_count != suffix_count {
            return Err(Error::format("lcp.bin", "entry count differs from sa.bin"));
        }
        if text_mmap.len() as u64 != meta.text_len || suffix_count != meta.text_len {
            return Err(Error::format("text.bin", "length differs from meta.json"));
        }
        if suffix_count == 0 {
            return Err(Error::format("sa.bin", "suffix array is empty"));
        }

        Ok(Some(Self {
            text_mmap,
            sa_mmap,
            lcp_mmap,
            meta,
            suffix_count,
        }))
    }

    /// Validate the header of a mapped array file and return its entry count
    fn check_header(
        file: &'static str,
        data: &[u8],
        meta: &SuffixArrayMeta,
        entry_size: usize,
    ) -> Result<u64> {
        let header =
            ArrayHeader::parse(data).ok_or_else(|| Error::format(file, "file too small"))?;

        if header.magic != SA_MAGIC {
            return Err(Error::format(file, "bad magic number"));
        }
        if header.version != SA_VERSION {
            return Err(Error::format(
                file,
                format!("unsupported version {}", header.version),
            ));
        }
        if header.direction() != meta.direction {
            return Err(Error::format(file, "direction differs from meta.json"));
        }

        let expected = header
            .count
            .checked_mul(entry_size as u64)
            .and_then(|bytes| bytes.checked_add(ArrayHeader::SIZE as u64))
            .ok_or_else(|| Error::format(file, "entry count too large"))?;
        if data.len() as u64 != expected {
            return Err(Error::format(
                file,
                format!("expected {} bytes, found {}", expected, data.len()),
            ));
        }

        Ok(header.count)
    }

    /// Get the key at row i of the suffix array
    #[inline]
    fn key(&self, i: u64) -> u64 {
        let offset = ArrayHeader::SIZE + i as usize * 8;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.sa_mmap[offset..offset + 8]);
        u64::from_le_bytes(buf)
    }

    /// Get the LCP value at row i
    #[inline]
    fn lcp(&self, i: u64) -> i64 {
        let offset = ArrayHeader::SIZE + i as usize * 8;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.lcp_mmap[offset..offset + 8]);
        i64::from_le_bytes(buf)
    }

    /// Start offset of the suffix stored under `key`
    #[inline]
    fn start(&self, key: u64) -> Option<usize> {
        let len = self.text_mmap.len() as u64;
        if key >= len {
            return None;
        }
        Some(match self.meta.direction {
            Direction::Forward => key as usize,
            Direction::Reverse => (len - 1 - key) as usize,
        })
    }

    /// Suffix content at row i, empty if the stored key is out of range
    #[inline]
    fn suffix(&self, i: u64) -> &[u8] {
        match self.start(self.key(i)) {
            Some(start) => &self.text_mmap[start..],
            None => &[],
        }
    }

    /// The persisted text
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text_mmap
    }

    pub fn meta(&self) -> &SuffixArrayMeta {
        &self.meta
    }

    /// Search for a pattern in the suffix array
    ///
    /// Returns the range [lo, hi) of rows whose suffixes start with the pattern.
    pub fn search(&self, pattern: &[u8]) -> (u64, u64) {
        if pattern.is_empty() || self.suffix_count == 0 {
            return (0, 0);
        }

        let pattern = self.meta.config.fold(pattern);
        let lo = self.lower_bound(&pattern);
        let hi = self.upper_bound(&pattern, lo);
        (lo, hi)
    }

    /// Find first row whose suffix starts with pattern (or would if inserted)
    fn lower_bound(&self, pattern: &[u8]) -> u64 {
        let mut lo: u64 = 0;
        let mut hi: u64 = self.suffix_count;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let suffix = self.suffix(mid);

            // Compare the suffix with the pattern (only up to pattern length)
            let cmp_len = pattern.len().min(suffix.len());
            if &suffix[..cmp_len] < pattern {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Find first row at or after `start` whose suffix does NOT start with pattern
    fn upper_bound(&self, pattern: &[u8], start: u64) -> u64 {
        let mut lo = start;
        let mut hi: u64 = self.suffix_count;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.suffix(mid).starts_with(pattern) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Start offsets of every occurrence, in suffix order
    pub fn search_positions(&self, pattern: &[u8]) -> Vec<usize> {
        let (lo, hi) = self.search(pattern);
        (lo..hi).filter_map(|i| self.start(self.key(i))).collect()
    }

    /// Get the number of matches for a pattern
    pub fn count_matches(&self, pattern: &[u8]) -> u64 {
        let (lo, hi) = self.search(pattern);
        hi - lo
    }

    /// Check if pattern exists in the suffix array
    pub fn contains(&self, pattern: &[u8]) -> bool {
        let (lo, hi) = self.search(pattern);
        lo < hi
    }

    /// Load the persisted array into memory
    ///
    /// The stored keys must form a sorted permutation and the stored LCP
    /// values must match the text, so the result is identical to a fresh
    /// build over the same text.
    pub fn load<L: Layout>(&self) -> Result<SuffixIndex<L>> {
        if self.meta.direction != L::DIRECTION {
            return Err(Error::Precondition(format!(
                "stored suffix array is {:?}, requested {:?}",
                self.meta.direction,
                L::DIRECTION
            )));
        }

        let text = self.text_mmap.to_vec();
        let n = text.len();
        let mut seen = vec![false; n];
        let mut keys = Vec::with_capacity(n);
        let mut lcp = Vec::with_capacity(n);

        for i in 0..self.suffix_count {
            let key = self.key(i) as usize;
            if key >= n || std::mem::replace(&mut seen[key], true) {
                return Err(Error::format(
                    "sa.bin",
                    format!("row {} is not a permutation entry", i),
                ));
            }
            keys.push(key);

            let start = L::start(key, n);
            let expected = match keys.len() {
                1 => LCP_SENTINEL,
                _ => {
                    let prev = L::start(keys[keys.len() - 2], n);
                    if compare_suffixes(&text, prev, start) != Ordering::Less {
                        return Err(Error::format("sa.bin", format!("row {} is out of order", i)));
                    }
                    common_prefix_len(&text[prev..], &text[start..]) as isize
                }
            };

            if self.lcp(i) as isize != expected {
                return Err(Error::format("lcp.bin", format!("row {} has a wrong value", i)));
            }
            lcp.push(expected);
        }

        debug!(len = n, direction = ?L::DIRECTION, "loaded suffix array");
        Ok(SuffixIndex::from_parts(text, keys, lcp, self.meta.config.clone()))
    }

    /// Get statistics about this suffix array
    pub fn stats(&self) -> SuffixArrayStats {
        let max_lcp = (1..self.suffix_count)
            .map(|i| self.lcp(i))
            .max()
            .unwrap_or(0)
            .max(0) as u64;

        SuffixArrayStats {
            direction: self.meta.direction,
            text_size: self.text_mmap.len(),
            suffix_count: self.suffix_count,
            max_lcp,
        }
    }
}

impl<L: Layout> SuffixIndex<L> {
    /// Load an index previously written with [`save`](Self::save)
    pub fn load(dir: &Path) -> Result<Self> {
        let reader = SuffixArrayReader::open(dir)?.ok_or_else(|| {
            Error::Precondition(format!("no suffix array found in {}", dir.display()))
        })?;
        reader.load()
    }
}

/// Statistics about a suffix array
#[derive(Debug, Clone)]
pub struct SuffixArrayStats {
    pub direction: Direction,
    pub text_size: usize,
    pub suffix_count: u64,
    /// Length of the longest repeated substring
    pub max_lcp: u64,
}
