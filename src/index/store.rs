//! Store of duplicate substrings found by the scanner
//!
//! Holds a set of `(substring, position)` occurrences ordered by substring and
//! then by position. Inserting an occurrence that is already present is a
//! no-op. The aggregate queries group and count occurrences the way the
//! reporting side of the CLI needs them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// One occurrence of a duplicated substring
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    pub substring: Vec<u8>,
    pub position: usize,
}

/// Deduplicating set of occurrences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateStore {
    occurrences: BTreeSet<Occurrence>,
}

impl DuplicateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence; returns `false` if it was already stored
    pub fn insert(&mut self, substring: &[u8], position: usize) -> bool {
        self.occurrences.insert(Occurrence {
            substring: substring.to_vec(),
            position,
        })
    }

    pub fn contains(&self, substring: &[u8], position: usize) -> bool {
        self.occurrences.contains(&Occurrence {
            substring: substring.to_vec(),
            position,
        })
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// All occurrences sorted by substring, then position
    pub fn duplicates(&self) -> impl Iterator<Item = &Occurrence> + '_ {
        self.occurrences.iter()
    }

    /// Positions of each duplicated substring
    pub fn positions_by_substring(&self) -> BTreeMap<&[u8], Vec<usize>> {
        let mut map: BTreeMap<&[u8], Vec<usize>> = BTreeMap::new();
        for occ in &self.occurrences {
            map.entry(occ.substring.as_slice()).or_default().push(occ.position);
        }
        map
    }

    /// Duplicated substrings starting at each position
    pub fn substrings_by_position(&self) -> BTreeMap<usize, Vec<&[u8]>> {
        let mut map: BTreeMap<usize, Vec<&[u8]>> = BTreeMap::new();
        for occ in &self.occurrences {
            map.entry(occ.position).or_default().push(occ.substring.as_slice());
        }
        map
    }

    /// Number of positions each substring occurs at
    pub fn substring_counts(&self) -> BTreeMap<&[u8], usize> {
        let mut map: BTreeMap<&[u8], usize> = BTreeMap::new();
        for occ in &self.occurrences {
            *map.entry(occ.substring.as_slice()).or_default() += 1;
        }
        map
    }

    /// Length of the longest duplicated substring starting at each position
    pub fn longest_by_position(&self) -> BTreeMap<usize, usize> {
        let mut map: BTreeMap<usize, usize> = BTreeMap::new();
        for occ in &self.occurrences {
            let longest = map.entry(occ.position).or_default();
            *longest = (*longest).max(occ.substring.len());
        }
        map
    }

    /// Dense per-position series of [`longest_by_position`](Self::longest_by_position)
    ///
    /// Positions without a duplicate are zero. Occurrences at or beyond `len`
    /// are ignored.
    pub fn length_series(&self, len: usize) -> Vec<usize> {
        let mut series = vec![0; len];
        for (position, longest) in self.longest_by_position() {
            if let Some(slot) = series.get_mut(position) {
                *slot = longest;
            }
        }
        series
    }

    /// `(length, replicas)` for each distinct substring, in substring order
    pub fn substring_length_and_replicas(&self) -> Vec<(usize, usize)> {
        self.substring_counts()
            .into_iter()
            .map(|(substring, count)| (substring.len(), count))
            .collect()
    }

    /// How many distinct substrings share each `(length, replicas)` pair
    pub fn length_replica_histogram(&self) -> BTreeMap<(usize, usize), usize> {
        let mut histogram = BTreeMap::new();
        for pair in self.substring_length_and_replicas() {
            *histogram.entry(pair).or_default() += 1;
        }
        histogram
    }

    /// Save the store as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer(file, self)?;
        debug!(path = %path.display(), occurrences = self.len(), "saved duplicate store");
        Ok(())
    }

    /// Load a store written by [`save`](Self::save)
    pub fn load(path: &Path) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(file)?)
    }
}

impl<'a> Extend<(&'a [u8], usize)> for DuplicateStore {
    fn extend<I: IntoIterator<Item = (&'a [u8], usize)>>(&mut self, iter: I) {
        for (substring, position) in iter {
            self.insert(substring, position);
        }
    }
}
