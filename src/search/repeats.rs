//! Super-maximal repeat search
//!
//! Scans a text from its last byte towards its first while growing a
//! [`ReverseSuffixArray`] over the part already scanned. At each cursor the
//! current candidate (the bytes from the cursor up to where the current match
//! began) is looked up in the index:
//!
//! - found: the candidate grows by one byte to the left;
//! - not found, single byte: the byte joins the index and the cursor moves on;
//! - not found, longer: the match so far is reported, the index catches up to
//!   the cursor and the candidate restarts at the cursor byte.
//!
//! Because the index only ever grows on the left, positions already reported
//! by the index (distances from its end) stay valid for the whole scan.

use crate::error::{Error, Result};
use crate::index::suffix_array::ReverseSuffixArray;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A run of `length` bytes found at two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Repeat {
    pub length: usize,
    /// Where the scan found the run
    pub first: usize,
    /// Where the earlier copy in the index starts
    pub second: usize,
}

impl Repeat {
    pub const fn new(length: usize, first: usize, second: usize) -> Self {
        Self {
            length,
            first,
            second,
        }
    }

    pub const fn as_tuple(&self) -> (usize, usize, usize) {
        (self.length, self.first, self.second)
    }
}

/// How reported positions are numbered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Coordinates {
    /// Offsets from the first byte
    #[default]
    FromStart,
    /// Distances from the last byte
    FromEnd,
}

/// Options for [`super_maximal_repeats_left`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatOptions {
    pub coordinates: Coordinates,
    /// Byte that never matches, so no repeat can span it
    pub ignore: Option<u8>,
}

/// Find super-maximal repeats scanning from the right end of `text` to the left
///
/// With a `seed` index, `text` is treated as prepended to the seed's text:
/// matches may point into the seed, positions are relative to the combined
/// text, and the seed is left holding the combined text so it can seed the
/// next chunk. Without a seed, the last byte of `text` starts the index.
///
/// Fails with [`Error::InvalidInput`] on an empty `text`.
pub fn super_maximal_repeats_left(
    text: &[u8],
    seed: Option<&mut ReverseSuffixArray>,
    options: RepeatOptions,
) -> Result<Vec<Repeat>> {
    let n = text.len();
    if n == 0 {
        return Err(Error::invalid_input("cannot search repeats in an empty sequence"));
    }

    let mut owned: ReverseSuffixArray;
    let (index, mut i, offset) = match seed {
        Some(seed) => {
            let offset = seed.len();
            (seed, n - 1, offset)
        }
        None => {
            owned = ReverseSuffixArray::new(&text[n - 1..])?;
            if n == 1 {
                return Ok(Vec::new());
            }
            (&mut owned, n - 2, 0)
        }
    };

    // All positions live in the combined text of `offset + n` bytes
    let last = n + offset - 1;
    let record = |length: usize, anchor: usize, found: usize| match options.coordinates {
        Coordinates::FromStart => Repeat::new(length, anchor, last - found),
        Coordinates::FromEnd => Repeat::new(length, last - anchor, found),
    };

    let mut repeats = Vec::new();
    let mut anchor = i;
    let mut prev_found = 0;
    let mut length = 0;
    let mut candidate_len = 1;

    loop {
        let candidate = &text[i..i + candidate_len];
        let found = if options.ignore == Some(text[i]) {
            None
        } else {
            index.search_reverse(candidate)
        };

        match found {
            Some(found) if i > 0 => {
                anchor = i;
                prev_found = found;
                length += 1;
                candidate_len += 1;
                i -= 1;
            }
            Some(found) => {
                let repeat = record(length + 1, i, found);
                trace!(?repeat, "repeat at start of text");
                repeats.push(repeat);
                // Keep the index complete so it can seed another scan
                index.insert_left(candidate);
                break;
            }
            None if candidate_len == 1 => {
                index.insert_left(candidate);
                if i == 0 {
                    break;
                }
                i -= 1;
                anchor = i;
            }
            None => {
                let repeat = record(length, anchor, prev_found);
                trace!(?repeat, "repeat");
                repeats.push(repeat);
                index.insert_left(&text[i + 1..i + candidate_len]);
                candidate_len = 1;
                length = 0;
            }
        }
    }

    Ok(repeats)
}

/// Find super-maximal repeats scanning from the left end of `text` to the right
///
/// Runs [`super_maximal_repeats_left`] over the reversed text with end-relative
/// coordinates and maps each run back to its forward start offset. A `seed`
/// must hold reversed text.
pub fn super_maximal_repeats_right(
    text: &[u8],
    seed: Option<&mut ReverseSuffixArray>,
    ignore: Option<u8>,
) -> Result<Vec<Repeat>> {
    let reversed: Vec<u8> = text.iter().rev().copied().collect();
    let options = RepeatOptions {
        coordinates: Coordinates::FromEnd,
        ignore,
    };

    let repeats = super_maximal_repeats_left(&reversed, seed, options)?
        .into_iter()
        .map(|r| Repeat::new(r.length, r.first + 1 - r.length, r.second + 1 - r.length))
        .collect();
    Ok(repeats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left(text: &str) -> Vec<(usize, usize, usize)> {
        super_maximal_repeats_left(text.as_bytes(), None, RepeatOptions::default())
            .unwrap()
            .iter()
            .map(Repeat::as_tuple)
            .collect()
    }

    fn left_from_end(
        text: &str,
        seed: Option<&mut ReverseSuffixArray>,
    ) -> Vec<(usize, usize, usize)> {
        let options = RepeatOptions {
            coordinates: Coordinates::FromEnd,
            ..Default::default()
        };
        super_maximal_repeats_left(text.as_bytes(), seed, options)
            .unwrap()
            .iter()
            .map(Repeat::as_tuple)
            .collect()
    }

    fn right(text: &str) -> Vec<(usize, usize, usize)> {
        super_maximal_repeats_right(text.as_bytes(), None, None)
            .unwrap()
            .iter()
            .map(Repeat::as_tuple)
            .collect()
    }

    #[test]
    fn test_left() {
        assert_eq!(left("ABCAB"), vec![(2, 0, 3)]);
        assert_eq!(left("ABCABC"), vec![(3, 0, 3)]);
        assert_eq!(left("ABCABCABC"), vec![(3, 3, 6), (3, 0, 3)]);
        assert_eq!(
            left("DCBABCCDCBA"),
            vec![(1, 6, 8), (1, 5, 8), (1, 4, 9), (4, 0, 7)]
        );
        assert_eq!(left("ABCABCABCABC"), vec![(3, 6, 9), (6, 0, 6)]);
    }

    #[test]
    fn test_left_repeats_not_at_ends() {
        assert_eq!(left("AZZBZZC"), vec![(1, 4, 5), (2, 1, 4)]);
    }

    #[test]
    fn test_left_from_end() {
        assert_eq!(left_from_end("ABCAB", None), vec![(2, 4, 1)]);
        assert_eq!(left_from_end("ABCABC", None), vec![(3, 5, 2)]);
        assert_eq!(left_from_end("ABCABCABC", None), vec![(3, 5, 2), (3, 8, 5)]);
        assert_eq!(
            left_from_end("DCBABCCDCBA", None),
            vec![(1, 4, 2), (1, 5, 2), (1, 6, 1), (4, 10, 3)]
        );
        assert_eq!(left_from_end("ABCABCABCABC", None), vec![(3, 5, 2), (6, 11, 5)]);
    }

    #[test]
    fn test_left_with_seed() {
        let mut seed = ReverseSuffixArray::new("ABC").unwrap();
        let repeats: Vec<_> =
            super_maximal_repeats_left(b"ABCABCABC", Some(&mut seed), RepeatOptions::default())
                .unwrap()
                .iter()
                .map(Repeat::as_tuple)
                .collect();
        assert_eq!(repeats, vec![(3, 6, 9), (6, 0, 6)]);
        assert_eq!(seed.text(), b"ABCABCABCABC");
    }

    #[test]
    fn test_seed_carries_across_chunks() {
        let mut seed = ReverseSuffixArray::new("C").unwrap();
        assert_eq!(left_from_end("AB", Some(&mut seed)), vec![]);
        assert_eq!(left_from_end("ABC", Some(&mut seed)), vec![(3, 5, 2)]);
        assert_eq!(left_from_end("ABC", Some(&mut seed)), vec![(3, 8, 5)]);
        assert_eq!(seed.text(), b"ABCABCABC");
        assert_eq!(seed, ReverseSuffixArray::new("ABCABCABC").unwrap());
    }

    #[test]
    fn test_right() {
        assert_eq!(right("ABCAB"), vec![(2, 3, 0)]);
        assert_eq!(right("ABCABCABC"), vec![(3, 3, 0), (3, 6, 3)]);
        assert_eq!(right("AZZBZZC"), vec![(1, 2, 1), (2, 4, 1)]);
    }

    #[test]
    fn test_ignore_blocks_matches() {
        let options = RepeatOptions {
            ignore: Some(b'X'),
            ..Default::default()
        };
        let repeats = super_maximal_repeats_left(b"ABCXABC", None, options).unwrap();
        assert_eq!(repeats, vec![Repeat::new(3, 0, 4)]);

        // the barrier byte itself never extends a match
        let repeats = super_maximal_repeats_left(b"XAXA", None, options).unwrap();
        assert_eq!(repeats, vec![Repeat::new(1, 1, 3)]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(matches!(
            super_maximal_repeats_left(b"", None, RepeatOptions::default()),
            Err(Error::InvalidInput(_))
        ));
        assert!(super_maximal_repeats_right(b"", None, None).is_err());
        assert!(left("A").is_empty());
        assert_eq!(left("AA"), vec![(1, 0, 1)]);
    }
}
