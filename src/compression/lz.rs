//! Greedy LZ factorisation
//!
//! Parses a sequence left to right into factors. At each position the longest
//! earlier occurrence of the upcoming bytes is taken (the leftmost one when
//! several are equally long); the copy may overlap the bytes it produces. A
//! byte that never occurred before becomes a literal.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One factor of an LZ parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Factor {
    /// A byte with no earlier occurrence
    Literal(u8),
    /// Copy `len` bytes starting at `source`
    Reference { source: usize, len: usize },
}

/// Longest match for `data[pos..]` starting before `pos`, leftmost on ties
fn longest_previous(data: &[u8], pos: usize) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;

    for source in 0..pos {
        let len = data[pos..]
            .iter()
            .enumerate()
            .take_while(|&(k, &byte)| data[source + k] == byte)
            .count();

        if len > best.map_or(0, |(_, best_len)| best_len) {
            best = Some((source, len));
        }
    }

    best
}

/// Factorise `data`
///
/// Fails with [`Error::InvalidInput`] on an empty sequence.
pub fn factorise(data: &[u8]) -> Result<Vec<Factor>> {
    if data.is_empty() {
        return Err(Error::invalid_input("cannot factorise an empty sequence"));
    }

    let mut factors = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        match longest_previous(data, pos) {
            Some((source, len)) => {
                factors.push(Factor::Reference { source, len });
                pos += len;
            }
            None => {
                factors.push(Factor::Literal(data[pos]));
                pos += 1;
            }
        }
    }

    debug!(len = data.len(), factors = factors.len(), "factorised");
    Ok(factors)
}

/// `(source, len)` of every reference factor of `data`
pub fn refs(data: &[u8]) -> Result<Vec<(usize, usize)>> {
    Ok(factorise(data)?
        .into_iter()
        .filter_map(|factor| match factor {
            Factor::Reference { source, len } => Some((source, len)),
            Factor::Literal(_) => None,
        })
        .collect())
}

/// Rebuild the sequence described by `factors`
///
/// Fails with [`Error::InvalidInput`] if a reference starts at or past the
/// bytes decoded so far, or has zero length.
pub fn decode(factors: &[Factor]) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    for (i, factor) in factors.iter().enumerate() {
        match *factor {
            Factor::Literal(byte) => out.push(byte),
            Factor::Reference { source, len } => {
                if source >= out.len() || len == 0 {
                    return Err(Error::InvalidInput(format!(
                        "factor {} references {}..{} with {} bytes decoded",
                        i,
                        source,
                        source + len,
                        out.len()
                    )));
                }
                // Byte by byte: the copy may overlap its own output
                for k in 0..len {
                    let byte = out[source + k];
                    out.push(byte);
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Factor::{Literal, Reference};

    fn r(source: usize, len: usize) -> Factor {
        Reference { source, len }
    }

    #[test]
    fn test_factorise() {
        assert_eq!(
            factorise(b"ABCAB").unwrap(),
            vec![Literal(b'A'), Literal(b'B'), Literal(b'C'), r(0, 2)]
        );
        assert_eq!(
            factorise(b"ABCABCABC").unwrap(),
            vec![Literal(b'A'), Literal(b'B'), Literal(b'C'), r(0, 6)]
        );
        assert_eq!(
            factorise(b"DCBABCCDCBA").unwrap(),
            vec![
                Literal(b'D'),
                Literal(b'C'),
                Literal(b'B'),
                Literal(b'A'),
                r(2, 1),
                r(1, 1),
                r(1, 1),
                r(0, 4)
            ]
        );
        assert_eq!(
            factorise(b"doddoddoddod").unwrap(),
            vec![Literal(b'd'), Literal(b'o'), r(0, 1), r(0, 9)]
        );
    }

    #[test]
    fn test_factorise_non_matching_ends() {
        assert_eq!(
            factorise(b"AZZBZZC").unwrap(),
            vec![
                Literal(b'A'),
                Literal(b'Z'),
                r(1, 1),
                Literal(b'B'),
                r(1, 2),
                Literal(b'C')
            ]
        );
    }

    #[test]
    fn test_refs() {
        assert_eq!(refs(b"ABCAB").unwrap(), vec![(0, 2)]);
        assert_eq!(refs(b"ABCAB2B2").unwrap(), vec![(0, 2), (4, 2)]);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(factorise(b""), Err(Error::InvalidInput(_))));
        assert!(refs(b"").is_err());
    }

    #[test]
    fn test_decode_round_trip() {
        for text in [&b"doddoddoddod"[..], b"Hello,zHelios_yes", b"aaaaaaa", b"x"] {
            assert_eq!(decode(&factorise(text).unwrap()).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_rejects_forward_reference() {
        assert!(decode(&[Literal(b'a'), r(1, 2)]).is_err());
        assert!(decode(&[r(0, 1)]).is_err());
    }
}
