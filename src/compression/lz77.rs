//! Sliding-window LZ77
//!
//! Each step emits a `(distance, length, next)` triple: copy `length` bytes
//! starting `distance` bytes back, then append `next`. A triple with zero
//! distance is a bare literal. Among equally long matches in the window the
//! closest one wins.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One LZ77 instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// Distance back from the coding position (0 = no match)
    pub distance: usize,
    pub length: usize,
    /// Byte following the match
    pub next: u8,
}

impl Triple {
    pub const fn literal(next: u8) -> Self {
        Self {
            distance: 0,
            length: 0,
            next,
        }
    }
}

/// Windowed LZ77 encoder holding the instructions of the last encoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lz77 {
    instructions: Vec<Triple>,
}

impl Lz77 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an encoder from stored instructions
    pub fn from_instructions(instructions: Vec<Triple>) -> Self {
        Self { instructions }
    }

    pub fn instructions(&self) -> &[Triple] {
        &self.instructions
    }

    /// Encode `data` looking back at most `window` bytes
    ///
    /// Match length is capped so a `next` byte always exists. Fails with
    /// [`Error::InvalidInput`] on a zero window.
    pub fn encode(&mut self, data: &[u8], window: usize) -> Result<&[Triple]> {
        if window == 0 {
            return Err(Error::invalid_input("LZ77 window must be at least one byte"));
        }

        self.instructions.clear();
        let mut pos = 0;

        while pos < data.len() {
            let max_len = data.len() - pos - 1;
            let mut best: Option<(usize, usize)> = None;

            for source in pos.saturating_sub(window)..pos {
                if data[source] != data[pos] {
                    continue;
                }
                let len = (0..max_len)
                    .take_while(|&k| data[source + k] == data[pos + k])
                    .count();
                // `>=` keeps the closest of equally long matches
                if len >= best.map_or(0, |(_, best_len)| best_len) {
                    best = Some((source, len));
                }
            }

            let triple = match best {
                Some((source, length)) if length > 0 => Triple {
                    distance: pos - source,
                    length,
                    next: data[pos + length],
                },
                _ => Triple::literal(data[pos]),
            };
            pos += triple.length + 1;
            self.instructions.push(triple);
        }

        debug!(
            len = data.len(),
            window,
            instructions = self.instructions.len(),
            "LZ77 encoded"
        );
        Ok(&self.instructions)
    }

    /// Decode the current instructions
    pub fn decode(&self) -> Result<Vec<u8>> {
        decode(&self.instructions)
    }
}

/// Decode a sequence of triples
///
/// Fails with [`Error::InvalidInput`] if a triple reaches before the start of
/// the output.
pub fn decode(instructions: &[Triple]) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    for (i, triple) in instructions.iter().enumerate() {
        if triple.distance > 0 {
            let Some(start) = out.len().checked_sub(triple.distance) else {
                return Err(Error::InvalidInput(format!(
                    "instruction {} reaches {} bytes back with {} decoded",
                    i,
                    triple.distance,
                    out.len()
                )));
            };
            for k in 0..triple.length {
                let byte = out[start + k];
                out.push(byte);
            }
        }
        out.push(triple.next);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_and_decode() {
        let text = b"Hello,zHelios_yes";
        let mut encoder = Lz77::new();
        encoder.encode(text, 16).unwrap();
        assert_eq!(encoder.decode().unwrap(), text);
    }

    #[test]
    fn test_instructions() {
        let mut encoder = Lz77::new();
        let triples = encoder.encode(b"abab", 8).unwrap().to_vec();
        assert_eq!(
            triples,
            vec![
                Triple::literal(b'a'),
                Triple::literal(b'b'),
                Triple {
                    distance: 2,
                    length: 1,
                    next: b'b'
                }
            ]
        );
    }

    #[test]
    fn test_overlapping_run() {
        let text = b"aaaaaaaaab";
        let mut encoder = Lz77::new();
        let triples = encoder.encode(text, 4).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[1].distance, 1);
        assert_eq!(decode(triples).unwrap(), text);
    }

    #[test]
    fn test_window_limits_matches() {
        let mut encoder = Lz77::new();
        let triples = encoder.encode(b"abcdab", 2).unwrap();
        assert!(triples.iter().all(|t| t.distance == 0));
    }

    #[test]
    fn test_errors() {
        assert!(Lz77::new().encode(b"abc", 0).is_err());
        let bad = [Triple {
            distance: 3,
            length: 1,
            next: b'x',
        }];
        assert!(matches!(decode(&bad), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty() {
        let mut encoder = Lz77::new();
        assert!(encoder.encode(b"", 4).unwrap().is_empty());
        assert!(encoder.decode().unwrap().is_empty());
    }
}
