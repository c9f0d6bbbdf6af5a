//! Types for suffix array indexing
//!
//! A suffix array stores one key per suffix of its text. How a key maps back
//! to a text offset depends on the [`Layout`]: forward arrays store start
//! offsets, reverse arrays store the distance of the start from the right end
//! so that text can be prepended without touching existing keys.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Value of `LCP[0]`, which has no preceding row to compare against
pub const LCP_SENTINEL: isize = -1;

/// Magic number for suffix array files
pub const SA_MAGIC: u32 = 0x41585253; // "SRXA" in little-endian

/// Current version of the suffix array format
pub const SA_VERSION: u32 = 1;

/// Header flag set when the keys are distances from the end
pub const FLAG_REVERSE: u32 = 0x1;

/// Which end of the text keys are counted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

/// Mapping between stored keys and start offsets in the text
pub trait Layout: Send + Sync + 'static {
    const DIRECTION: Direction;

    /// Start offset of the suffix stored under `key` in a text of `len` bytes
    fn start(key: usize, len: usize) -> usize;

    /// Key under which the suffix starting at `start` is stored
    fn key(start: usize, len: usize) -> usize;
}

/// Keys are start offsets counted from the left
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Forward;

/// Keys are distances from the last byte of the text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse;

impl Layout for Forward {
    const DIRECTION: Direction = Direction::Forward;

    #[inline]
    fn start(key: usize, _len: usize) -> usize {
        key
    }

    #[inline]
    fn key(start: usize, _len: usize) -> usize {
        start
    }
}

impl Layout for Reverse {
    const DIRECTION: Direction = Direction::Reverse;

    #[inline]
    fn start(key: usize, len: usize) -> usize {
        len - 1 - key
    }

    #[inline]
    fn key(start: usize, len: usize) -> usize {
        len - 1 - start
    }
}

/// Configuration for suffix array building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuffixArrayConfig {
    /// Texts longer than this are sorted with rayon (default: 100_000)
    pub parallel_sort_threshold: usize,
    /// Fold ASCII letters to lowercase in the text and in patterns (default: false)
    pub case_insensitive: bool,
}

impl Default for SuffixArrayConfig {
    fn default() -> Self {
        Self {
            parallel_sort_threshold: 100_000,
            case_insensitive: false,
        }
    }
}

impl SuffixArrayConfig {
    /// Bytes as they will be stored in the text
    pub(crate) fn normalize(&self, bytes: &[u8]) -> Vec<u8> {
        if self.case_insensitive {
            bytes.to_ascii_lowercase()
        } else {
            bytes.to_vec()
        }
    }

    /// Pattern as it must be compared against the text
    pub(crate) fn fold<'a>(&self, pattern: &'a [u8]) -> Cow<'a, [u8]> {
        if self.case_insensitive && pattern.iter().any(u8::is_ascii_uppercase) {
            Cow::Owned(pattern.to_ascii_lowercase())
        } else {
            Cow::Borrowed(pattern)
        }
    }
}

/// Suffix array metadata stored in meta.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixArrayMeta {
    /// Which end keys are counted from
    pub direction: Direction,
    /// Size of the indexed text in bytes
    pub text_len: u64,
    /// Number of suffixes (equals text_len)
    pub suffix_count: u64,
    /// Configuration the array was built with
    pub config: SuffixArrayConfig,
}

/// Header shared by sa.bin and lcp.bin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayHeader {
    /// Magic number (SA_MAGIC)
    pub magic: u32,
    /// Version number
    pub version: u32,
    /// Number of entries following the header
    pub count: u64,
    /// FLAG_REVERSE or 0
    pub flags: u32,
}

impl ArrayHeader {
    /// Size of header in bytes
    pub const SIZE: usize = 4 + 4 + 8 + 4; // 20 bytes

    pub fn new(count: u64, direction: Direction) -> Self {
        Self {
            magic: SA_MAGIC,
            version: SA_VERSION,
            count,
            flags: match direction {
                Direction::Forward => 0,
                Direction::Reverse => FLAG_REVERSE,
            },
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.magic.to_le_bytes());
        buf[4..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8..16].copy_from_slice(&self.count.to_le_bytes());
        buf[16..20].copy_from_slice(&self.flags.to_le_bytes());
        buf
    }

    /// Parse a header, returning `None` if `data` is too short
    pub fn parse(data: &[u8]) -> Option<Self> {
        let header = data.get(..Self::SIZE)?;
        let mut word = [0u8; 4];
        let mut wide = [0u8; 8];

        word.copy_from_slice(&header[0..4]);
        let magic = u32::from_le_bytes(word);
        word.copy_from_slice(&header[4..8]);
        let version = u32::from_le_bytes(word);
        wide.copy_from_slice(&header[8..16]);
        let count = u64::from_le_bytes(wide);
        word.copy_from_slice(&header[16..20]);
        let flags = u32::from_le_bytes(word);

        Some(Self {
            magic,
            version,
            count,
            flags,
        })
    }

    pub fn direction(&self) -> Direction {
        if self.flags & FLAG_REVERSE != 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }
}
