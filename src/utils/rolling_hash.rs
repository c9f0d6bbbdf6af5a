//! Rabin-Karp rolling hash
//!
//! A block of `k` bytes hashes to `sum(byte[j] * base^(k-1-j)) mod range`.
//! Once a window has been primed with [`RollingHash::hash_block_with_history`],
//! each new byte slides the window by one in constant time.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Parameters of the fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingHashConfig {
    /// Window length in bytes (default: 16)
    pub block_size: usize,
    /// Size of the hash space, ideally prime (default: 16381)
    pub hash_range: u64,
    /// Polynomial base (default: 10)
    pub base: u64,
}

impl Default for RollingHashConfig {
    fn default() -> Self {
        Self {
            block_size: 16,
            hash_range: 16381,
            base: 10,
        }
    }
}

/// Fingerprint generator with an optional sliding window
#[derive(Debug, Clone)]
pub struct RollingHash {
    config: RollingHashConfig,
    /// `base^(block_size - 1) mod range`
    leading_power: u128,
    prev_hash: u128,
    history: Option<VecDeque<u8>>,
}

impl RollingHash {
    pub fn new(config: RollingHashConfig) -> Result<Self> {
        if config.block_size == 0 {
            return Err(Error::invalid_input("block size must be at least one byte"));
        }
        if config.hash_range == 0 {
            return Err(Error::invalid_input("hash range must be non-zero"));
        }

        let range = u128::from(config.hash_range);
        let base = u128::from(config.base) % range;
        let leading_power = (1..config.block_size).fold(1 % range, |acc, _| acc * base % range);

        Ok(Self {
            config,
            leading_power,
            prev_hash: 0,
            history: None,
        })
    }

    pub fn config(&self) -> &RollingHashConfig {
        &self.config
    }

    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    fn range(&self) -> u128 {
        u128::from(self.config.hash_range)
    }

    fn check_block(&self, block: &[u8]) -> Result<()> {
        if block.len() != self.config.block_size {
            return Err(Error::SizeMismatch {
                expected: self.config.block_size,
                actual: block.len(),
            });
        }
        Ok(())
    }

    fn raw_hash(&self, block: &[u8]) -> u128 {
        let range = self.range();
        let base = u128::from(self.config.base) % range;
        block
            .iter()
            .fold(0, |h, &byte| (h * base + u128::from(byte)) % range)
    }

    /// Hash one block without touching the window
    pub fn hash_block(&self, block: &[u8]) -> Result<u64> {
        self.check_block(block)?;
        Ok(self.raw_hash(block) as u64)
    }

    /// Hash one block and make it the current window
    pub fn hash_block_with_history(&mut self, block: &[u8]) -> Result<u64> {
        self.check_block(block)?;
        self.prev_hash = self.raw_hash(block);
        self.history = Some(block.iter().copied().collect());
        Ok(self.prev_hash as u64)
    }

    /// Slide the window by the single byte in `next`
    ///
    /// Fails with [`Error::Precondition`] before a window is primed and with
    /// [`Error::SizeMismatch`] unless `next` holds exactly one byte.
    pub fn incremental(&mut self, next: &[u8]) -> Result<u64> {
        if self.history.is_none() {
            return Err(unprimed());
        }
        match next {
            [byte] => self.roll(*byte),
            _ => Err(Error::SizeMismatch {
                expected: 1,
                actual: next.len(),
            }),
        }
    }

    /// Slide the window by one byte
    pub fn roll(&mut self, next: u8) -> Result<u64> {
        let range = self.range();
        let base = u128::from(self.config.base) % range;

        let history = self.history.as_mut().ok_or_else(unprimed)?;
        let Some(outgoing) = history.pop_front() else {
            return Err(Error::Precondition("rolling window is empty".into()));
        };
        history.push_back(next);

        let removed = u128::from(outgoing) * self.leading_power % range;
        let h = (self.prev_hash + range - removed) % range;
        self.prev_hash = (h * base + u128::from(next)) % range;
        Ok(self.prev_hash as u64)
    }

    /// Hash of every `block_size` window of `data`, in order
    pub fn windows(&mut self, data: &[u8]) -> Result<Vec<u64>> {
        let k = self.config.block_size;
        if data.len() < k {
            return Ok(Vec::new());
        }

        let mut hashes = Vec::with_capacity(data.len() - k + 1);
        hashes.push(self.hash_block_with_history(&data[..k])?);
        for &byte in &data[k..] {
            hashes.push(self.roll(byte)?);
        }
        Ok(hashes)
    }
}

fn unprimed() -> Error {
    Error::Precondition("no window primed; call hash_block_with_history first".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> RollingHash {
        RollingHash::new(RollingHashConfig::default()).unwrap()
    }

    #[test]
    fn test_init() {
        let config = RollingHashConfig::default();
        assert_eq!(config.block_size, 16);
        assert_eq!(config.hash_range, 16381);
        assert_eq!(config.base, 10);
        assert_eq!(generator().block_size(), 16);

        let zero = RollingHashConfig {
            block_size: 0,
            ..Default::default()
        };
        assert!(matches!(RollingHash::new(zero), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_block_sizes() {
        let mut hgen = generator();
        assert!(matches!(
            hgen.hash_block(b"123"),
            Err(Error::SizeMismatch {
                expected: 16,
                actual: 3
            })
        ));
        assert!(hgen.hash_block(b"").is_err());
        assert!(hgen.hash_block_with_history(b"1234").is_err());
        assert!(hgen.hash_block_with_history(b"").is_err());
    }

    #[test]
    fn test_incremental_without_history() {
        let mut hgen = generator();
        hgen.hash_block(b"1234567890123456").unwrap();
        assert!(matches!(hgen.incremental(b"7"), Err(Error::Precondition(_))));
    }

    #[test]
    fn test_unprimed_incremental_fails_before_size_check() {
        let mut hgen = generator();
        assert!(matches!(hgen.incremental(b"12"), Err(Error::Precondition(_))));
        assert!(matches!(hgen.incremental(b""), Err(Error::Precondition(_))));
    }

    #[test]
    fn test_incremental_rejects_large_buffer() {
        let mut hgen = generator();
        hgen.hash_block_with_history(b"1234567890123456").unwrap();
        assert!(matches!(
            hgen.incremental(b"12"),
            Err(Error::SizeMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_reproducible() {
        let mut a = generator();
        let mut b = generator();
        let block = b"1234567890123456";
        assert_eq!(a.hash_block(block).unwrap(), b.hash_block(block).unwrap());
        assert_eq!(
            a.hash_block_with_history(block).unwrap(),
            b.hash_block_with_history(block).unwrap()
        );
    }

    #[test]
    fn test_block_matches_history() {
        let mut hgen = generator();
        let block = b"0987654321654321";
        assert_eq!(
            hgen.hash_block(block).unwrap(),
            hgen.hash_block_with_history(block).unwrap()
        );
    }

    #[test]
    fn test_incremental_matches_block() {
        let plain = generator();
        let mut rolling = generator();

        rolling.hash_block_with_history(b"1234567890123456").unwrap();
        assert_eq!(
            rolling.incremental(b"7").unwrap(),
            plain.hash_block(b"2345678901234567").unwrap()
        );
        assert_eq!(
            rolling.roll(b'8').unwrap(),
            plain.hash_block(b"3456789012345678").unwrap()
        );
    }

    #[test]
    fn test_windows() {
        let config = RollingHashConfig {
            block_size: 3,
            hash_range: 101,
            base: 256,
        };
        let plain = RollingHash::new(config).unwrap();
        let mut rolling = RollingHash::new(config).unwrap();

        let data = b"abracadabra";
        let expected: Vec<u64> = data
            .windows(3)
            .map(|w| plain.hash_block(w).unwrap())
            .collect();
        assert_eq!(rolling.windows(data).unwrap(), expected);
        assert!(rolling.windows(b"ab").unwrap().is_empty());
    }
}
