//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`rolling_hash`] - Rabin-Karp fingerprints over fixed-size windows
//! - [`progress`] - CLI spinner (no-op without the `progress` feature)
//!
//! ```
//! use sarx::utils::{RollingHash, RollingHashConfig};
//!
//! let config = RollingHashConfig { block_size: 4, ..Default::default() };
//! let mut hasher = RollingHash::new(config).unwrap();
//! let first = hasher.hash_block_with_history(b"abcd").unwrap();
//! let slid = hasher.roll(b'e').unwrap();
//! assert_eq!(slid, hasher.hash_block(b"bcde").unwrap());
//! # let _ = first;
//! ```

pub mod progress;
pub mod rolling_hash;

pub use progress::Spinner;
pub use rolling_hash::{RollingHash, RollingHashConfig};
