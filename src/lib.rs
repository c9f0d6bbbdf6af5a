//! # sarx - Suffix Arrays and Repeat eXtraction
//!
//! sarx builds suffix arrays with their LCP arrays over byte sequences,
//! searches them, grows them incrementally at either end and uses them to
//! find duplicated substrings and super-maximal repeats.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Forward and reverse suffix arrays, persistence, duplicate scanning
//! - [`search`] - Super-maximal repeat search over a growing reverse suffix array
//! - [`compression`] - LZ factorisation and windowed LZ77
//! - [`utils`] - Rabin-Karp rolling hash, CLI spinner
//! - [`output`] - Result formatting for the CLI
//! - [`config`] - Combined JSON configuration
//!
//! ## Quick Start
//!
//! ```
//! use sarx::index::{ReverseSuffixArray, SuffixArray};
//!
//! let sa = SuffixArray::new("banana").unwrap();
//! assert_eq!(sa.positions(), vec![5, 3, 1, 0, 4, 2]);
//! assert_eq!(sa.lcp_array(), &[-1, 1, 3, 0, 0, 2]);
//!
//! let mut hits = sa.search_all(b"ana");
//! hits.sort_unstable();
//! assert_eq!(hits, vec![1, 3]);
//!
//! // Reverse arrays grow on the left without renumbering existing suffixes
//! let mut rsa = ReverseSuffixArray::new("CAB").unwrap();
//! rsa.insert_left("AB");
//! assert_eq!(rsa, ReverseSuffixArray::new("ABCAB").unwrap());
//! ```
//!
//! ## Repeats
//!
//! ```
//! use sarx::search::{super_maximal_repeats_left, RepeatOptions};
//!
//! let repeats = super_maximal_repeats_left(b"ABCAB", None, RepeatOptions::default()).unwrap();
//! assert_eq!(repeats[0].as_tuple(), (2, 0, 3));
//! ```

pub mod compression;
pub mod config;
pub mod error;
pub mod index;
pub mod output;
pub mod search;
pub mod utils;

pub use config::SarxConfig;
pub use error::{Error, Result};
