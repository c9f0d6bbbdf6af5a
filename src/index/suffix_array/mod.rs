//! Suffix array indexing module
//!
//! This module provides O(m log n) exact substring search using suffix arrays
//! together with the LCP array of the sorted suffixes.
//!
//! ## Architecture
//!
//! - `compare`: Suffix comparison primitives
//! - `builder`: Constructs suffix and LCP arrays from a text
//! - `search`: Binary search for one or all occurrences
//! - `insert`: Incremental append / prepend
//! - `writer`: Persists suffix arrays to disk
//! - `reader`: Memory-mapped reading, searching and loading
//! - `types`: Core type definitions
//!
//! ## File Format
//!
//! Per index directory, four files are created:
//! - `text.bin`: The indexed text
//! - `sa.bin`: The sorted suffix array (keys, see [`Layout`])
//! - `lcp.bin`: The LCP array
//! - `meta.json`: Direction, sizes and build configuration

pub mod builder;
pub mod compare;
pub mod insert;
pub mod reader;
pub mod search;
pub mod types;
pub mod writer;

// Re-exports for convenience
pub use builder::{ReverseSuffixArray, SuffixArray, SuffixIndex};
pub use reader::{SuffixArrayReader, SuffixArrayStats};
pub use types::{
    Direction, Forward, LCP_SENTINEL, Layout, Reverse, SuffixArrayConfig, SuffixArrayMeta,
};
pub use writer::SuffixArrayWriter;
