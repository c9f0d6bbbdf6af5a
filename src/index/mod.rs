//! Suffix array engines and what is built from them
//!
//! - [`suffix_array`] - forward and reverse suffix arrays with LCP, search,
//!   incremental insertion and on-disk persistence
//! - [`duplicates`] - LCP walk enumerating repeated substrings
//! - [`store`] - deduplicating set of the occurrences found

pub mod duplicates;
pub mod store;
pub mod suffix_array;

pub use duplicates::{DuplicateScanner, ScanConfig};
pub use store::{DuplicateStore, Occurrence};
pub use suffix_array::{ReverseSuffixArray, SuffixArray, SuffixArrayReader, SuffixArrayWriter};
