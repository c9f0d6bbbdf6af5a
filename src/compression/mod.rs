//! LZ parsing
//!
//! - [`lz`] - greedy longest-previous-factor parse and its decoder
//! - [`lz77`] - sliding-window LZ77 triples

pub mod lz;
pub mod lz77;

pub use lz::{Factor, decode as decode_factors, factorise, refs};
pub use lz77::{Lz77, Triple};
