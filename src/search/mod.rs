//! Searches built on top of the suffix array engines

pub mod repeats;

pub use repeats::{
    Coordinates, Repeat, RepeatOptions, super_maximal_repeats_left, super_maximal_repeats_right,
};
