//! Suffix comparison primitives
//!
//! All comparisons read the live text; suffixes are never materialised.
//! Ordering is byte-ordinal and a suffix that is a strict prefix of another
//! sorts first.

use std::cmp::Ordering;

/// Compare the suffixes of `text` starting at `a` and `b`
///
/// Only returns `Equal` when `a == b`.
#[inline]
pub fn compare_suffixes(text: &[u8], a: usize, b: usize) -> Ordering {
    text[a..].cmp(&text[b..])
}

/// Compare `suffix` truncated to the length of `target` against `target`
///
/// `Equal` means `suffix` starts with `target`. A suffix shorter than
/// `target` that matches as far as it goes compares `Less`.
#[inline]
pub fn compare_prefix(suffix: &[u8], target: &[u8]) -> Ordering {
    let cmp_len = target.len().min(suffix.len());
    suffix[..cmp_len].cmp(target)
}

/// Length of the longest common prefix of `a` and `b`
#[inline]
pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
