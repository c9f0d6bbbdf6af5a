//! Property tests checking the engines against brute force.

use proptest::prelude::*;
use sarx::compression::{Lz77, decode_factors, factorise};
use sarx::index::suffix_array::{LCP_SENTINEL, Layout, SuffixIndex};
use sarx::index::{ReverseSuffixArray, SuffixArray};
use sarx::search::{RepeatOptions, super_maximal_repeats_left};
use sarx::utils::{RollingHash, RollingHashConfig};
use std::collections::BTreeSet;

/// Texts over a small alphabet so repeats are common
fn text(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(b'a'..=b'c', 1..max_len)
}

fn brute_positions(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    (0..text.len())
        .filter(|&i| text[i..].starts_with(pattern))
        .collect()
}

fn check_sorted_with_lcp<L: Layout>(index: &SuffixIndex<L>) -> Result<(), TestCaseError> {
    let text = index.text();
    let mut positions = index.positions();

    for row in 1..index.len() {
        let prev = &text[positions[row - 1]..];
        let cur = &text[positions[row]..];
        prop_assert!(prev < cur, "rows {} and {} out of order", row - 1, row);

        let lcp = prev.iter().zip(cur).take_while(|(a, b)| a == b).count();
        prop_assert_eq!(index.lcp_array()[row], lcp as isize);
    }
    prop_assert_eq!(index.lcp_array()[0], LCP_SENTINEL);

    positions.sort_unstable();
    prop_assert_eq!(positions, (0..text.len()).collect::<Vec<_>>());
    Ok(())
}

proptest! {
    #[test]
    fn prop_sorted_permutation(data in text(80)) {
        check_sorted_with_lcp(&SuffixArray::new(&data).unwrap())?;
        check_sorted_with_lcp(&ReverseSuffixArray::new(&data).unwrap())?;
    }

    #[test]
    fn prop_search_matches_brute_force(
        data in text(80),
        pattern in prop::collection::vec(b'a'..=b'c', 1..5),
    ) {
        let sa = SuffixArray::new(&data).unwrap();
        let expected = brute_positions(&data, &pattern);

        prop_assert_eq!(sa.search(&pattern), expected.first().copied());

        let mut all = sa.search_all(&pattern);
        all.sort_unstable();
        prop_assert_eq!(&all, &expected);
        prop_assert_eq!(sa.count_matches(&pattern), expected.len());
    }

    #[test]
    fn prop_insert_right_equals_rebuild(left in text(40), right in text(40)) {
        let combined = [left.as_slice(), right.as_slice()].concat();

        let mut sa = SuffixArray::new(&left).unwrap();
        sa.insert_right(&right);
        prop_assert_eq!(sa, SuffixArray::new(&combined).unwrap());

        let mut rsa = ReverseSuffixArray::new(&left).unwrap();
        rsa.insert_right(&right);
        prop_assert_eq!(rsa, ReverseSuffixArray::new(&combined).unwrap());
    }

    #[test]
    fn prop_insert_left_equals_rebuild(left in text(40), right in text(40)) {
        let combined = [left.as_slice(), right.as_slice()].concat();

        let mut rsa = ReverseSuffixArray::new(&right).unwrap();
        let keys_before = rsa.suffix_array().to_vec();
        rsa.insert_left(&left);

        // existing suffixes keep their keys
        for key in keys_before {
            prop_assert!(rsa.suffix_array().contains(&key));
        }
        prop_assert_eq!(rsa, ReverseSuffixArray::new(&combined).unwrap());
    }

    #[test]
    fn prop_duplicates_are_real(data in text(60)) {
        let store = SuffixArray::new(&data).unwrap().find_all_duplicates(1);
        for occ in store.duplicates() {
            let len = occ.substring.len();
            prop_assert_eq!(&data[occ.position..occ.position + len], occ.substring.as_slice());
            prop_assert!(brute_positions(&data, &occ.substring).len() >= 2);
        }
    }

    #[test]
    fn prop_duplicates_cover_adjacent_rows(data in text(60)) {
        let sa = SuffixArray::new(&data).unwrap();
        let positions = sa.positions();

        for min_length in 0..4 {
            let mut expected = BTreeSet::new();
            for pair in positions.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let common = data[a..]
                    .iter()
                    .zip(&data[b..])
                    .take_while(|(x, y)| x == y)
                    .count();
                for len in min_length.max(1)..=common.min(a.abs_diff(b)) {
                    expected.insert((data[a..a + len].to_vec(), a));
                    expected.insert((data[b..b + len].to_vec(), b));
                }
            }

            let store = sa.find_all_duplicates(min_length);
            let found: BTreeSet<(Vec<u8>, usize)> = store
                .duplicates()
                .map(|occ| (occ.substring.clone(), occ.position))
                .collect();
            prop_assert_eq!(found, expected);
        }
    }

    #[test]
    fn prop_repeats_are_real(data in text(60)) {
        let repeats = super_maximal_repeats_left(&data, None, RepeatOptions::default()).unwrap();
        for r in repeats {
            prop_assert!(r.length > 0);
            prop_assert!(r.first < r.second);
            prop_assert_eq!(
                &data[r.first..r.first + r.length],
                &data[r.second..r.second + r.length]
            );
        }
    }

    #[test]
    fn prop_lz_round_trip(
        data in prop::collection::vec(any::<u8>(), 1..120),
        window in 1usize..40,
    ) {
        prop_assert_eq!(decode_factors(&factorise(&data).unwrap()).unwrap(), data.clone());

        let mut encoder = Lz77::new();
        encoder.encode(&data, window).unwrap();
        prop_assert_eq!(encoder.decode().unwrap(), data);
    }

    #[test]
    fn prop_rolling_matches_block(
        data in prop::collection::vec(any::<u8>(), 0..100),
        block_size in 1usize..12,
    ) {
        let config = RollingHashConfig { block_size, ..Default::default() };
        let plain = RollingHash::new(config).unwrap();
        let mut rolling = RollingHash::new(config).unwrap();

        let expected: Vec<u64> = data
            .windows(block_size)
            .map(|w| plain.hash_block(w).unwrap())
            .collect();
        prop_assert_eq!(rolling.windows(&data).unwrap(), expected);
    }
}
