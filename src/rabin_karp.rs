//! Rabin-Karp matching over byte slices, backed by the rolling hash in
//! [`crate::hash`].

use crate::hash;

/// Returns every offset where `needle` occurs in `haystack`, in ascending
/// order. An empty needle yields no matches.
///
/// Hash equality only nominates a candidate; each one is verified
/// byte-by-byte before being reported, so collisions never produce a false
/// match.
pub fn search(needle: &[u8], haystack: &[u8]) -> Vec<usize> {
    let m = needle.len();
    let n = haystack.len();
    let mut pos = vec![];
    if m == 0 || m > n {
        return pos;
    }

    let needle_hash = hash::hash_of(needle);
    let mut window_hash = hash::hash_of(&haystack[..m]);
    let pow = hash::base_power(m);

    for i in 0..=n - m {
        if needle_hash == window_hash && &haystack[i..i + m] == needle {
            pos.push(i);
        }
        if i + m < n {
            window_hash = hash::slide(window_hash, haystack[i], haystack[i + m], pow);
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_match() {
        assert_eq!(search(b"abc", b"xxabcxx"), [2]);
    }

    #[test]
    fn no_match() {
        assert_eq!(search(b"zzz", b"abcabcabc"), Vec::<usize>::new());
    }

    #[test]
    fn overlapping_matches_are_all_found() {
        assert_eq!(search(b"aa", b"aaaa"), [0, 1, 2]);
    }

    #[test]
    fn needle_equal_to_haystack() {
        assert_eq!(search(b"abc", b"abc"), [0]);
    }

    #[test]
    fn empty_needle_matches_nothing() {
        assert_eq!(search(b"", b"abc"), Vec::<usize>::new());
    }

    #[test]
    fn needle_longer_than_haystack() {
        assert_eq!(search(b"abcd", b"abc"), Vec::<usize>::new());
    }

    // These two windows hash identically under BASE/MOD but differ in
    // content, so only the verified occurrence may be reported.
    #[test]
    fn colliding_window_is_rejected_by_verification() {
        let needle = [0, 21, 90, 231, 135];
        let collider = [1, 0, 0, 0, 0];
        assert_eq!(hash::hash_of(&needle), hash::hash_of(&collider));

        let mut haystack = collider.to_vec();
        haystack.extend_from_slice(&needle);
        assert_eq!(search(&needle, &haystack), [5]);
    }
}
