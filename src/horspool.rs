//! Boyer-Moore-Horspool matching over byte slices.

/// Per-byte skip distances for a needle. Bytes absent from the needle skip a
/// full needle length; bytes present skip by their distance from the end,
/// with the rightmost occurrence winning.
pub fn skip_table(needle: &[u8]) -> [usize; 256] {
    let m = needle.len();
    let mut skip = [m; 256];
    for (i, &b) in needle.iter().enumerate() {
        skip[b as usize] = (m - 1) - i;
    }
    skip
}

/// Offset of the first occurrence of `needle` in `haystack`, scanned with a
/// prebuilt skip table. An empty needle never occurs.
///
/// A candidate whose last byte lines up (skip of zero) is compared in full
/// and, when it fails, the window advances by one rather than consulting
/// the table again.
pub fn find(needle: &[u8], haystack: &[u8], skip: &[usize; 256]) -> Option<usize> {
    let m = needle.len();
    let n = haystack.len();
    if m == 0 || m > n {
        return None;
    }

    let mut i = 0;
    while i + m <= n {
        let s = skip[haystack[i + m - 1] as usize];
        if s != 0 {
            i += s;
            continue;
        }
        if &haystack[i..i + m] == needle {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Returns every offset where `needle` occurs in `haystack`, in ascending
/// order. The scan resumes one byte past each match, so overlapping
/// occurrences are all reported.
pub fn search(needle: &[u8], haystack: &[u8]) -> Vec<usize> {
    let skip = skip_table(needle);
    let mut pos = vec![];
    let mut start = 0;
    while let Some(idx) = find(needle, &haystack[start..], &skip) {
        pos.push(start + idx);
        start += idx + 1;
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
        assert_eq!(search(b"aba", b"ababa"), [0, 2]);
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

    #[test]
    fn rightmost_occurrence_wins_in_table() {
        let skip = skip_table(b"abab");
        assert_eq!(skip[b'a' as usize], 1);
        assert_eq!(skip[b'b' as usize], 0);
        assert_eq!(skip[b'z' as usize], 4);
    }

    #[test]
    fn find_reports_first_occurrence_only() {
        let skip = skip_table(b"aa");
        assert_eq!(find(b"aa", b"xaaaa", &skip), Some(1));
        assert_eq!(find(b"aa", b"xyz", &skip), None);
        assert_eq!(find(b"", b"xyz", &skip_table(b"")), None);
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let haystack = b"abracadabra abracadabra";
        assert_eq!(search(b"abra", haystack), search(b"abra", haystack));
    }
}
