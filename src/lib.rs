use std::{
    io,
    ops::Range,
    path::{Path, PathBuf},
};

pub mod hash;
pub mod horspool;
pub mod rabin_karp;

/// Reads a file's full contents as raw bytes. The searchers never open
/// files themselves; callers load once and search in memory.
pub fn load_bytes(path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
}

/// Occurrences of one needle across a file tree.
pub struct Matches {
    pub files: Vec<FileMatch>,
}

pub struct FileMatch {
    pub path: PathBuf,
    needle_len: usize,
    offsets: Vec<usize>,
}

impl FileMatch {
    fn new(path: &Path, needle_len: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            needle_len,
            offsets: vec![],
        }
    }

    fn push(&mut self, offset: usize) {
        self.offsets.push(offset)
    }

    pub fn count(&self) -> usize {
        self.offsets.len()
    }

    /// Byte offsets of each occurrence, from the beginning of the file.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Byte span of each occurrence.
    pub fn spans(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.offsets
            .iter()
            .map(|&start| start..start + self.needle_len)
    }

    pub fn read_content(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

impl Matches {
    /// Walks every file under `root` (honoring ignore files) and records
    /// each occurrence of `needle`. Files without occurrences are omitted.
    pub fn collect(needle: &[u8], root: &Path) -> Result<Self, ignore::Error> {
        let finder = Finder::new(needle);
        let mut files = vec![];
        for result in ignore::Walk::new(root) {
            let dir = result?;

            let Some(file_type) = dir.file_type() else {
                continue
            };

            if file_type.is_file() {
                let path = dir.path();
                let mut file = FileMatch::new(path, needle.len());
                grep::searcher::Searcher::new().search_path(
                    &finder,
                    path,
                    Sink(|byte_offset, line: &[u8]| {
                        for idx in horspool::search(needle, line) {
                            file.push(byte_offset as usize + idx);
                        }
                    }),
                )?;
                if !file.offsets.is_empty() {
                    files.push(file);
                }
            }
        }
        Ok(Self { files })
    }

    pub fn total(&self) -> usize {
        self.files.iter().map(FileMatch::count).sum()
    }
}

/// A needle prepared for repeated first-occurrence lookups, sharing one
/// Horspool skip table across calls.
pub struct Finder {
    needle: Vec<u8>,
    skip: [usize; 256],
}

impl Finder {
    pub fn new(needle: &[u8]) -> Self {
        Self {
            needle: needle.to_vec(),
            skip: horspool::skip_table(needle),
        }
    }

    /// Offset of the first occurrence of the needle in `haystack`.
    pub fn find(&self, haystack: &[u8]) -> Option<usize> {
        horspool::find(&self.needle, haystack, &self.skip)
    }
}

struct Sink<F>(pub F)
where
    F: FnMut(u64, &[u8]);

impl<F> grep::searcher::Sink for Sink<F>
where
    F: FnMut(u64, &[u8]),
{
    type Error = io::Error;

    fn matched(
        &mut self,
        _searcher: &grep::searcher::Searcher,
        mat: &grep::searcher::SinkMatch<'_>,
    ) -> Result<bool, Self::Error> {
        (self.0)(mat.absolute_byte_offset(), mat.bytes());
        Ok(true)
    }
}

impl grep::matcher::Matcher for &Finder {
    type Captures = grep::matcher::NoCaptures;

    type Error = grep::matcher::NoError;

    fn find_at(
        &self,
        haystack: &[u8],
        at: usize,
    ) -> Result<Option<grep::matcher::Match>, Self::Error> {
        // The trait's provided `find` shadows the inherent one on `&&Finder`
        // receivers, so go through the free function.
        Ok(horspool::find(&self.needle, &haystack[at..], &self.skip)
            .map(|idx| grep::matcher::Match::new(at + idx, at + idx + self.needle.len())))
    }

    fn new_captures(&self) -> Result<Self::Captures, Self::Error> {
        Ok(grep::matcher::NoCaptures::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finder_reports_first_occurrence() {
        let finder = Finder::new(b"abra");
        assert_eq!(finder.find(b"abracadabra"), Some(0));
        assert_eq!(finder.find(b"cadabra"), Some(3));
        assert_eq!(finder.find(b"cadab"), None);
    }

    #[test]
    fn finder_with_empty_needle_finds_nothing() {
        let finder = Finder::new(b"");
        assert_eq!(finder.find(b"abc"), None);
    }

    #[test]
    fn matcher_impl_reports_match_bounds() {
        use grep::matcher::Matcher;

        let finder = Finder::new(b"abra");
        let m = (&finder).find_at(b"xxabra", 0).unwrap().unwrap();
        assert_eq!((m.start(), m.end()), (2, 6));
        let m = (&finder).find_at(b"abraabra", 4).unwrap().unwrap();
        assert_eq!((m.start(), m.end()), (4, 8));
        assert_eq!((&finder).find_at(b"abr", 0).unwrap(), None);
    }
}
