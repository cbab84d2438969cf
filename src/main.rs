use std::{
    collections::{hash_map::Entry, HashMap},
    error::Error,
    io::{self, Write},
    ops::Range,
    path::{Path, PathBuf},
    time::Instant,
};

use clap::Parser;
use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    files::SimpleFiles,
    term::{
        self,
        termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor},
    },
};
use patfind::{horspool, rabin_karp, Matches};

#[derive(Parser)]
#[command(disable_help_subcommand = true)]
enum Args {
    /// Report every byte offset where the pattern occurs in a file.
    Find(FindArgs),
    /// Display every occurrence of the pattern in its source context.
    Show { path: PathBuf, pattern: String },
    /// Run both algorithms over the same file and compare their runtimes.
    Bench { path: PathBuf, pattern: String },
    /// Count occurrences of the pattern in every file under a directory.
    Walk {
        pattern: String,
        /// Directory to search.
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

#[derive(clap::Args)]
struct FindArgs {
    path: PathBuf,
    pattern: String,
    /// Algorithm to search with.
    #[arg(long, value_enum, default_value_t = Algorithm::Horspool)]
    algorithm: Algorithm,
}

#[derive(Copy, Clone, clap::ValueEnum)]
enum Algorithm {
    #[value(name = "horspool", aliases(["bmh", "boyer-moore-horspool"]))]
    Horspool,
    #[value(name = "rabin-karp", aliases(["rk"]))]
    RabinKarp,
}

impl Algorithm {
    fn search(self, needle: &[u8], haystack: &[u8]) -> Vec<usize> {
        match self {
            Algorithm::Horspool => horspool::search(needle, haystack),
            Algorithm::RabinKarp => rabin_karp::search(needle, haystack),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Algorithm::Horspool => "Boyer-Moore-Horspool",
            Algorithm::RabinKarp => "Rabin-Karp",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

type FileId = usize;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args {
        Args::Find(args) => find(args)?,
        Args::Show { path, pattern } => show(&path, &pattern)?,
        Args::Bench { path, pattern } => bench(&path, &pattern)?,
        Args::Walk { pattern, root } => walk(&pattern, &root)?,
    }

    Ok(())
}

fn find(args: FindArgs) -> Result<(), Box<dyn Error>> {
    let data = patfind::load_bytes(&args.path)?;
    check_fits(args.pattern.as_bytes(), &data)?;

    let pos = args.algorithm.search(args.pattern.as_bytes(), &data);
    let stdout = &mut StandardStream::stdout(ColorChoice::Auto);
    for offset in &pos {
        writeln!(stdout, "{offset}")?;
    }
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(
        stdout,
        "found {} {} of `{}` ({})",
        pos.len(),
        pluralize("instance", pos.len()),
        args.pattern,
        args.algorithm
    )?;
    stdout.reset()?;
    Ok(())
}

fn show(path: &Path, pattern: &str) -> Result<(), Box<dyn Error>> {
    let data = patfind::load_bytes(path)?;
    check_fits(pattern.as_bytes(), &data)?;

    let pos = horspool::search(pattern.as_bytes(), &data);
    let mut db = FilesDB::new();
    let mut emitter = Emitter::new(false);
    let labels = pos
        .iter()
        .map(|&start| db.label(path, start..start + pattern.len()))
        .collect::<io::Result<Vec<_>>>()?;
    let diagnostic = Diagnostic::note()
        .with_message(format!(
            "{} {} of `{pattern}`",
            pos.len(),
            pluralize("occurrence", pos.len())
        ))
        .with_labels(labels);
    emitter.emit(&db, diagnostic)?;
    Ok(())
}

fn bench(path: &Path, pattern: &str) -> Result<(), Box<dyn Error>> {
    let data = patfind::load_bytes(path)?;
    check_fits(pattern.as_bytes(), &data)?;

    let start = Instant::now();
    let bmh = horspool::search(pattern.as_bytes(), &data);
    println!(
        "Boyer-Moore-Horspool runtime: {} microseconds",
        start.elapsed().as_micros()
    );

    let start = Instant::now();
    let rk = rabin_karp::search(pattern.as_bytes(), &data);
    println!(
        "Rabin-Karp runtime: {} microseconds",
        start.elapsed().as_micros()
    );

    if bmh != rk {
        return Err("algorithms disagree on match positions".into());
    }

    let stdout = &mut StandardStream::stdout(ColorChoice::Auto);
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(
        stdout,
        "found {} {} of `{pattern}` in {}",
        bmh.len(),
        pluralize("instance", bmh.len()),
        path.display()
    )?;
    stdout.reset()?;
    Ok(())
}

fn walk(pattern: &str, root: &Path) -> Result<(), Box<dyn Error>> {
    let matches = Matches::collect(pattern.as_bytes(), root)?;

    let stdout = &mut StandardStream::stdout(ColorChoice::Auto);
    for file in &matches.files {
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        write!(stdout, "{}", file.path.display())?;
        stdout.reset()?;
        writeln!(stdout, ": {}", file.count())?;
    }
    writeln!(
        stdout,
        "found {} {} of `{pattern}`",
        matches.total(),
        pluralize("instance", matches.total())
    )?;
    Ok(())
}

/// The searchers are only invoked on patterns that fit in the haystack;
/// longer patterns are reported to the user instead.
fn check_fits(needle: &[u8], haystack: &[u8]) -> Result<(), Box<dyn Error>> {
    if needle.len() > haystack.len() {
        let mut emitter = Emitter::new(true);
        let diagnostic = Diagnostic::error().with_message(format!(
            "pattern length {} exceeds file length {}",
            needle.len(),
            haystack.len()
        ));
        emitter.emit(&FilesDB::new(), diagnostic)?;
        emitter.abort_if_errors();
    }
    Ok(())
}

struct Emitter {
    writer: StandardStream,
    config: codespan_reporting::term::Config,
    has_errors: bool,
}

impl Emitter {
    fn new(stderr: bool) -> Self {
        let writer = if stderr {
            StandardStream::stderr(ColorChoice::Auto)
        } else {
            StandardStream::stdout(ColorChoice::Auto)
        };
        Self {
            writer,
            config: codespan_reporting::term::Config::default(),
            has_errors: false,
        }
    }

    fn abort_if_errors(&self) {
        if self.has_errors {
            std::process::exit(1);
        }
    }

    fn emit(
        &mut self,
        db: &FilesDB,
        diagnostic: Diagnostic<FileId>,
    ) -> Result<(), codespan_reporting::files::Error> {
        self.has_errors |= diagnostic.severity == codespan_reporting::diagnostic::Severity::Error;
        term::emit(
            &mut self.writer.lock(),
            &self.config,
            &db.files,
            &diagnostic,
        )
    }
}

struct FilesDB {
    pub files: SimpleFiles<String, String>,
    path_to_file_id: HashMap<PathBuf, FileId>,
}

impl FilesDB {
    fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            path_to_file_id: HashMap::new(),
        }
    }

    fn label(&mut self, path: &Path, span: Range<usize>) -> io::Result<Label<FileId>> {
        let file_id = self.try_get_or_insert(path, || std::fs::read_to_string(path))?;
        Ok(Label::primary(file_id, span))
    }

    fn try_get_or_insert<E>(
        &mut self,
        path: &Path,
        f: impl Fn() -> Result<String, E>,
    ) -> Result<FileId, E> {
        match self.path_to_file_id.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => {
                let file_id = self.files.add(path.display().to_string(), f()?);
                entry.insert(file_id);
                Ok(file_id)
            }
        }
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
