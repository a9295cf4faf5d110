//! In-memory acronym repository.
//!
//! Built once from a CSV source and read-only afterwards. Holds two views over
//! the same entries: an index by uppercase code for exact lookup, and the
//! entries in insertion order for deterministic iteration.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rand::seq::SliceRandom;
use rand::Rng;

use super::fuzzy::{self, ScoredCandidate};
use super::{Entry, LoadError, LookupError};

/// Dataset compiled into the binary.
pub const EMBEDDED_CSV: &str = include_str!("../../data/acronyms.csv");

/// Separator between expansion and description: an en dash.
const DELIMITER: &str = "\u{2013}";

/// The en dash as it appears when UTF-8 was decoded as Windows-1252.
const MISDECODED_DELIMITER: &str = "\u{e2}\u{20ac}\u{201c}";

/// Where a repository's rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Embedded,
    File(PathBuf),
}

impl DataSource {
    pub fn load(&self) -> Result<Repository, LoadError> {
        match self {
            DataSource::Embedded => Repository::embedded(),
            DataSource::File(path) => Repository::from_path(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Embedded => "embedded dataset".to_string(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Repository {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Repository {
    /// Build from entries. A repeated code keeps its first position and takes
    /// the contents of its last occurrence.
    #[allow(dead_code)] // Used by tests and library-style callers
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut repo = Repository::default();
        for entry in entries {
            repo.insert(entry);
        }
        repo
    }

    fn insert(&mut self, entry: Entry) {
        match self.index.get(&entry.code) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.code.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn embedded() -> Result<Self, LoadError> {
        Self::from_reader(EMBEDDED_CSV.as_bytes(), "embedded dataset")
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// Parse CSV rows of `code,expansion – description`.
    ///
    /// The first row is a header and must be present. Rows with fewer than two
    /// columns or a blank code are skipped; any other read error aborts the load.
    pub fn from_reader<R: io::Read>(reader: R, origin: &str) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers().map_err(|source| LoadError::Csv {
            origin: origin.to_string(),
            source,
        })?;
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::MissingHeader {
                origin: origin.to_string(),
            });
        }

        let mut repo = Repository::default();
        for result in reader.records() {
            let record = result.map_err(|source| LoadError::Csv {
                origin: origin.to_string(),
                source,
            })?;

            if record.len() < 2 {
                continue;
            }
            let code = record[0].trim();
            if code.is_empty() {
                continue;
            }

            let (expansion, description) = split_definition(&record[1]);
            repo.insert(Entry::new(code, expansion, description));
        }

        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    /// Exact, case-insensitive lookup by code.
    pub fn find(&self, code: &str) -> Result<&Entry, LookupError> {
        self.index
            .get(&normalize(code))
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| LookupError::NotFound(code.trim().to_string()))
    }

    /// Best fuzzy matches for `query`, highest score first.
    /// `max_results == 0` means the default of 3.
    #[allow(dead_code)] // The CLI uses find_fuzzy_scored to report scores
    pub fn find_fuzzy(&self, query: &str, max_results: usize) -> Result<Vec<Entry>, LookupError> {
        Ok(self
            .find_fuzzy_scored(query, max_results)?
            .into_iter()
            .map(|c| c.entry)
            .collect())
    }

    /// Like [`find_fuzzy`](Self::find_fuzzy), keeping each candidate's score.
    pub fn find_fuzzy_scored(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ScoredCandidate>, LookupError> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return Err(LookupError::NoFuzzyMatch(query.trim().to_string()));
        }

        let ranked = fuzzy::rank(&normalized, &self.entries, max_results);
        if ranked.is_empty() {
            return Err(LookupError::NoFuzzyMatch(query.trim().to_string()));
        }
        Ok(ranked)
    }

    /// A uniformly chosen entry.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Entry, LookupError> {
        self.entries.choose(rng).ok_or(LookupError::Empty)
    }

    /// Entries whose code or expansion contains `text`, ignoring ASCII case.
    /// Blank text matches everything.
    pub fn filter(&self, text: &str) -> Vec<&Entry> {
        let needle = text.trim().to_ascii_uppercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|e| {
                e.code.contains(&needle) || e.expansion.to_ascii_uppercase().contains(&needle)
            })
            .collect()
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Split on the first delimiter into trimmed (expansion, description).
fn split_definition(field: &str) -> (&str, &str) {
    let found = [DELIMITER, MISDECODED_DELIMITER]
        .iter()
        .filter_map(|d| field.find(d).map(|pos| (pos, d.len())))
        .min_by_key(|(pos, _)| *pos);

    match found {
        Some((pos, len)) => (field[..pos].trim(), field[pos + len..].trim()),
        None => (field.trim(), ""),
    }
}

/// Read-mostly handle to the current repository.
///
/// Readers take an `Arc` snapshot that stays valid for as long as they hold
/// it. A reload builds a new repository and swaps the pointer; nothing is
/// mutated in place.
#[derive(Debug)]
pub struct SharedRepository {
    current: RwLock<Arc<Repository>>,
}

impl SharedRepository {
    pub fn new(repo: Repository) -> Self {
        Self {
            current: RwLock::new(Arc::new(repo)),
        }
    }

    pub fn snapshot(&self) -> Arc<Repository> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in `repo`, returning the previous snapshot.
    pub fn replace(&self, repo: Repository) -> Arc<Repository> {
        self.swap(Arc::new(repo))
    }

    fn swap(&self, next: Arc<Repository>) -> Arc<Repository> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next)
    }

    /// Rebuild from `source` and swap it in, returning the repository that
    /// was installed. On failure the current snapshot is left untouched.
    pub fn reload(&self, source: &DataSource) -> Result<Arc<Repository>, LoadError> {
        let fresh = Arc::new(source.load()?);
        self.swap(Arc::clone(&fresh));
        Ok(fresh)
    }
}
