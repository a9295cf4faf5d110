//! Acronym dataset: records, lookup errors, fuzzy scoring and the repository.

pub mod fuzzy;
pub mod repository;

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub use repository::{Repository, SharedRepository};

/// A medical acronym with its expanded form and optional description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Uppercase short code, unique within a dataset
    pub code: String,
    pub expansion: String,
    /// Empty when the source row had no description
    pub description: String,
}

impl Entry {
    pub fn new(
        code: impl Into<String>,
        expansion: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into().trim().to_ascii_uppercase(),
            expansion: expansion.into(),
            description: description.into(),
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

/// Errors returned to callers of the lookup operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Exact lookup missed; callers usually fall back to fuzzy search
    #[error("acronym '{0}' not found")]
    NotFound(String),

    #[error("no acronyms similar to '{0}'")]
    NoFuzzyMatch(String),

    #[error("no acronyms available")]
    Empty,
}

/// Errors building a repository from its source. Fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open acronym data {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("acronym CSV {origin} has no header row")]
    MissingHeader { origin: String },

    #[error("failed to read acronym CSV {origin}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },
}
