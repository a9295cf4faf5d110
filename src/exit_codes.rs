//! Exit code policy for tmdr.
//!
//! ## Lookups (0-2)
//!
//! - `0` = Found (exact match, random pick, list, or non-empty search)
//! - `1` = Not found (including when fuzzy suggestions were printed)
//! - `2` = Usage error (reported by clap, or no acronym on a non-terminal)
//!
//! ## Operational Failures (10+)
//!
//! Failures that prevented a lookup from running at all use codes >= 10:
//! - `10` = General operational failure
//! - `11` = Dataset could not be loaded
//! - `12` = Configuration error
//!
//! This lets scripts tell "the acronym is unknown" apart from
//! "tmdr could not answer".

use crate::acronym::{LoadError, LookupError};
use crate::config::ConfigError;

/// Exit code: lookup succeeded
pub const FOUND: i32 = 0;

/// Exit code: acronym not found
pub const NOT_FOUND: i32 = 1;

/// Exit code: invalid command-line usage
pub const USAGE: i32 = 2;

/// Exit code: general operational failure
pub const OPERATIONAL_FAILURE: i32 = 10;

/// Exit code: dataset failed to load
pub const LOAD_ERROR: i32 = 11;

/// Exit code: configuration error
pub const CONFIG_ERROR: i32 = 12;

/// Map an application error to its exit code.
pub fn for_error(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<LookupError>().is_some() {
        NOT_FOUND
    } else if err.downcast_ref::<LoadError>().is_some() {
        LOAD_ERROR
    } else if err.downcast_ref::<ConfigError>().is_some() {
        CONFIG_ERROR
    } else {
        OPERATIONAL_FAILURE
    }
}

/// Stable machine-readable code for the JSON error envelope.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(lookup) = err.downcast_ref::<LookupError>() {
        return match lookup {
            LookupError::NotFound(_) => "not_found",
            LookupError::NoFuzzyMatch(_) => "no_fuzzy_match",
            LookupError::Empty => "empty_dataset",
        };
    }
    if err.downcast_ref::<LoadError>().is_some() {
        "load_error"
    } else if err.downcast_ref::<ConfigError>().is_some() {
        "config_error"
    } else {
        "internal_error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_lookup_errors_are_not_found() {
        let err = anyhow::Error::new(LookupError::NoFuzzyMatch("ZZZ".into()));
        assert_eq!(for_error(&err), NOT_FOUND);
        assert_eq!(error_code(&err), "no_fuzzy_match");
    }

    #[test]
    fn test_load_error_survives_context() {
        let result: Result<(), LoadError> = Err(LoadError::Io {
            path: "missing.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });
        let err = result.context("Failed to load acronym dataset").unwrap_err();
        assert_eq!(for_error(&err), LOAD_ERROR);
        assert_eq!(error_code(&err), "load_error");
    }

    #[test]
    fn test_config_error() {
        let err = anyhow::Error::new(ConfigError("bad".into()));
        assert_eq!(for_error(&err), CONFIG_ERROR);
        assert_eq!(error_code(&err), "config_error");
    }

    #[test]
    fn test_other_errors_are_operational() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(for_error(&err), OPERATIONAL_FAILURE);
        assert_eq!(error_code(&err), "internal_error");
    }
}
