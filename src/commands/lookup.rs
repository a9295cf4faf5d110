//! Lookup command: exact match first, fuzzy suggestions on a miss.

use anyhow::Result;

use super::Outcome;
use crate::acronym::{LookupError, Repository};
use crate::output::{format_suggestion, LookupResponse, MatchKind, Output};
use crate::tips::{show_tip, TipContext};

pub fn lookup(repo: &Repository, query: &str, limit: usize, output: &Output) -> Result<Outcome> {
    match repo.find(query) {
        Ok(entry) => {
            if output.is_json() {
                output.json(&LookupResponse::new(
                    MatchKind::Exact,
                    Some(query),
                    vec![entry],
                ))?;
            } else {
                output.entry(entry);
            }
            return Ok(Outcome::Found);
        }
        Err(e) => output.verbose(&format!("{e}; trying fuzzy match (limit {limit})")),
    }

    let scored = match repo.find_fuzzy_scored(query, limit) {
        Ok(scored) => scored,
        Err(e @ LookupError::NoFuzzyMatch(_)) => {
            if output.is_json() {
                return Err(e.into());
            }
            output.data(&format!("Acronym '{}' not found.", query.trim()));
            output.info("Try 'tmdr --help' for usage information.");
            show_tip(TipContext::NotFound { suggested: false }, output.is_quiet());
            return Ok(Outcome::NotFound);
        }
        Err(e) => return Err(e.into()),
    };

    for candidate in &scored {
        output.verbose(&format!(
            "  score {:>3}  {}",
            candidate.score, candidate.entry.code
        ));
    }

    if output.is_json() {
        let entries = scored.iter().map(|c| &c.entry).collect();
        output.json(&LookupResponse::new(MatchKind::Fuzzy, Some(query), entries))?;
    } else {
        output.data(&format!("'{}' not found. Did you mean:", query.trim()));
        for candidate in &scored {
            output.data(&format_suggestion(&candidate.entry));
        }
        show_tip(TipContext::NotFound { suggested: true }, output.is_quiet());
    }

    Ok(Outcome::NotFound)
}
