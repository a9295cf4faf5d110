//! List and search commands: browse the dataset in insertion order.

use anyhow::Result;

use super::Outcome;
use crate::acronym::{Entry, Repository};
use crate::output::{format_heading, LookupResponse, MatchKind, Output};
use crate::tips::{show_tip, TipContext};

pub fn list(repo: &Repository, output: &Output) -> Result<Outcome> {
    let entries: Vec<&Entry> = repo.all().iter().collect();
    output.verbose(&format!("{} acronyms", entries.len()));
    print_entries(MatchKind::List, None, entries, output)
}

/// Case-insensitive substring search over codes and expansions.
pub fn search(repo: &Repository, text: &str, output: &Output) -> Result<Outcome> {
    let entries = repo.filter(text);
    output.verbose(&format!(
        "{} of {} acronyms match '{}'",
        entries.len(),
        repo.len(),
        text.trim()
    ));

    let matches = entries.len();
    let outcome = print_entries(MatchKind::Search, Some(text), entries, output)?;
    if outcome == Outcome::NotFound && !output.is_json() {
        output.data(&format!("No acronyms match '{}'.", text.trim()));
    } else if !output.is_json() {
        show_tip(TipContext::Search { matches }, output.is_quiet());
    }
    Ok(outcome)
}

fn print_entries(
    kind: MatchKind,
    query: Option<&str>,
    entries: Vec<&Entry>,
    output: &Output,
) -> Result<Outcome> {
    let outcome = if entries.is_empty() {
        Outcome::NotFound
    } else {
        Outcome::Found
    };

    if output.is_json() {
        output.json(&LookupResponse::new(kind, query, entries))?;
    } else {
        for entry in entries {
            output.data(&format_heading(entry));
        }
    }
    Ok(outcome)
}
