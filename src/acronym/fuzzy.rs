//! Similarity scoring for fuzzy acronym lookup.
//!
//! Scores combine edit distance with substring and shared-prefix bonuses.
//! Bonuses are additive and unclamped, so a score can exceed 100; callers
//! rank by the raw value.

use super::Entry;
use crate::distance::levenshtein;

/// Score returned for identical strings.
pub const EXACT_SCORE: u32 = 100;

/// Bonus when one string contains the other.
pub const SUBSTRING_BONUS: u32 = 20;

/// Bonus per matching leading character.
pub const PREFIX_BONUS: u32 = 5;

/// Number of leading characters considered for the prefix bonus.
pub const PREFIX_LEN: usize = 3;

/// Result count used when a caller passes 0.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// An entry paired with its score for one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub entry: Entry,
    pub score: u32,
}

/// Largest edit distance accepted for strings whose longer side is `max_len`.
pub fn max_distance(max_len: usize) -> usize {
    if max_len <= 4 {
        2
    } else {
        3
    }
}

/// Similarity between an already-normalized query and a candidate key.
/// Returns 0 when the candidate should be excluded.
pub fn score(query: &str, key: &str) -> u32 {
    if query == key {
        return EXACT_SCORE;
    }

    let d = levenshtein(query, key);
    let query_len = query.chars().count();
    let key_len = key.chars().count();
    let max_len = query_len.max(key_len);

    if d > max_distance(max_len) {
        return 0;
    }

    // d <= max_len always holds, so the base never underflows
    let mut total = (100 - d * 100 / max_len) as u32;

    if query.contains(key) || key.contains(query) {
        total += SUBSTRING_BONUS;
    }

    let positions = query_len.min(key_len).min(PREFIX_LEN);
    let shared = query
        .chars()
        .zip(key.chars())
        .take(positions)
        .take_while(|(q, k)| q == k)
        .count();
    total += shared as u32 * PREFIX_BONUS;

    total
}

/// Score every entry, keep the non-zero ones, and return the best
/// `max_results` in descending score order. Ties keep input order.
pub fn rank<'a, I>(query: &str, entries: I, max_results: usize) -> Vec<ScoredCandidate>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let limit = if max_results == 0 {
        DEFAULT_MAX_RESULTS
    } else {
        max_results
    };

    let mut candidates: Vec<ScoredCandidate> = entries
        .into_iter()
        .filter_map(|entry| {
            let s = score(query, &entry.code);
            (s > 0).then(|| ScoredCandidate {
                entry: entry.clone(),
                score: s,
            })
        })
        .collect();

    // sort_by is stable
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(limit);
    candidates
}
