//! Random command: show one acronym picked from the dataset.

use anyhow::Result;
use rand::Rng;

use super::Outcome;
use crate::acronym::Repository;
use crate::output::{LookupResponse, MatchKind, Output};
use crate::tips::{show_tip, TipContext};

pub fn random<R: Rng + ?Sized>(
    repo: &Repository,
    rng: &mut R,
    output: &Output,
) -> Result<Outcome> {
    let entry = repo.random(rng)?;
    output.verbose(&format!("picked {} of {}", entry.code, repo.len()));

    if output.is_json() {
        output.json(&LookupResponse::new(MatchKind::Random, None, vec![entry]))?;
    } else {
        output.entry(entry);
        show_tip(TipContext::Random, output.is_quiet());
    }
    Ok(Outcome::Found)
}
