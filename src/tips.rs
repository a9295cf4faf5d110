//! Contextual tips shown after commands to improve discoverability.
//!
//! Tips are shown:
//! - Only when stderr is a TTY (not in scripts/CI)
//! - Only when --quiet is not set
//! - One tip per command max
//! - Formatted subtly (dim text) so they don't look like command output

use std::io::{IsTerminal, Write};

/// Context for selecting an appropriate tip after a command.
pub enum TipContext {
    /// Lookup missed; `suggested` is true when fuzzy matches were printed
    NotFound { suggested: bool },
    /// After a search that returned many rows
    Search { matches: usize },
    /// After a random pick
    Random,
}

/// Show a contextual tip if appropriate.
pub fn show_tip(ctx: TipContext, quiet: bool) {
    if quiet {
        return;
    }

    if !std::io::stderr().is_terminal() {
        return;
    }

    let Some(tip) = select_tip(ctx) else {
        return;
    };

    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "\n\x1b[2mTip: {}\x1b[0m", tip);
}

/// Select the most relevant tip for the given context.
fn select_tip(ctx: TipContext) -> Option<&'static str> {
    match ctx {
        TipContext::NotFound { suggested: true } => {
            Some("Try one of the suggestions above, or `tmdr --search <text>` to match expansions")
        }
        TipContext::NotFound { suggested: false } => {
            Some("`tmdr --list` shows every known acronym; `tmdr --help` for usage")
        }
        TipContext::Search { matches } if matches > 10 => {
            Some("Narrow the search with more letters, or look one up directly with `tmdr <acronym>`")
        }
        TipContext::Search { .. } => None,
        TipContext::Random => Some("`tmdr -i` keeps a prompt open for several lookups"),
    }
}
