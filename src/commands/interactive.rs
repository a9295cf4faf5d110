//! Interactive prompt: repeated lookups until the user quits.
//!
//! Plain lines are looked up like `tmdr <acronym>`. Lines starting with `:`
//! are prompt commands.

use anyhow::Result;
use dialoguer::Input;

use super::{list, lookup, random, search};
use crate::acronym::repository::{DataSource, SharedRepository};
use crate::output::Output;

const PROMPT_HELP: &str = "\
Type an acronym to look it up. Commands:
  :random          show a random acronym
  :list            list every acronym
  :search <text>   match codes and expansions
  :reload          re-read the dataset
  :help            show this message
  :quit            exit (or submit an empty line)";

#[derive(Debug, PartialEq, Eq)]
enum PromptAction<'a> {
    Lookup(&'a str),
    Random,
    List,
    Search(&'a str),
    Reload,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> PromptAction<'_> {
    let line = line.trim();
    if line.is_empty() {
        return PromptAction::Quit;
    }
    let Some(command) = line.strip_prefix(':') else {
        return PromptAction::Lookup(line);
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "random" | "r" => PromptAction::Random,
        "list" | "l" => PromptAction::List,
        "search" | "s" if !rest.is_empty() => PromptAction::Search(rest),
        "reload" => PromptAction::Reload,
        "help" | "h" | "?" => PromptAction::Help,
        "quit" | "q" | "exit" => PromptAction::Quit,
        _ => PromptAction::Unknown(line),
    }
}

pub fn interactive(
    shared: &SharedRepository,
    source: &DataSource,
    limit: usize,
    output: &Output,
) -> Result<()> {
    output.info(&format!(
        "tmdr: {} acronyms from {}. Type :help for commands.",
        shared.snapshot().len(),
        source.describe()
    ));

    loop {
        let line: String = Input::new()
            .with_prompt("Acronym")
            .allow_empty(true)
            .interact_text()?;

        // Each action sees the latest snapshot, so :reload takes effect immediately
        let repo = shared.snapshot();
        let result = match parse_line(&line) {
            PromptAction::Quit => return Ok(()),
            PromptAction::Lookup(query) => lookup(&repo, query, limit, output).map(drop),
            PromptAction::Random => random(&repo, &mut rand::thread_rng(), output).map(drop),
            PromptAction::List => list(&repo, output).map(drop),
            PromptAction::Search(text) => search(&repo, text, output).map(drop),
            PromptAction::Reload => {
                match shared.reload(source) {
                    Ok(fresh) => output.info(&format!(
                        "Reloaded {} acronyms from {}",
                        fresh.len(),
                        source.describe()
                    )),
                    Err(e) => output.warn(&format!(
                        "Reload failed, keeping current data: {:#}",
                        anyhow::Error::new(e)
                    )),
                }
                Ok(())
            }
            PromptAction::Help => {
                output.info(PROMPT_HELP);
                Ok(())
            }
            PromptAction::Unknown(text) => {
                output.warn(&format!("Unknown command '{text}'. Type :help for commands."));
                Ok(())
            }
        };
        // A failed lookup must not end the session
        if let Err(e) = result {
            output.warn(&format!("Error: {e:#}"));
        }
        output.data("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_lookup() {
        assert_eq!(parse_line("  abg "), PromptAction::Lookup("abg"));
    }

    #[test]
    fn test_empty_line_quits() {
        assert_eq!(parse_line(""), PromptAction::Quit);
        assert_eq!(parse_line("   "), PromptAction::Quit);
        assert_eq!(parse_line(":q"), PromptAction::Quit);
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_line(":random"), PromptAction::Random);
        assert_eq!(parse_line(":list"), PromptAction::List);
        assert_eq!(parse_line(":reload"), PromptAction::Reload);
        assert_eq!(parse_line(":?"), PromptAction::Help);
        assert_eq!(
            parse_line(":search blood gas"),
            PromptAction::Search("blood gas")
        );
    }

    #[test]
    fn test_search_without_text_is_unknown() {
        assert_eq!(parse_line(":search"), PromptAction::Unknown(":search"));
        assert_eq!(parse_line(":bogus"), PromptAction::Unknown(":bogus"));
    }
}
