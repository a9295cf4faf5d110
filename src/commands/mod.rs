//! Command implementations for the tmdr CLI.
//!
//! Each submodule is a thin caller of the acronym repository that renders
//! results through [`Output`](crate::output::Output).

mod interactive;
mod list;
mod lookup;
mod random;

pub use interactive::interactive;
pub use list::{list, search};
pub use lookup::lookup;
pub use random::random;

use crate::exit_codes;

/// Whether a command answered the user's question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Found => exit_codes::FOUND,
            Outcome::NotFound => exit_codes::NOT_FOUND,
        }
    }
}
