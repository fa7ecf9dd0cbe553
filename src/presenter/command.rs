//! Dashboard command parsing
//!
//! One command per input line. The first word selects the command; the rest
//! of the line is its argument, so keywords may contain spaces.

use super::state::Page;
use crate::content::{TypeFilter, TypeFilterParseError};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    ShowAll,
    Show(String),
    Filter(TypeFilter),
    Page(Page),
    Add(String),
    Remove(String),
    ToggleTheme,
    Status,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', type `help` for a list")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    InvalidFilter(#[from] TypeFilterParseError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let argument = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "refresh" | "r" => Ok(Command::Refresh),
            "all" => Ok(Command::ShowAll),
            "show" => argument("show").map(Command::Show),
            "filter" | "f" => Ok(Command::Filter(argument("filter")?.parse()?)),
            "dashboard" | "d" => Ok(Command::Page(Page::Dashboard)),
            "keywords" | "k" => Ok(Command::Page(Page::Keywords)),
            "add" => argument("add").map(Command::Add),
            "remove" | "rm" => argument("remove").map(Command::Remove),
            "theme" | "t" => Ok(Command::ToggleTheme),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Whether a line answers a confirmation prompt with yes
pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
