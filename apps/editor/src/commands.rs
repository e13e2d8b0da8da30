//! Editor commands parsed from input lines.

use shared::domain::{ProductType, UnknownProductType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    SetHandle { handle: String },
    Fetch { handle: Option<String> },
    SelectType { product_type: ProductType },
    SetName { index: usize, name: String },
    SetValue { index: usize, value: String },
    Add,
    Remove { index: usize },
    Generate,
    Minify,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'; type 'help' for the list")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a property index")]
    BadIndex(String),
    #[error(transparent)]
    ProductType(#[from] UnknownProductType),
}

pub const HELP: &str = "\
commands:
  handle <text>      set the product handle
  fetch [<handle>]   fetch the product's properties
  type <preset>      furniture | electronics | custom
  name <i> <text>    set the name of property i
  value <i> <text>   set the value of property i
  add                append an empty property
  remove <i>         delete property i
  generate           validate and build JSON
  minify             compact the current JSON
  show               redraw the form
  quit               exit";

/// Splits off the first word; the rest keeps inner whitespace so names and values may contain spaces.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

fn parse_index(raw: &str, command: &'static str) -> Result<usize, ParseCommandError> {
    if raw.is_empty() {
        return Err(ParseCommandError::MissingArgument {
            command,
            expected: "a property index",
        });
    }
    raw.parse()
        .map_err(|_| ParseCommandError::BadIndex(raw.to_string()))
}

pub fn parse_command(line: &str) -> Result<EditorCommand, ParseCommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = split_word(line);
    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Err(ParseCommandError::Empty),
        "handle" => EditorCommand::SetHandle {
            handle: rest.to_string(),
        },
        "fetch" => EditorCommand::Fetch {
            handle: (!rest.is_empty()).then(|| rest.to_string()),
        },
        "type" => {
            if rest.is_empty() {
                return Err(ParseCommandError::MissingArgument {
                    command: "type",
                    expected: "a preset name",
                });
            }
            EditorCommand::SelectType {
                product_type: rest.parse()?,
            }
        }
        "name" => {
            let (index, text) = split_word(rest);
            EditorCommand::SetName {
                index: parse_index(index, "name")?,
                name: text.to_string(),
            }
        }
        "value" => {
            let (index, text) = split_word(rest);
            EditorCommand::SetValue {
                index: parse_index(index, "value")?,
                value: text.to_string(),
            }
        }
        "add" => EditorCommand::Add,
        "remove" | "delete" => EditorCommand::Remove {
            index: parse_index(rest.trim(), "remove")?,
        },
        "generate" => EditorCommand::Generate,
        "minify" => EditorCommand::Minify,
        "show" => EditorCommand::Show,
        "help" | "?" => EditorCommand::Help,
        "quit" | "exit" => EditorCommand::Quit,
        other => return Err(ParseCommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
