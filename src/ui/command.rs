use crate::types::TodoResponse;

pub const HELP: &str = "\
Commands:
  add <title>   create a todo
  toggle <id>   flip a todo between active and completed
  rm <id>       delete a todo (asks for confirmation)
  ls            re-fetch the list
  help          show this message
  quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(i64),
    Remove(i64),
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a todo id")]
    InvalidId(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "add" | "a" => Ok(Self::Add(rest.to_string())),
            "toggle" | "t" => parse_id("toggle", rest).map(Self::Toggle),
            "rm" | "delete" => parse_id("rm", rest).map(Self::Remove),
            "ls" | "list" | "refresh" => Ok(Self::Refresh),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn parse_id(command: &'static str, raw: &str) -> Result<i64, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

/// Question shown before a delete is sent.
pub fn confirm_prompt(id: i64, todo: Option<&TodoResponse>) -> String {
    match todo {
        Some(todo) => format!("Delete \"{}\"? [y/N] ", todo.title),
        None => format!("Delete todo #{id}? [y/N] "),
    }
}

/// Anything other than an explicit yes declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Command, CommandError, confirm_prompt, is_affirmative};
    use crate::types::TodoResponse;

    #[test]
    fn parses_each_command() {
        assert_eq!(
            Command::parse("add Buy milk"),
            Ok(Command::Add("Buy milk".to_string()))
        );
        assert_eq!(Command::parse("toggle 3"), Ok(Command::Toggle(3)));
        assert_eq!(Command::parse("  RM 12 "), Ok(Command::Remove(12)));
        assert_eq!(Command::parse("ls"), Ok(Command::Refresh));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn add_without_title_is_passed_through_blank() {
        assert_eq!(Command::parse("add"), Ok(Command::Add(String::new())));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(
            Command::parse("toggle"),
            Err(CommandError::MissingArgument("toggle"))
        );
        assert_eq!(
            Command::parse("rm abc"),
            Err(CommandError::InvalidId("abc".to_string()))
        );
    }

    #[test]
    fn confirm_prompt_names_the_todo() {
        let todo = TodoResponse {
            id: 4,
            title: "Walk dog".to_string(),
            completed: false,
            created_at: Utc::now().fixed_offset(),
        };
        assert_eq!(confirm_prompt(4, Some(&todo)), "Delete \"Walk dog\"? [y/N] ");
        assert_eq!(confirm_prompt(4, None), "Delete todo #4? [y/N] ");
    }

    #[test]
    fn only_explicit_yes_confirms() {
        for answer in ["y", "Y", "yes", " YES \n"] {
            assert!(is_affirmative(answer), "{answer:?}");
        }
        for answer in ["", "n", "no", "yep", "sure"] {
            assert!(!is_affirmative(answer), "{answer:?}");
        }
    }
}
