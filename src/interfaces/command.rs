use crate::application::modal::ESCAPE_KEY;
use crate::domain::events::ModalTrigger;
use crate::domain::method::MethodId;
use std::str::FromStr;
use thiserror::Error;

/// A line of user input in the terminal checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Select(MethodId),
    Confirm,
    Modal(ModalTrigger),
    Copy(String),
    /// Page visibility change; `true` when hidden.
    Visibility(bool),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("unknown command: {0} (type `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        let arg = parts.next();

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "select" | "s" => Command::Select(MethodId::new(
                arg.ok_or(CommandError::MissingArgument("select"))?,
            )),
            "confirm" | "c" => Command::Confirm,
            "close" => Command::Modal(ModalTrigger::CloseButton),
            "esc" | "escape" => Command::Modal(ModalTrigger::Key(ESCAPE_KEY.to_string())),
            "backdrop" => Command::Modal(ModalTrigger::Backdrop),
            "click" => Command::Modal(ModalTrigger::ContentClick),
            "key" => Command::Modal(ModalTrigger::Key(
                arg.ok_or(CommandError::MissingArgument("key"))?.to_string(),
            )),
            "copy" => Command::Copy(arg.ok_or(CommandError::MissingArgument("copy"))?.to_string()),
            "hide" => Command::Visibility(true),
            "show" => Command::Visibility(false),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

pub const HELP: &str = "commands: list | select <method> | confirm | close | esc | backdrop | click | \
key <name> | copy <field> | hide | show | help | quit";
