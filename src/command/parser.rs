//! Text grammar for the `treebot` command

use thiserror::Error;

/// Name of the root command
pub const ROOT: &str = "treebot";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownRoot(String),

    #[error("Unknown subcommand: {0}")]
    UnknownSubcommand(String),

    #[error("Missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// A syntactically valid `treebot` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// Bare `treebot`
    Usage,
    Status,
    /// The raw word is kept; whether it names a mode is decided at execution
    SetMode(String),
}

/// Parse `treebot ...`; a leading `/` is accepted
pub fn parse_command(input: &str) -> Result<BotCommand, CommandError> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input);
    let mut tokens = input.split_whitespace();

    let root = tokens.next().ok_or(CommandError::Empty)?;
    if !root.eq_ignore_ascii_case(ROOT) {
        return Err(CommandError::UnknownRoot(root.to_string()));
    }

    let command = match tokens.next() {
        None => BotCommand::Usage,
        Some(sub) if sub.eq_ignore_ascii_case("status") => BotCommand::Status,
        Some(sub) if sub.eq_ignore_ascii_case("mode") => {
            let value = tokens.next().ok_or(CommandError::MissingArgument("value"))?;
            BotCommand::SetMode(value.to_string())
        }
        Some(other) => return Err(CommandError::UnknownSubcommand(other.to_string())),
    };

    if let Some(extra) = tokens.next() {
        return Err(CommandError::UnexpectedArgument(extra.to_string()));
    }
    Ok(command)
}
