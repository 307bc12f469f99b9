//! Command surface for the `treebot` root command
//!
//! Text line -> parse_command -> BotCommand -> CommandExecutor -> CommandOutcome

pub mod executor;
pub mod parser;

pub use executor::{status_line, CommandExecutor, CommandOutcome, Feedback, COMMAND_SUCCESS, USAGE};
pub use parser::{parse_command, BotCommand, CommandError, ROOT};
