//! Command execution - applies a parsed command to the bot

use crate::bot::{Mode, TreeBot};
use crate::command::parser::{parse_command, BotCommand, CommandError};

/// Status returned by every executed branch, including rejected modes
pub const COMMAND_SUCCESS: i32 = 1;

pub const USAGE: &str = "Usage: /treebot mode <idle|tree|fish>";

/// One line sent back to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Info(String),
    Error(String),
}

impl Feedback {
    pub fn text(&self) -> &str {
        match self {
            Feedback::Info(text) | Feedback::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub status: i32,
    pub feedback: Vec<Feedback>,
}

impl CommandOutcome {
    fn single(line: Feedback) -> Self {
        Self {
            status: COMMAND_SUCCESS,
            feedback: vec![line],
        }
    }
}

/// Executes commands against a bot
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn execute(bot: &mut TreeBot, command: &BotCommand) -> CommandOutcome {
        match command {
            BotCommand::Usage => CommandOutcome::single(Feedback::Info(USAGE.to_string())),
            BotCommand::Status => CommandOutcome::single(Feedback::Info(status_line(bot))),
            BotCommand::SetMode(raw) => CommandOutcome::single(set_mode(bot, raw)),
        }
    }

    /// Parse a raw line and execute it
    pub fn run(bot: &mut TreeBot, input: &str) -> Result<CommandOutcome, CommandError> {
        let command = parse_command(input)?;
        Ok(Self::execute(bot, &command))
    }
}

/// `TreeBot => selected: TREE, runtime: COMBAT, treeTarget: 1, 64, -3`
pub fn status_line(bot: &TreeBot) -> String {
    let target = bot
        .tree_target()
        .map_or_else(|| "none".to_string(), |pos| pos.to_string());
    format!(
        "TreeBot => selected: {}, runtime: {}, treeTarget: {}",
        bot.selected_mode(),
        bot.runtime_mode(),
        target
    )
}

fn set_mode(bot: &mut TreeBot, raw: &str) -> Feedback {
    let applied = raw
        .parse::<Mode>()
        .and_then(|mode| bot.modes_mut().select(mode).map(|()| mode));

    match applied {
        Ok(mode) => {
            tracing::info!("Selected mode set to {}", mode);
            Feedback::Info(format!("Mode set: {}", mode))
        }
        Err(_) => {
            tracing::warn!("Rejected mode '{}'", raw);
            Feedback::Error(format!("Unknown mode: {}", raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_mode_any_case() {
        let mut bot = TreeBot::default();
        let outcome = CommandExecutor::execute(&mut bot, &BotCommand::SetMode("TREE".into()));

        assert_eq!(outcome.status, COMMAND_SUCCESS);
        assert_eq!(outcome.feedback, vec![Feedback::Info("Mode set: TREE".into())]);
        assert_eq!(bot.selected_mode(), Mode::Tree);
    }

    #[test]
    fn test_unknown_mode_reports_error_without_change() {
        let mut bot = TreeBot::default();
        CommandExecutor::execute(&mut bot, &BotCommand::SetMode("fish".into()));
        let outcome = CommandExecutor::execute(&mut bot, &BotCommand::SetMode("swim".into()));

        assert_eq!(outcome.status, COMMAND_SUCCESS);
        assert!(outcome.feedback[0].is_error());
        assert_eq!(outcome.feedback[0].text(), "Unknown mode: swim");
        assert_eq!(bot.selected_mode(), Mode::Fish);
    }

    #[test]
    fn test_combat_is_not_selectable() {
        let mut bot = TreeBot::default();
        let outcome = CommandExecutor::execute(&mut bot, &BotCommand::SetMode("combat".into()));
        assert!(outcome.feedback[0].is_error());
        assert_eq!(bot.selected_mode(), Mode::Idle);
    }

    #[test]
    fn test_status_without_target() {
        let mut bot = TreeBot::default();
        let outcome = CommandExecutor::execute(&mut bot, &BotCommand::Status);
        assert_eq!(
            outcome.feedback[0].text(),
            "TreeBot => selected: IDLE, runtime: IDLE, treeTarget: none"
        );
    }

    #[test]
    fn test_run_parses_then_executes() {
        let mut bot = TreeBot::default();
        let outcome = CommandExecutor::run(&mut bot, "/treebot mode Fish").unwrap();
        assert_eq!(outcome.feedback[0].text(), "Mode set: FISH");
        assert!(CommandExecutor::run(&mut bot, "/treebot jump").is_err());
        assert_eq!(bot.selected_mode(), Mode::Fish);
    }

    #[test]
    fn test_usage() {
        let mut bot = TreeBot::default();
        let outcome = CommandExecutor::execute(&mut bot, &BotCommand::Usage);
        assert_eq!(outcome.feedback, vec![Feedback::Info(USAGE.to_string())]);
        assert_eq!(outcome.status, COMMAND_SUCCESS);
    }
}
