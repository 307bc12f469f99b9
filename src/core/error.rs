use thiserror::Error;

use crate::command::CommandError;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
