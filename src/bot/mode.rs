//! Bot modes and the selected/runtime pair

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::BotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Idle,
    Tree,
    Fish,
    /// Only ever a runtime mode; forced while hostiles are near
    Combat,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Idle => "IDLE",
            Mode::Tree => "TREE",
            Mode::Fish => "FISH",
            Mode::Combat => "COMBAT",
        }
    }

    pub fn is_selectable(self) -> bool {
        self != Mode::Combat
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; `combat` is rejected like any unknown word
impl FromStr for Mode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(Mode::Idle),
            "tree" => Ok(Mode::Tree),
            "fish" => Ok(Mode::Fish),
            _ => Err(BotError::UnknownMode(s.to_string())),
        }
    }
}

/// User choice plus what the loop is actually doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeState {
    selected: Mode,
    runtime: Mode,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Mode {
        self.selected
    }

    pub fn runtime(&self) -> Mode {
        self.runtime
    }

    /// Change the user's mode; combat cannot be selected
    pub fn select(&mut self, mode: Mode) -> Result<(), BotError> {
        if !mode.is_selectable() {
            return Err(BotError::UnknownMode(mode.as_str().to_lowercase()));
        }
        self.selected = mode;
        Ok(())
    }

    /// Record this tick's runtime mode, returning the previous one
    pub(crate) fn set_runtime(&mut self, mode: Mode) -> Mode {
        std::mem::replace(&mut self.runtime, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_any_case() {
        assert_eq!("TREE".parse::<Mode>().unwrap(), Mode::Tree);
        assert_eq!("Fish".parse::<Mode>().unwrap(), Mode::Fish);
        assert_eq!("idle".parse::<Mode>().unwrap(), Mode::Idle);
    }

    #[test]
    fn test_parse_rejects_unknown_and_combat() {
        match "swim".parse::<Mode>() {
            Err(BotError::UnknownMode(raw)) => assert_eq!(raw, "swim"),
            other => panic!("expected UnknownMode, got {:?}", other),
        }
        assert!("combat".parse::<Mode>().is_err());
    }

    #[test]
    fn test_select_combat_rejected() {
        let mut modes = ModeState::new();
        modes.select(Mode::Tree).unwrap();
        assert!(modes.select(Mode::Combat).is_err());
        assert_eq!(modes.selected(), Mode::Tree);
    }

    #[test]
    fn test_display_is_upper_case() {
        assert_eq!(Mode::Combat.to_string(), "COMBAT");
    }
}
