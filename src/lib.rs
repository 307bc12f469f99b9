//! TreeBot - tick-driven automation for a voxel game client
//!
//! Combat self-defense, tree harvesting and fishing, decided fresh every
//! client tick against a host engine reached through the `host` ports.

pub mod bot;
pub mod command;
pub mod core;
pub mod host;
pub mod sandbox;
pub mod spatial;

pub use crate::bot::{Mode, TickOutcome, TreeBot};
pub use crate::core::{BotConfig, BotError, Result};
