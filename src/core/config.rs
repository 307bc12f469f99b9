//! Bot configuration with documented constants
//!
//! Every distance and tick window used by the decision loop lives here so the
//! behaviors never carry magic numbers of their own.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{BotError, Result};
use crate::core::types::Tick;

/// Largest accepted tree scan radius, in blocks
///
/// At the limit a rescan visits 129 x 129 x 129 offsets.
pub const MAX_SCAN_RADIUS: i32 = 64;

/// Tuning values for the decision loop
///
/// Distances are in world units (one block = 1.0), windows are in client ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    // === COMBAT ===
    /// Expansion applied to the player's bounding box when looking for hostiles
    ///
    /// Also the upper bound on how far a hostile may be for combat to pick it.
    pub danger_radius: f64,

    /// Melee reach; beyond it the bot walks toward the target instead of swinging
    pub combat_distance: f64,

    /// Attack cooldown progress (0.0..=1.0) required before a melee attack
    ///
    /// Below it the bot holds position without swinging.
    pub attack_cooldown_threshold: f32,

    /// Fraction of the target's height to aim at (0.6 = roughly chest height)
    pub aim_height_fraction: f64,

    /// Crosshair entities closer than this force sprinting off
    pub sprint_cancel_distance: f64,

    // === TREE FARMING ===
    /// Distance to the log's center at which breaking starts
    pub tree_action_distance: f64,

    /// Horizontal scan radius for logs, in blocks
    pub tree_reach_radius: i32,

    /// Vertical half-height of the scan band, in blocks
    pub tree_vertical_radius: i32,

    /// A cached log older than this is replaced by a fresh scan
    pub tree_rescan_ticks: Tick,

    // === FISHING ===
    /// Minimum ticks between cast attempts while no bobber is out
    pub fish_cast_debounce_ticks: Tick,

    /// A bobber older than this is reeled in and recast
    pub fish_recast_timeout_ticks: Tick,

    /// Expansion of the bobber's box used to detect bites
    pub bobber_disturbance_margin: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            danger_radius: 10.0,
            combat_distance: 2.8,
            attack_cooldown_threshold: 0.92,
            aim_height_fraction: 0.6,
            sprint_cancel_distance: 4.0,

            tree_action_distance: 4.0,
            tree_reach_radius: 8,
            tree_vertical_radius: 4,
            tree_rescan_ticks: 10,

            fish_cast_debounce_ticks: 25,
            fish_recast_timeout_ticks: 120,
            bobber_disturbance_margin: 0.25,
        }
    }
}

impl BotConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BotConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("danger_radius", self.danger_radius),
            ("combat_distance", self.combat_distance),
            ("tree_action_distance", self.tree_action_distance),
            ("sprint_cancel_distance", self.sprint_cancel_distance),
        ];
        for (name, value) in distances {
            if !(value.is_finite() && value > 0.0) {
                return Err(BotError::InvalidConfig(format!(
                    "{} must be a positive distance (got {})",
                    name, value
                )));
            }
        }

        if self.combat_distance > self.danger_radius {
            return Err(BotError::InvalidConfig(format!(
                "combat_distance ({}) should be <= danger_radius ({})",
                self.combat_distance, self.danger_radius
            )));
        }

        if !(self.attack_cooldown_threshold > 0.0 && self.attack_cooldown_threshold <= 1.0) {
            return Err(BotError::InvalidConfig(format!(
                "attack_cooldown_threshold must be in (0, 1] (got {})",
                self.attack_cooldown_threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.aim_height_fraction) {
            return Err(BotError::InvalidConfig(format!(
                "aim_height_fraction must be in [0, 1] (got {})",
                self.aim_height_fraction
            )));
        }

        if self.tree_reach_radius <= 0 || self.tree_vertical_radius < 0 {
            return Err(BotError::InvalidConfig(
                "tree scan radii must be non-negative and the horizontal radius positive".into(),
            ));
        }

        if self.tree_reach_radius > MAX_SCAN_RADIUS || self.tree_vertical_radius > MAX_SCAN_RADIUS {
            return Err(BotError::InvalidConfig(format!(
                "tree scan radii must be <= {} (got {} x {})",
                MAX_SCAN_RADIUS, self.tree_reach_radius, self.tree_vertical_radius
            )));
        }

        if self.bobber_disturbance_margin < 0.0 {
            return Err(BotError::InvalidConfig(
                "bobber_disturbance_margin must not be negative".into(),
            ));
        }

        Ok(())
    }
}
