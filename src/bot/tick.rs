//! Tick system - the per-tick decision loop
//!
//! Each call to [`TreeBot::tick`] does:
//! release inputs -> danger check -> combat, or dispatch on the selected mode
//!
//! The bot owns all of its state; the host is borrowed only for the tick.

use crate::bot::combat::{self, CombatOutcome};
use crate::bot::fishing::{self, FishOutcome};
use crate::bot::mode::{Mode, ModeState};
use crate::bot::target::TargetCache;
use crate::bot::tree::{self, TreeOutcome};
use crate::core::config::BotConfig;
use crate::core::types::Tick;
use crate::host::{Actuator, MovementKey, WorldQuery};
use crate::spatial::{BlockPos, OutwardScan};

/// Result of one decision-loop invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No player or world this tick; nothing was touched
    NoContext,
    Combat(CombatOutcome),
    Tree(TreeOutcome),
    Fish(FishOutcome),
    Idle,
}

/// The automation loop and everything it remembers between ticks
#[derive(Debug, Clone)]
pub struct TreeBot {
    config: BotConfig,
    scan: OutwardScan,
    modes: ModeState,
    tree_target: TargetCache,
    tick: Tick,
    last_cast: Option<Tick>,
}

impl TreeBot {
    pub fn new(config: BotConfig) -> Self {
        let scan = OutwardScan::new(
            config.tree_reach_radius,
            config.tree_vertical_radius,
            config.tree_reach_radius,
        );
        Self {
            config,
            scan,
            modes: ModeState::new(),
            tree_target: TargetCache::new(),
            tick: 0,
            last_cast: None,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn modes(&self) -> &ModeState {
        &self.modes
    }

    pub fn modes_mut(&mut self) -> &mut ModeState {
        &mut self.modes
    }

    pub fn selected_mode(&self) -> Mode {
        self.modes.selected()
    }

    pub fn runtime_mode(&self) -> Mode {
        self.modes.runtime()
    }

    pub fn tree_target(&self) -> Option<BlockPos> {
        self.tree_target.get()
    }

    pub fn target_cache(&self) -> &TargetCache {
        &self.tree_target
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn last_cast_tick(&self) -> Option<Tick> {
        self.last_cast
    }

    /// Run the decision loop once; call exactly once per client tick
    pub fn tick<H>(&mut self, host: &mut H) -> TickOutcome
    where
        H: WorldQuery + Actuator,
    {
        self.tick += 1;
        let now = self.tick;

        let Some(player) = host.player() else {
            return TickOutcome::NoContext;
        };

        release_movement_keys(host);

        if combat::danger_nearby(host, &player, &self.config) {
            self.enter_runtime(Mode::Combat);
            // Combat overrides tree farming; drop the log and stop chopping it
            if self.tree_target.get().is_some() {
                self.tree_target.clear();
                host.cancel_block_breaking();
            }
            return TickOutcome::Combat(combat::run(host, &player, &self.config));
        }

        self.enter_runtime(self.modes.selected());
        match self.modes.runtime() {
            Mode::Tree => TickOutcome::Tree(tree::run(
                host,
                &player,
                &self.config,
                &self.scan,
                &mut self.tree_target,
                now,
            )),
            Mode::Fish => TickOutcome::Fish(fishing::run(
                host,
                &player,
                &self.config,
                &mut self.last_cast,
                now,
            )),
            Mode::Idle | Mode::Combat => {
                self.tree_target.clear();
                host.cancel_block_breaking();
                TickOutcome::Idle
            }
        }
    }

    fn enter_runtime(&mut self, mode: Mode) {
        let previous = self.modes.set_runtime(mode);
        if previous != mode {
            tracing::debug!("Runtime mode {} -> {} at tick {}", previous, mode, self.tick);
        }
    }
}

impl Default for TreeBot {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}

/// Drop every held movement input so behaviors re-assert only what they need
fn release_movement_keys<A: Actuator>(host: &mut A) {
    for key in MovementKey::ALL {
        host.set_key(key, false);
    }
}
