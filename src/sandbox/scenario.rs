//! Prebuilt sandbox worlds for the REPL and scenario tests

use clap::ValueEnum;
use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::SandboxWorld;
use crate::core::types::ItemKind;
use crate::spatial::BlockPos;

/// Mixed into the seed so layout and bite rolls draw from different streams
const LAYOUT_SALT: u64 = 0x7472_6565;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Grass field with a few trees around the player
    Forest,
    /// Shore next to a pond, rod in hand
    Pond,
    /// Forest with zombies closing in
    Ambush,
}

impl Scenario {
    pub fn build(self, seed: u64) -> SandboxWorld {
        match self {
            Scenario::Forest => forest(seed),
            Scenario::Pond => pond(seed),
            Scenario::Ambush => ambush(seed),
        }
    }
}

/// Vertical trunk of `height` logs with a leaf cap
pub fn plant_tree(world: &mut SandboxWorld, base: BlockPos, height: i32, log: &str) {
    for dy in 0..height {
        world.set_block(base.offset(0, dy, 0), log);
    }
    let top = base.offset(0, height, 0);
    for (dx, dz) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
        world.set_block(top.offset(dx, 0, dz), "oak_leaves");
    }
}

pub fn forest(seed: u64) -> SandboxWorld {
    let mut world = SandboxWorld::new(seed);
    world.fill_floor(-1, 24, "grass_block");
    world.player_state_mut().main_hand = ItemKind::Axe;

    let logs = ["oak_log", "birch_log", "spruce_log"];
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ LAYOUT_SALT);
    for _ in 0..6 {
        let x = rng.gen_range(-12..=12);
        let z = rng.gen_range(-12..=12);
        // Keep the player's own column clear
        if x == 0 && z == 0 {
            continue;
        }
        let height = rng.gen_range(3..=6);
        let log = logs[rng.gen_range(0..logs.len())];
        plant_tree(&mut world, BlockPos::new(x, 0, z), height, log);
    }
    world
}

pub fn pond(seed: u64) -> SandboxWorld {
    let mut world = SandboxWorld::new(seed);
    world.fill_floor(-1, 16, "dirt");
    for x in -6..=6 {
        for z in 2..=12 {
            world.set_block(BlockPos::new(x, -1, z), "water");
        }
    }
    world.player_state_mut().main_hand = ItemKind::FishingRod;
    world
}

pub fn ambush(seed: u64) -> SandboxWorld {
    let mut world = forest(seed);
    world.player_state_mut().main_hand = ItemKind::Sword;
    world.spawn_hostile(DVec3::new(7.0, 0.0, 3.0));
    world.spawn_hostile(DVec3::new(-5.0, 0.0, -8.0));
    world
}
