//! Read-only snapshots handed from the host to the decision loop

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Hand, ItemKind};
use crate::spatial::{Aabb, BlockPos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Hostile,
    Passive,
    Player,
    Bobber,
}

/// An entity as seen by the bot
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Feet position
    pub position: DVec3,
    pub bounding_box: Aabb,
    pub height: f64,
    pub alive: bool,
    /// On the player's team
    pub ally: bool,
    /// Whether this entity is able to target the player (mob AI view)
    pub can_target_player: bool,
}

impl EntitySnapshot {
    pub fn is_hostile(&self) -> bool {
        self.kind == EntityKind::Hostile
    }

    /// Feet-to-feet distance
    pub fn distance_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }
}

/// State of the player's fishing bobber
#[derive(Debug, Clone, PartialEq)]
pub struct BobberView {
    pub id: EntityId,
    pub bounding_box: Aabb,
    pub on_ground: bool,
    pub horizontal_collision: bool,
    pub vertical_collision: bool,
}

impl BobberView {
    /// Landed on a block or bumped into one; either way the cast is wasted
    pub fn is_stuck(&self) -> bool {
        self.on_ground || self.horizontal_collision || self.vertical_collision
    }
}

/// The local player's kinematic state for the current tick
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub id: EntityId,
    /// Feet position
    pub position: DVec3,
    pub eye_position: DVec3,
    pub bounding_box: Aabb,
    /// Attack charge in 0.0..=1.0
    pub attack_cooldown: f32,
    pub main_hand: ItemKind,
    pub off_hand: ItemKind,
    pub fishing_bobber: Option<BobberView>,
}

impl PlayerView {
    pub fn block_pos(&self) -> BlockPos {
        BlockPos::containing(self.position)
    }

    pub fn distance_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }

    pub fn distance_squared_to(&self, point: DVec3) -> f64 {
        self.position.distance_squared(point)
    }

    pub fn held(&self, hand: Hand) -> ItemKind {
        match hand {
            Hand::MainHand => self.main_hand,
            Hand::OffHand => self.off_hand,
        }
    }

    /// Hand holding a fishing rod, main hand first
    pub fn fishing_rod_hand(&self) -> Option<Hand> {
        [Hand::MainHand, Hand::OffHand]
            .into_iter()
            .find(|&hand| self.held(hand).is_fishing_rod())
    }
}
