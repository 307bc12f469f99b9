//! Self-defense: danger detection and melee against the nearest hostile

use ordered_float::OrderedFloat;

use crate::bot::facing::look_at;
use crate::core::config::BotConfig;
use crate::core::types::{EntityId, Hand};
use crate::host::{Actuator, EntitySnapshot, MovementKey, PlayerView, WorldQuery};

/// What the combat behavior did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Danger was seen but nothing passed the attack filter
    NoTarget,
    /// Walking toward the target
    Closing(EntityId),
    /// In reach, waiting for the attack to recharge
    Charging(EntityId),
    Attacked(EntityId),
}

/// Any live, non-allied hostile inside the danger box
///
/// Deliberately looser than [`nearest_attackable`]: it does not check range
/// or whether the mob can target the player.
pub fn danger_nearby<H: WorldQuery>(host: &H, player: &PlayerView, config: &BotConfig) -> bool {
    let danger_box = player.bounding_box.expand(config.danger_radius);
    !host
        .entities_in(&danger_box, &|e| e.is_hostile() && e.alive && !e.ally)
        .is_empty()
}

/// Nearest hostile that is alive, within the danger radius and able to target the player
pub fn nearest_attackable<H: WorldQuery>(
    host: &H,
    player: &PlayerView,
    config: &BotConfig,
) -> Option<EntitySnapshot> {
    let danger_box = player.bounding_box.expand(config.danger_radius);
    let origin = player.position;
    host.entities_in(&danger_box, &|e| {
        e.is_hostile()
            && e.alive
            && e.distance_to(origin) <= config.danger_radius
            && e.can_target_player
    })
    .into_iter()
    .min_by_key(|e| OrderedFloat(player.distance_to(e.position)))
}

pub fn run<H>(host: &mut H, player: &PlayerView, config: &BotConfig) -> CombatOutcome
where
    H: WorldQuery + Actuator,
{
    let Some(target) = nearest_attackable(host, player, config) else {
        return CombatOutcome::NoTarget;
    };

    let aim = target.position + glam::DVec3::Y * (target.height * config.aim_height_fraction);
    look_at(host, player, aim, config);

    if player.distance_to(target.position) > config.combat_distance {
        host.set_key(MovementKey::Forward, true);
        return CombatOutcome::Closing(target.id);
    }

    host.set_key(MovementKey::Forward, false);
    if player.attack_cooldown < config.attack_cooldown_threshold {
        return CombatOutcome::Charging(target.id);
    }

    host.attack(target.id);
    host.swing_hand(Hand::MainHand);
    tracing::debug!(
        "Attacked {} at distance {:.2}",
        target.id,
        player.distance_to(target.position)
    );
    CombatOutcome::Attacked(target.id)
}
