//! Fishing: cast, recast stuck or expired lines, reel in on a bite

use crate::core::config::BotConfig;
use crate::core::types::{Hand, Tick};
use crate::host::{Actuator, BobberView, PlayerView, WorldQuery};

/// What the fishing behavior did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishOutcome {
    NoRod,
    /// Nothing to do: line is out and quiet, or the cast debounce is running
    Waiting,
    Cast(Hand),
    /// Line expired or got stuck; reeled to cast again
    Recast(Hand),
    /// Something touched the bobber
    Reeled(Hand),
}

fn elapsed(last_cast: Option<Tick>, now: Tick) -> Tick {
    last_cast.map_or(Tick::MAX, |cast| now.saturating_sub(cast))
}

/// Another entity (not the player, not the bobber) touching the bobber's box
///
/// The bobber is itself an entity inside its own box, so it has to be
/// filtered out or every line would read as a bite.
pub fn bobber_disturbed<H: WorldQuery>(
    host: &H,
    player: &PlayerView,
    bobber: &BobberView,
    config: &BotConfig,
) -> bool {
    let zone = bobber.bounding_box.expand(config.bobber_disturbance_margin);
    let (player_id, bobber_id) = (player.id, bobber.id);
    !host
        .entities_in(&zone, &|e| e.id != player_id && e.id != bobber_id)
        .is_empty()
}

pub fn run<H>(
    host: &mut H,
    player: &PlayerView,
    config: &BotConfig,
    last_cast: &mut Option<Tick>,
    now: Tick,
) -> FishOutcome
where
    H: WorldQuery + Actuator,
{
    let Some(hand) = player.fishing_rod_hand() else {
        return FishOutcome::NoRod;
    };

    let since_cast = elapsed(*last_cast, now);
    let outcome = match &player.fishing_bobber {
        None if since_cast >= config.fish_cast_debounce_ticks => FishOutcome::Cast(hand),
        None => FishOutcome::Waiting,
        Some(bobber) if since_cast >= config.fish_recast_timeout_ticks || bobber.is_stuck() => {
            FishOutcome::Recast(hand)
        }
        Some(bobber) if bobber_disturbed(host, player, bobber, config) => FishOutcome::Reeled(hand),
        Some(_) => FishOutcome::Waiting,
    };

    if outcome != FishOutcome::Waiting {
        host.interact_item(hand);
        host.swing_hand(hand);
        *last_cast = Some(now);
        tracing::debug!("Fishing at tick {}: {:?}", now, outcome);
    }
    outcome
}
