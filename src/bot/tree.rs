//! Tree farming: find the nearest log, walk up to it and chop

use crate::bot::facing::look_at;
use crate::bot::target::TargetCache;
use crate::core::config::BotConfig;
use crate::core::types::{Direction, Hand, Tick};
use crate::host::{Actuator, BlockTag, MovementKey, PlayerView, WorldQuery};
use crate::spatial::{BlockPos, OutwardScan};

/// What the tree behavior did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOutcome {
    /// Scan came back empty
    NoLog,
    Approaching(BlockPos),
    Breaking(BlockPos),
    /// Target vanished between the rescan check and the break
    Lost(BlockPos),
}

/// A loggable block that is still standing
pub fn is_loggable<H: WorldQuery>(host: &H, pos: BlockPos) -> bool {
    let state = host.block_state(pos);
    host.block_in_tag(&state, BlockTag::Logs) && !state.is_air()
}

/// Nearest log to `center` by squared distance; first in scan order wins ties
pub fn find_closest_log<H: WorldQuery>(
    host: &H,
    scan: &OutwardScan,
    center: BlockPos,
) -> Option<BlockPos> {
    let mut best: Option<(i64, BlockPos)> = None;
    for pos in scan.around(center) {
        if !is_loggable(host, pos) {
            continue;
        }
        let distance = pos.squared_distance(center);
        if best.map_or(true, |(best_distance, _)| distance < best_distance) {
            best = Some((distance, pos));
        }
    }
    best.map(|(_, pos)| pos)
}

pub fn run<H>(
    host: &mut H,
    player: &PlayerView,
    config: &BotConfig,
    scan: &OutwardScan,
    cache: &mut TargetCache,
    now: Tick,
) -> TreeOutcome
where
    H: WorldQuery + Actuator,
{
    let needs_rescan = match cache.get() {
        None => true,
        Some(pos) => !is_loggable(host, pos) || cache.is_stale(now, config.tree_rescan_ticks),
    };

    if needs_rescan {
        let found = find_closest_log(host, scan, player.block_pos());
        tracing::debug!(
            "Tree rescan at tick {}: {}",
            now,
            found.map_or_else(|| "none".to_string(), |p| p.to_string())
        );
        cache.record_scan(found, now);
    }

    let Some(target) = cache.get() else {
        host.cancel_block_breaking();
        return TreeOutcome::NoLog;
    };

    let center = target.center();
    look_at(host, player, center, config);

    let reach = config.tree_action_distance;
    if player.distance_squared_to(center) > reach * reach {
        host.set_key(MovementKey::Forward, true);
        return TreeOutcome::Approaching(target);
    }

    host.set_key(MovementKey::Forward, false);
    if !is_loggable(host, target) {
        cache.clear();
        host.cancel_block_breaking();
        return TreeOutcome::Lost(target);
    }

    host.update_block_breaking(target, Direction::Up);
    host.swing_hand(Hand::MainHand);
    TreeOutcome::Breaking(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::{ActionRecord, SandboxWorld};
    use glam::DVec3;

    struct Fixture {
        world: SandboxWorld,
        config: BotConfig,
        scan: OutwardScan,
        cache: TargetCache,
    }

    fn fixture() -> Fixture {
        let config = BotConfig::default();
        let scan = OutwardScan::new(
            config.tree_reach_radius,
            config.tree_vertical_radius,
            config.tree_reach_radius,
        );
        Fixture {
            world: SandboxWorld::new(1),
            config,
            scan,
            cache: TargetCache::new(),
        }
    }

    impl Fixture {
        fn run(&mut self, now: Tick) -> TreeOutcome {
            let player = self.world.player().expect("player context");
            run(&mut self.world, &player, &self.config, &self.scan, &mut self.cache, now)
        }

        fn break_count(&self) -> usize {
            self.world
                .actions()
                .iter()
                .filter(|a| matches!(a, ActionRecord::Break { .. }))
                .count()
        }
    }

    #[test]
    fn test_find_closest_log_prefers_nearest() {
        let mut f = fixture();
        f.world.set_block(BlockPos::new(5, 0, 0), "oak_log");
        f.world.set_block(BlockPos::new(0, 1, 2), "birch_log");
        f.world.set_block(BlockPos::new(1, 0, 0), "oak_leaves");

        let found = find_closest_log(&f.world, &f.scan, BlockPos::new(0, 0, 0));
        assert_eq!(found, Some(BlockPos::new(0, 1, 2)));
    }

    #[test]
    fn test_find_closest_log_tie_uses_scan_order() {
        let mut f = fixture();
        f.world.set_block(BlockPos::new(3, 0, 0), "oak_log");
        f.world.set_block(BlockPos::new(-3, 0, 0), "oak_log");

        let found = find_closest_log(&f.world, &f.scan, BlockPos::new(0, 0, 0));
        assert_eq!(found, Some(BlockPos::new(-3, 0, 0)));
    }

    #[test]
    fn test_logs_outside_band_are_ignored() {
        let mut f = fixture();
        f.world.set_block(BlockPos::new(0, 5, 0), "oak_log");
        f.world.set_block(BlockPos::new(9, 0, 0), "oak_log");

        assert_eq!(find_closest_log(&f.world, &f.scan, BlockPos::default()), None);
    }

    #[test]
    fn test_no_log_cancels_breaking() {
        let mut f = fixture();
        assert_eq!(f.run(1), TreeOutcome::NoLog);
        assert_eq!(f.world.actions(), &[ActionRecord::CancelBreak]);
        assert_eq!(f.cache.last_scan(), Some(1));
    }

    #[test]
    fn test_far_log_is_approached_not_broken() {
        let mut f = fixture();
        let log = BlockPos::new(0, 0, 6);
        f.world.set_block(log, "oak_log");

        assert_eq!(f.run(1), TreeOutcome::Approaching(log));
        assert!(f.world.player_state().is_pressed(MovementKey::Forward));
        assert_eq!(f.break_count(), 0);
    }

    #[test]
    fn test_near_log_is_broken_face_up() {
        let mut f = fixture();
        let log = BlockPos::new(1, 0, 1);
        f.world.set_block(log, "spruce_log");

        assert_eq!(f.run(1), TreeOutcome::Breaking(log));
        assert!(f.world.actions().contains(&ActionRecord::Break {
            pos: log,
            face: Direction::Up
        }));
        assert!(f.world.actions().contains(&ActionRecord::Swing(Hand::MainHand)));
    }

    #[test]
    fn test_fresh_target_is_kept_until_stale() {
        let mut f = fixture();
        let far = BlockPos::new(3, 0, 0);
        f.world.set_block(far, "oak_log");
        f.run(1);
        assert_eq!(f.cache.get(), Some(far));

        // A closer log appears but the cached one is still fresh
        let near = BlockPos::new(1, 0, 0);
        f.world.set_block(near, "oak_log");
        for now in 2..11 {
            f.run(now);
            assert_eq!(f.cache.get(), Some(far), "replaced at tick {}", now);
        }

        f.run(11);
        assert_eq!(f.cache.get(), Some(near));
        assert_eq!(f.cache.last_scan(), Some(11));
    }

    #[test]
    fn test_invalid_target_triggers_rescan() {
        let mut f = fixture();
        let first = BlockPos::new(2, 0, 0);
        let second = BlockPos::new(0, 0, 3);
        f.world.set_block(first, "oak_log");
        f.world.set_block(second, "oak_log");
        f.run(1);
        assert_eq!(f.cache.get(), Some(first));

        f.world.remove_block(first);
        f.run(2);
        assert_eq!(f.cache.get(), Some(second));
        assert_eq!(f.cache.last_scan(), Some(2));
    }

    #[test]
    fn test_walks_toward_target_from_afar() {
        let mut f = fixture();
        f.world.player_state_mut().position = DVec3::new(0.5, 0.0, 0.5);
        let log = BlockPos::new(0, 0, 7);
        f.world.set_block(log, "oak_log");

        for now in 1..=40 {
            f.world.take_actions();
            f.run(now);
            f.world.step();
        }
        let distance = f.world.player_state().position.distance(log.center());
        assert!(distance <= f.config.tree_action_distance + 0.5);
    }
}
