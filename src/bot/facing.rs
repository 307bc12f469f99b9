//! Turning the player toward a point

use glam::DVec3;

use crate::core::config::BotConfig;
use crate::host::{Actuator, Facing, PlayerView, WorldQuery};

/// Yaw/pitch (degrees) that points a view at `eye` toward `target`
///
/// Yaw 0 faces +z and grows clockwise seen from above; pitch is positive
/// when looking down.
pub fn facing_toward(eye: DVec3, target: DVec3) -> Facing {
    let delta = target - eye;
    let horizontal = (delta.x * delta.x + delta.z * delta.z).sqrt();
    let yaw = delta.z.atan2(delta.x).to_degrees() - 90.0;
    let pitch = -delta.y.atan2(horizontal).to_degrees();
    Facing {
        yaw: yaw as f32,
        pitch: pitch as f32,
    }
}

/// Face `target` and stop sprinting if something is already right in front
pub fn look_at<H>(host: &mut H, player: &PlayerView, target: DVec3, config: &BotConfig)
where
    H: WorldQuery + Actuator,
{
    host.set_facing(facing_toward(player.eye_position, target));

    if let Some(entity) = host.crosshair_entity() {
        if entity.distance_to(player.position) < config.sprint_cancel_distance {
            host.set_sprinting(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::{ActionRecord, SandboxWorld};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_cardinal_yaws() {
        let eye = DVec3::ZERO;
        assert!(approx(facing_toward(eye, DVec3::new(0.0, 0.0, 1.0)).yaw, 0.0));
        assert!(approx(facing_toward(eye, DVec3::new(-1.0, 0.0, 0.0)).yaw, 90.0));
        assert!(approx(facing_toward(eye, DVec3::new(1.0, 0.0, 0.0)).yaw, -90.0));
        assert!(approx(facing_toward(eye, DVec3::new(0.0, 0.0, -1.0)).yaw, -180.0));
    }

    #[test]
    fn test_pitch_sign() {
        let eye = DVec3::ZERO;
        let down = facing_toward(eye, DVec3::new(0.0, -1.0, 1.0));
        let up = facing_toward(eye, DVec3::new(0.0, 1.0, 1.0));
        assert!(approx(down.pitch, 45.0));
        assert!(approx(up.pitch, -45.0));
    }

    fn sprint_records(world: &SandboxWorld) -> Vec<ActionRecord> {
        world
            .actions()
            .iter()
            .filter(|a| matches!(a, ActionRecord::Sprint(_)))
            .cloned()
            .collect()
    }

    fn look_with_crosshair_mob_at(x: f64) -> SandboxWorld {
        let mut world = SandboxWorld::new(1);
        world.player_state_mut().sprinting = true;
        let mob = world.spawn_passive(DVec3::new(x, 0.0, 0.0));
        world.set_crosshair(Some(mob));
        let player = world.player().expect("player context");
        look_at(&mut world, &player, DVec3::new(x, 1.0, 0.0), &BotConfig::default());
        world
    }

    #[test]
    fn test_close_crosshair_entity_stops_sprint() {
        let world = look_with_crosshair_mob_at(3.9);
        assert_eq!(sprint_records(&world), vec![ActionRecord::Sprint(false)]);
        assert!(!world.player_state().sprinting);
    }

    #[test]
    fn test_distant_crosshair_entity_keeps_sprint() {
        let world = look_with_crosshair_mob_at(4.1);
        assert!(sprint_records(&world).is_empty());
        assert!(world.player_state().sprinting);
    }

    #[test]
    fn test_no_crosshair_only_sets_facing() {
        let mut world = SandboxWorld::new(1);
        let player = world.player().expect("player context");
        look_at(&mut world, &player, DVec3::new(0.0, 0.0, 3.0), &BotConfig::default());
        assert!(matches!(world.actions(), [ActionRecord::Facing(_)]));
    }
}
