//! Sandbox host - an in-memory world implementing both host ports
//!
//! Used by the REPL binary and by tests. Every actuator call is applied to the
//! sandbox state and also recorded, so tests can assert on exactly what the
//! bot asked for.
//!
//! Physics are intentionally tiny: the player walks along its yaw while
//! forward is held, hostiles shuffle toward the player, blocks break after a
//! fixed number of ticks of progress, and a cast bobber gets bites from a
//! seeded RNG.

pub mod blocks;
pub mod scenario;

pub use blocks::BlockRegistry;

use ahash::AHashMap;
use glam::DVec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::{Direction, EntityId, Hand, ItemKind, Tick};
use crate::host::{
    Actuator, BlockState, BlockTag, BobberView, EntityKind, EntitySnapshot, Facing, MovementKey,
    PlayerView, WorldQuery,
};
use crate::spatial::{Aabb, BlockPos};

pub const PLAYER_WIDTH: f64 = 0.6;
pub const PLAYER_HEIGHT: f64 = 1.8;
pub const EYE_HEIGHT: f64 = 1.62;
pub const BOBBER_SIZE: f64 = 0.25;

/// Blocks per tick while walking
const WALK_SPEED: f64 = 0.2;
const SPRINT_MULTIPLIER: f64 = 1.3;
const MOB_SPEED: f64 = 0.1;
/// Attack charge regained per tick (full charge in ~13 ticks)
const ATTACK_RECHARGE: f32 = 0.08;
const MELEE_DAMAGE: f32 = 7.0;
/// Ticks of continuous breaking needed to remove a block
pub const BREAK_TICKS: u32 = 20;
const CAST_DISTANCE: f64 = 4.0;
const BITE_CHANCE: f64 = 0.03;
const FISH_LIFETIME: u32 = 20;

/// One recorded actuator call
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRecord {
    Key { key: MovementKey, pressed: bool },
    Facing(Facing),
    Sprint(bool),
    Attack(EntityId),
    Interact(Hand),
    Break { pos: BlockPos, face: Direction },
    CancelBreak,
    Swing(Hand),
}

/// A non-player entity
#[derive(Debug, Clone)]
pub struct Mob {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: DVec3,
    pub width: f64,
    pub height: f64,
    pub health: f32,
    pub ally: bool,
    pub can_target_player: bool,
    /// Walks toward the player every tick
    pub chases_player: bool,
    /// Despawns when this reaches zero
    pub lifetime: Option<u32>,
}

impl Mob {
    /// Zombie-sized hostile that chases the player
    pub fn hostile(id: EntityId, position: DVec3) -> Self {
        Self {
            id,
            kind: EntityKind::Hostile,
            position,
            width: 0.6,
            height: 1.95,
            health: 20.0,
            ally: false,
            can_target_player: true,
            chases_player: true,
            lifetime: None,
        }
    }

    pub fn passive(id: EntityId, position: DVec3) -> Self {
        Self {
            id,
            kind: EntityKind::Passive,
            position,
            width: 0.9,
            height: 1.4,
            health: 10.0,
            ally: false,
            can_target_player: false,
            chases_player: false,
            lifetime: None,
        }
    }

    pub fn alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_feet(self.position, self.width, self.height)
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            bounding_box: self.bounding_box(),
            height: self.height,
            alive: self.alive(),
            ally: self.ally,
            can_target_player: self.can_target_player,
        }
    }
}

/// The player's fishing bobber
#[derive(Debug, Clone)]
pub struct Bobber {
    pub id: EntityId,
    pub position: DVec3,
    pub age: u32,
    pub on_ground: bool,
    pub horizontal_collision: bool,
    pub vertical_collision: bool,
    /// Fish currently nibbling
    pub hooked: Option<EntityId>,
}

impl Bobber {
    pub fn new(id: EntityId, position: DVec3) -> Self {
        Self {
            id,
            position,
            age: 0,
            on_ground: false,
            horizontal_collision: false,
            vertical_collision: false,
            hooked: None,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_feet(self.position, BOBBER_SIZE, BOBBER_SIZE)
    }

    fn view(&self) -> BobberView {
        BobberView {
            id: self.id,
            bounding_box: self.bounding_box(),
            on_ground: self.on_ground,
            horizontal_collision: self.horizontal_collision,
            vertical_collision: self.vertical_collision,
        }
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: EntityKind::Bobber,
            position: self.position,
            bounding_box: self.bounding_box(),
            height: BOBBER_SIZE,
            alive: true,
            ally: false,
            can_target_player: false,
        }
    }
}

/// The local player
#[derive(Debug, Clone)]
pub struct SandboxPlayer {
    pub id: EntityId,
    pub position: DVec3,
    pub facing: Facing,
    pub head_yaw: f32,
    pub body_yaw: f32,
    pub sprinting: bool,
    pub attack_cooldown: f32,
    pub main_hand: ItemKind,
    pub off_hand: ItemKind,
    pub bobber: Option<Bobber>,
    keys: AHashMap<MovementKey, bool>,
}

impl SandboxPlayer {
    fn new(id: EntityId, position: DVec3) -> Self {
        Self {
            id,
            position,
            facing: Facing::default(),
            head_yaw: 0.0,
            body_yaw: 0.0,
            sprinting: false,
            attack_cooldown: 1.0,
            main_hand: ItemKind::Empty,
            off_hand: ItemKind::Empty,
            bobber: None,
            keys: AHashMap::new(),
        }
    }

    pub fn is_pressed(&self, key: MovementKey) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_feet(self.position, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn eye_position(&self) -> DVec3 {
        self.position + DVec3::Y * EYE_HEIGHT
    }

    /// Unit vector along the current yaw
    pub fn look_direction(&self) -> DVec3 {
        let yaw = (self.facing.yaw as f64).to_radians();
        DVec3::new(-yaw.sin(), 0.0, yaw.cos())
    }

    fn holds_rod(&self, hand: Hand) -> bool {
        match hand {
            Hand::MainHand => self.main_hand.is_fishing_rod(),
            Hand::OffHand => self.off_hand.is_fishing_rod(),
        }
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: EntityKind::Player,
            position: self.position,
            bounding_box: self.bounding_box(),
            height: PLAYER_HEIGHT,
            alive: true,
            ally: true,
            can_target_player: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct BreakProgress {
    pos: Option<BlockPos>,
    ticks: u32,
    /// Set by the actuator, consumed by `step`
    requested: Option<BlockPos>,
}

/// Counters for what happened in the sandbox
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SandboxStats {
    pub blocks_broken: u32,
    pub mobs_killed: u32,
    pub fish_caught: u32,
}

/// In-memory world driven one tick at a time
#[derive(Debug, Clone)]
pub struct SandboxWorld {
    pub current_tick: Tick,
    registry: BlockRegistry,
    blocks: AHashMap<BlockPos, BlockState>,
    player: SandboxPlayer,
    /// `false` simulates a client with no player/world loaded
    context_loaded: bool,
    mobs: Vec<Mob>,
    crosshair: Option<EntityId>,
    breaking: BreakProgress,
    actions: Vec<ActionRecord>,
    stats: SandboxStats,
    next_id: u32,
    rng: ChaCha8Rng,
}

impl SandboxWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            current_tick: 0,
            registry: BlockRegistry::with_defaults(),
            blocks: AHashMap::new(),
            player: SandboxPlayer::new(EntityId(1), DVec3::ZERO),
            context_loaded: true,
            mobs: Vec::new(),
            crosshair: None,
            breaking: BreakProgress::default(),
            actions: Vec::new(),
            stats: SandboxStats::default(),
            next_id: 2,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // === SETUP ===

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Place a named block; unknown names are ignored and return false
    pub fn set_block(&mut self, pos: BlockPos, name: &str) -> bool {
        let Some(state) = self.registry.state(name) else {
            return false;
        };
        if state.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, state);
        }
        true
    }

    pub fn remove_block(&mut self, pos: BlockPos) {
        self.blocks.remove(&pos);
    }

    /// Flat square of `name` blocks with their top face at `y + 1`
    pub fn fill_floor(&mut self, y: i32, half_extent: i32, name: &str) {
        for x in -half_extent..=half_extent {
            for z in -half_extent..=half_extent {
                self.set_block(BlockPos::new(x, y, z), name);
            }
        }
    }

    pub fn block_name(&self, pos: BlockPos) -> &'static str {
        let state = self.block_state(pos);
        self.registry.name(state.id).unwrap_or("unknown")
    }

    pub fn spawn_mob(&mut self, mut mob: Mob) -> EntityId {
        let id = self.allocate_id();
        mob.id = id;
        self.mobs.push(mob);
        id
    }

    pub fn spawn_hostile(&mut self, position: DVec3) -> EntityId {
        self.spawn_mob(Mob::hostile(EntityId(0), position))
    }

    pub fn spawn_passive(&mut self, position: DVec3) -> EntityId {
        self.spawn_mob(Mob::passive(EntityId(0), position))
    }

    pub fn mob(&self, id: EntityId) -> Option<&Mob> {
        self.mobs.iter().find(|m| m.id == id)
    }

    pub fn mob_mut(&mut self, id: EntityId) -> Option<&mut Mob> {
        self.mobs.iter_mut().find(|m| m.id == id)
    }

    pub fn mobs(&self) -> &[Mob] {
        &self.mobs
    }

    pub fn player_state(&self) -> &SandboxPlayer {
        &self.player
    }

    pub fn player_state_mut(&mut self) -> &mut SandboxPlayer {
        &mut self.player
    }

    /// Put a bobber at `position` as if a cast had landed there
    pub fn place_bobber(&mut self, position: DVec3) -> EntityId {
        let id = self.allocate_id();
        self.player.bobber = Some(Bobber::new(id, position));
        id
    }

    pub fn bobber_mut(&mut self) -> Option<&mut Bobber> {
        self.player.bobber.as_mut()
    }

    pub fn set_context_loaded(&mut self, loaded: bool) {
        self.context_loaded = loaded;
    }

    pub fn set_crosshair(&mut self, entity: Option<EntityId>) {
        self.crosshair = entity;
    }

    // === INSPECTION ===

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn take_actions(&mut self) -> Vec<ActionRecord> {
        std::mem::take(&mut self.actions)
    }

    pub fn stats(&self) -> SandboxStats {
        self.stats
    }

    pub fn break_progress(&self) -> Option<(BlockPos, u32)> {
        self.breaking.pos.map(|pos| (pos, self.breaking.ticks))
    }

    // === SIMULATION ===

    /// Advance the sandbox by one tick
    pub fn step(&mut self) {
        self.current_tick += 1;

        self.player.attack_cooldown = (self.player.attack_cooldown + ATTACK_RECHARGE).min(1.0);
        self.move_player();
        self.move_mobs();
        self.advance_breaking();
        self.advance_fishing();

        let before = self.mobs.len();
        self.mobs.retain(|m| m.alive() && m.lifetime != Some(0));
        if self.mobs.len() != before {
            tracing::trace!("Removed {} entities", before - self.mobs.len());
        }
    }

    fn move_player(&mut self) {
        if !self.player.is_pressed(MovementKey::Forward) {
            return;
        }
        let speed = if self.player.sprinting {
            WALK_SPEED * SPRINT_MULTIPLIER
        } else {
            WALK_SPEED
        };
        let step = self.player.look_direction() * speed;
        self.player.position += step;
    }

    fn move_mobs(&mut self) {
        let target = self.player.position;
        for mob in self.mobs.iter_mut().filter(|m| m.chases_player && m.alive()) {
            let mut delta = target - mob.position;
            delta.y = 0.0;
            if delta.length() > 1.0 {
                mob.position += delta.normalize() * MOB_SPEED;
            }
        }
        for mob in self.mobs.iter_mut() {
            if let Some(left) = mob.lifetime.as_mut() {
                *left = left.saturating_sub(1);
            }
        }
    }

    fn advance_breaking(&mut self) {
        let Some(requested) = self.breaking.requested.take() else {
            return;
        };
        if self.breaking.pos == Some(requested) {
            self.breaking.ticks += 1;
        } else {
            self.breaking.pos = Some(requested);
            self.breaking.ticks = 1;
        }

        if self.breaking.ticks >= BREAK_TICKS {
            self.blocks.remove(&requested);
            self.breaking = BreakProgress::default();
            self.stats.blocks_broken += 1;
            tracing::debug!("Sandbox broke block at {}", requested);
        }
    }

    fn advance_fishing(&mut self) {
        let Some(bobber) = self.player.bobber.as_mut() else {
            return;
        };
        bobber.age += 1;

        // The nibbling fish swam off
        if let Some(fish) = bobber.hooked {
            if !self.mobs.iter().any(|m| m.id == fish && m.lifetime != Some(0)) {
                bobber.hooked = None;
            }
        }

        if bobber.on_ground || bobber.hooked.is_some() || !self.rng.gen_bool(BITE_CHANCE) {
            return;
        }

        let position = bobber.position + DVec3::new(0.0, -0.2, 0.0);
        let id = EntityId(self.next_id);
        self.next_id += 1;
        bobber.hooked = Some(id);
        self.mobs.push(Mob {
            id,
            kind: EntityKind::Passive,
            position,
            width: 0.5,
            height: 0.3,
            health: 3.0,
            ally: false,
            can_target_player: false,
            chases_player: false,
            lifetime: Some(FISH_LIFETIME),
        });
        tracing::debug!("Sandbox fish {} bit at tick {}", id, self.current_tick);
    }

    /// Where a cast from the current facing lands, and whether it hit dry ground
    fn cast_landing(&self) -> (DVec3, bool) {
        let eye = self.player.eye_position();
        let ahead = eye + self.player.look_direction() * CAST_DISTANCE;
        let column = BlockPos::containing(ahead);
        let water = self.registry.id("water");

        for depth in 0..16 {
            let pos = column.offset(0, -depth, 0);
            let state = self.block_state(pos);
            if state.is_air() {
                continue;
            }
            let landing = DVec3::new(ahead.x, pos.y as f64 + 1.0, ahead.z);
            let on_ground = Some(state.id) != water;
            return (landing, on_ground);
        }
        (DVec3::new(ahead.x, eye.y - 16.0, ahead.z), false)
    }

    fn use_rod(&mut self, hand: Hand) {
        if !self.player.holds_rod(hand) {
            return;
        }
        if let Some(bobber) = self.player.bobber.take() {
            if let Some(fish) = bobber.hooked {
                if let Some(mob) = self.mobs.iter_mut().find(|m| m.id == fish) {
                    mob.lifetime = Some(0);
                    self.stats.fish_caught += 1;
                }
            }
            return;
        }
        let (landing, on_ground) = self.cast_landing();
        let id = self.allocate_id();
        let mut bobber = Bobber::new(id, landing);
        bobber.on_ground = on_ground;
        self.player.bobber = Some(bobber);
    }

    fn melee(&mut self, target: EntityId) {
        let charge = self.player.attack_cooldown;
        self.player.attack_cooldown = 0.0;
        let Some(mob) = self.mobs.iter_mut().find(|m| m.id == target) else {
            return;
        };
        let was_alive = mob.alive();
        mob.health -= MELEE_DAMAGE * charge.max(0.2);
        if was_alive && !mob.alive() {
            self.stats.mobs_killed += 1;
        }
    }
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new(0)
    }
}

impl WorldQuery for SandboxWorld {
    fn player(&self) -> Option<PlayerView> {
        if !self.context_loaded {
            return None;
        }
        let p = &self.player;
        Some(PlayerView {
            id: p.id,
            position: p.position,
            eye_position: p.eye_position(),
            bounding_box: p.bounding_box(),
            attack_cooldown: p.attack_cooldown,
            main_hand: p.main_hand,
            off_hand: p.off_hand,
            fishing_bobber: p.bobber.as_ref().map(Bobber::view),
        })
    }

    fn entities_in(
        &self,
        volume: &Aabb,
        filter: &dyn Fn(&EntitySnapshot) -> bool,
    ) -> Vec<EntitySnapshot> {
        let player = std::iter::once(self.player.snapshot());
        let bobber = self.player.bobber.iter().map(Bobber::snapshot);
        let mobs = self.mobs.iter().map(Mob::snapshot);

        player
            .chain(bobber)
            .chain(mobs)
            .filter(|e| e.bounding_box.intersects(volume) && filter(e))
            .collect()
    }

    fn block_state(&self, pos: BlockPos) -> BlockState {
        self.blocks.get(&pos).copied().unwrap_or(BlockState::AIR)
    }

    fn block_in_tag(&self, state: &BlockState, tag: BlockTag) -> bool {
        self.registry.has_tag(state.id, tag)
    }

    fn crosshair_entity(&self) -> Option<EntitySnapshot> {
        let id = self.crosshair?;
        self.mobs.iter().find(|m| m.id == id).map(Mob::snapshot)
    }
}

impl Actuator for SandboxWorld {
    fn set_key(&mut self, key: MovementKey, pressed: bool) {
        self.player.keys.insert(key, pressed);
        self.actions.push(ActionRecord::Key { key, pressed });
    }

    fn set_facing(&mut self, facing: Facing) {
        self.player.facing = facing;
        self.player.head_yaw = facing.yaw;
        self.player.body_yaw = facing.yaw;
        self.actions.push(ActionRecord::Facing(facing));
    }

    fn set_sprinting(&mut self, sprinting: bool) {
        self.player.sprinting = sprinting;
        self.actions.push(ActionRecord::Sprint(sprinting));
    }

    fn attack(&mut self, target: EntityId) {
        self.melee(target);
        self.actions.push(ActionRecord::Attack(target));
    }

    fn interact_item(&mut self, hand: Hand) {
        self.use_rod(hand);
        self.actions.push(ActionRecord::Interact(hand));
    }

    fn update_block_breaking(&mut self, pos: BlockPos, face: Direction) {
        self.breaking.requested = Some(pos);
        self.actions.push(ActionRecord::Break { pos, face });
    }

    fn cancel_block_breaking(&mut self) {
        self.breaking = BreakProgress::default();
        self.actions.push(ActionRecord::CancelBreak);
    }

    fn swing_hand(&mut self, hand: Hand) {
        self.actions.push(ActionRecord::Swing(hand));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_walks_along_yaw() {
        let mut world = SandboxWorld::new(1);
        world.set_facing(Facing { yaw: 90.0, pitch: 0.0 });
        world.set_key(MovementKey::Forward, true);
        world.step();
        let pos = world.player_state().position;
        assert!((pos.x + WALK_SPEED).abs() < 1e-9);
        assert!(pos.z.abs() < 1e-9);
    }

    #[test]
    fn test_block_breaks_after_break_ticks() {
        let mut world = SandboxWorld::new(1);
        let log = BlockPos::new(1, 0, 0);
        world.set_block(log, "oak_log");
        for _ in 0..BREAK_TICKS {
            assert_eq!(world.block_name(log), "oak_log");
            world.update_block_breaking(log, Direction::Up);
            world.step();
        }
        assert_eq!(world.block_name(log), "air");
        assert_eq!(world.stats().blocks_broken, 1);
    }

    #[test]
    fn test_cancel_resets_progress() {
        let mut world = SandboxWorld::new(1);
        let log = BlockPos::new(1, 0, 0);
        world.set_block(log, "oak_log");
        world.update_block_breaking(log, Direction::Up);
        world.step();
        assert_eq!(world.break_progress(), Some((log, 1)));
        world.cancel_block_breaking();
        assert_eq!(world.break_progress(), None);
    }

    #[test]
    fn test_cast_onto_water_floats_and_reel_removes() {
        let mut world = SandboxWorld::new(1);
        world.fill_floor(-1, 8, "water");
        world.player_state_mut().main_hand = ItemKind::FishingRod;

        world.interact_item(Hand::MainHand);
        let bobber = world.player_state().bobber.clone().unwrap();
        assert!(!bobber.on_ground);

        world.interact_item(Hand::MainHand);
        assert!(world.player_state().bobber.is_none());
    }

    #[test]
    fn test_cast_onto_dirt_is_grounded() {
        let mut world = SandboxWorld::new(1);
        world.fill_floor(-1, 8, "dirt");
        world.player_state_mut().off_hand = ItemKind::FishingRod;
        world.interact_item(Hand::OffHand);
        assert!(world.player_state().bobber.as_ref().unwrap().on_ground);
    }

    #[test]
    fn test_without_rod_interact_does_nothing() {
        let mut world = SandboxWorld::new(1);
        world.interact_item(Hand::MainHand);
        assert!(world.player_state().bobber.is_none());
        assert_eq!(world.actions(), &[ActionRecord::Interact(Hand::MainHand)]);
    }

    #[test]
    fn test_entities_in_includes_player_and_filters() {
        let mut world = SandboxWorld::new(1);
        let zombie = world.spawn_hostile(DVec3::new(3.0, 0.0, 0.0));
        world.spawn_hostile(DVec3::new(40.0, 0.0, 0.0));

        let area = world.player_state().bounding_box().expand(5.0);
        let all = world.entities_in(&area, &|_| true);
        assert_eq!(all.len(), 2);

        let hostiles = world.entities_in(&area, &|e| e.is_hostile());
        assert_eq!(hostiles.len(), 1);
        assert_eq!(hostiles[0].id, zombie);
    }

    #[test]
    fn test_no_context_hides_player() {
        let mut world = SandboxWorld::new(1);
        world.set_context_loaded(false);
        assert!(WorldQuery::player(&world).is_none());
    }

    #[test]
    fn test_full_charge_melee_kills_in_three_hits() {
        let mut world = SandboxWorld::new(1);
        let zombie = world.spawn_hostile(DVec3::new(1.5, 0.0, 0.0));
        world.mob_mut(zombie).unwrap().chases_player = false;
        for _ in 0..3 {
            world.player_state_mut().attack_cooldown = 1.0;
            world.attack(zombie);
        }
        assert!(!world.mob(zombie).unwrap().alive());
        world.step();
        assert!(world.mob(zombie).is_none());
        assert_eq!(world.stats().mobs_killed, 1);
    }
}
