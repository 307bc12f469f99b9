//! Host engine ports
//!
//! The bot never talks to a game engine directly. Everything it reads goes
//! through [`WorldQuery`] and everything it does goes through [`Actuator`];
//! a host adapter implements both and is handed to the decision loop each tick.

pub mod view;

pub use view::{BobberView, EntityKind, EntitySnapshot, PlayerView};

use serde::{Deserialize, Serialize};

use crate::core::types::{Direction, EntityId, Hand};
use crate::spatial::{Aabb, BlockPos};

/// Registry id of a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
}

/// Block state at a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockState {
    pub id: BlockId,
}

impl BlockState {
    pub const AIR: BlockState = BlockState { id: BlockId::AIR };

    pub fn new(id: BlockId) -> Self {
        Self { id }
    }

    pub fn is_air(&self) -> bool {
        self.id == BlockId::AIR
    }
}

/// Block categories defined by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockTag {
    /// Tree trunks
    Logs,
    Leaves,
}

/// Held movement inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKey {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Sneak,
}

impl MovementKey {
    pub const ALL: [MovementKey; 6] = [
        MovementKey::Forward,
        MovementKey::Back,
        MovementKey::Left,
        MovementKey::Right,
        MovementKey::Jump,
        MovementKey::Sneak,
    ];
}

/// Orientation in degrees; yaw applies to view, head and body alike
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Facing {
    pub yaw: f32,
    pub pitch: f32,
}

/// Read access to the host world
pub trait WorldQuery {
    /// The local player, or `None` when no player/world context exists
    fn player(&self) -> Option<PlayerView>;

    /// Entities whose bounding box intersects `volume` and that pass `filter`
    fn entities_in(
        &self,
        volume: &Aabb,
        filter: &dyn Fn(&EntitySnapshot) -> bool,
    ) -> Vec<EntitySnapshot>;

    fn block_state(&self, pos: BlockPos) -> BlockState;

    fn block_in_tag(&self, state: &BlockState, tag: BlockTag) -> bool;

    /// Entity currently under the crosshair, if any
    fn crosshair_entity(&self) -> Option<EntitySnapshot>;
}

/// Input injection into the host simulation
pub trait Actuator {
    fn set_key(&mut self, key: MovementKey, pressed: bool);

    fn set_facing(&mut self, facing: Facing);

    fn set_sprinting(&mut self, sprinting: bool);

    /// Melee attack against an entity
    fn attack(&mut self, target: EntityId);

    /// Use the item in `hand` (casts or reels a fishing rod)
    fn interact_item(&mut self, hand: Hand);

    /// Continue breaking the block at `pos`; progress accumulates host-side
    fn update_block_breaking(&mut self, pos: BlockPos, face: Direction);

    fn cancel_block_breaking(&mut self);

    fn swing_hand(&mut self, hand: Hand);
}
