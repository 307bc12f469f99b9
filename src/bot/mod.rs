//! The automation bot: modes, target cache, behaviors and the decision loop

pub mod combat;
pub mod facing;
pub mod fishing;
pub mod mode;
pub mod target;
pub mod tick;
pub mod tree;

pub use combat::CombatOutcome;
pub use fishing::FishOutcome;
pub use mode::{Mode, ModeState};
pub use target::{TargetCache, TreeTarget};
pub use tick::{TickOutcome, TreeBot};
pub use tree::TreeOutcome;
