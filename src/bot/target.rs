//! Single-slot cache for the tree block being harvested

use crate::core::types::Tick;
use crate::spatial::BlockPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeTarget {
    pub pos: BlockPos,
}

/// At most one outstanding target plus the tick of the last scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetCache {
    target: Option<TreeTarget>,
    last_scan: Option<Tick>,
}

impl TargetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<BlockPos> {
        self.target.map(|t| t.pos)
    }

    pub fn last_scan(&self) -> Option<Tick> {
        self.last_scan
    }

    /// Ticks since the last scan; never-scanned counts as infinitely old
    pub fn age(&self, now: Tick) -> Tick {
        match self.last_scan {
            Some(scanned) => now.saturating_sub(scanned),
            None => Tick::MAX,
        }
    }

    pub fn is_stale(&self, now: Tick, rescan_ticks: Tick) -> bool {
        self.age(now) >= rescan_ticks
    }

    /// Store a scan result, found or not, stamped with the scan tick
    pub fn record_scan(&mut self, found: Option<BlockPos>, now: Tick) {
        self.target = found.map(|pos| TreeTarget { pos });
        self.last_scan = Some(now);
    }

    /// Drop the target; the scan stamp is kept
    pub fn clear(&mut self) {
        self.target = None;
    }
}
