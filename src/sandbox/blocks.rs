//! Block registry for the sandbox world

use ahash::AHashMap;

use crate::host::{BlockId, BlockState, BlockTag};

/// Named block types and their tags
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    names: Vec<&'static str>,
    by_name: AHashMap<&'static str, BlockId>,
    tags: AHashMap<BlockId, Vec<BlockTag>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            names: Vec::new(),
            by_name: AHashMap::new(),
            tags: AHashMap::new(),
        };
        // Air must take id 0
        registry.register("air", &[]);
        registry
    }

    /// Registry with the handful of blocks the scenarios use
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("stone", &[]);
        registry.register("dirt", &[]);
        registry.register("grass_block", &[]);
        registry.register("water", &[]);
        registry.register("oak_log", &[BlockTag::Logs]);
        registry.register("birch_log", &[BlockTag::Logs]);
        registry.register("spruce_log", &[BlockTag::Logs]);
        registry.register("oak_leaves", &[BlockTag::Leaves]);
        registry.register("oak_planks", &[]);
        registry
    }

    /// Add a block type; re-registering a name returns the existing id
    pub fn register(&mut self, name: &'static str, tags: &[BlockTag]) -> BlockId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = BlockId(self.names.len() as u16);
        self.names.push(name);
        self.by_name.insert(name, id);
        if !tags.is_empty() {
            self.tags.insert(id, tags.to_vec());
        }
        id
    }

    pub fn id(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn state(&self, name: &str) -> Option<BlockState> {
        self.id(name).map(BlockState::new)
    }

    pub fn name(&self, id: BlockId) -> Option<&'static str> {
        self.names.get(id.0 as usize).copied()
    }

    pub fn has_tag(&self, id: BlockId, tag: BlockTag) -> bool {
        self.tags.get(&id).is_some_and(|tags| tags.contains(&tag))
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_zero() {
        let registry = BlockRegistry::with_defaults();
        assert_eq!(registry.id("air"), Some(BlockId::AIR));
    }

    #[test]
    fn test_log_tags() {
        let registry = BlockRegistry::with_defaults();
        let oak = registry.id("oak_log").unwrap();
        let leaves = registry.id("oak_leaves").unwrap();
        assert!(registry.has_tag(oak, BlockTag::Logs));
        assert!(!registry.has_tag(leaves, BlockTag::Logs));
        assert!(registry.has_tag(leaves, BlockTag::Leaves));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = BlockRegistry::new();
        let a = registry.register("mangrove_log", &[BlockTag::Logs]);
        let b = registry.register("mangrove_log", &[]);
        assert_eq!(a, b);
        assert_eq!(registry.name(a), Some("mangrove_log"));
    }
}
