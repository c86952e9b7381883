//! Entity identifiers and the attribute vocabulary.

mod attribute;

pub use attribute::*;

use uuid::Uuid;

/// Opaque identifier for an entity within one loaded graph.
///
/// Identifiers never leave the process: the codec writes compact blank-node
/// labels instead and mints fresh identifiers when reading them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Create a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entity_ids_are_unique() {
        let ids: HashSet<EntityId> = (0..100).map(|_| EntityId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_entity_id_display_is_compact() {
        let id = EntityId::new();
        let shown = id.to_string();
        assert_eq!(shown.len(), 32);
        assert!(!shown.contains('-'));
    }
}
