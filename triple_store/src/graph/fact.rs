//! Fact definitions - the atomic records of the graph.

use crate::entities::{Attribute, EntityId};

/// One entity-attribute-value triple.
///
/// Equality is structural over all three fields, which is what
/// [`GraphStore::remove`](super::GraphStore::remove) matches on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact {
    pub entity: EntityId,
    pub attribute: Attribute,
    pub value: String,
}

impl Fact {
    /// Create a new fact.
    pub fn new(entity: EntityId, attribute: Attribute, value: impl Into<String>) -> Self {
        Self {
            entity,
            attribute,
            value: value.into(),
        }
    }

    /// Create a name fact, the fact that makes an entity a contact.
    pub fn name(entity: EntityId, name: impl Into<String>) -> Self {
        Self::new(entity, Attribute::Name, name)
    }

    /// Check whether this fact belongs to `entity` and carries `attribute`.
    pub fn is(&self, entity: EntityId, attribute: &Attribute) -> bool {
        self.entity == entity && &self.attribute == attribute
    }

    /// Same attribute and value, re-homed under another entity.
    pub fn with_entity(&self, entity: EntityId) -> Self {
        Self {
            entity,
            attribute: self.attribute.clone(),
            value: self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_creation() {
        let entity = EntityId::new();
        let fact = Fact::new(entity, Attribute::Email, "anna@example.org");
        assert_eq!(fact.entity, entity);
        assert_eq!(fact.attribute, Attribute::Email);
        assert_eq!(fact.value, "anna@example.org");
    }

    #[test]
    fn test_structural_equality() {
        let entity = EntityId::new();
        assert_eq!(Fact::name(entity, "Anna"), Fact::name(entity, "Anna"));
        assert_ne!(Fact::name(entity, "Anna"), Fact::name(entity, "anna"));
        assert_ne!(Fact::name(entity, "Anna"), Fact::name(EntityId::new(), "Anna"));
    }

    #[test]
    fn test_with_entity_keeps_content() {
        let fact = Fact::new(EntityId::new(), Attribute::Tag, "family");
        let other = EntityId::new();
        let moved = fact.with_entity(other);
        assert!(moved.is(other, &Attribute::Tag));
        assert_eq!(moved.value, "family");
    }
}
