//! Graph Store - the core data structure holding every fact of one loaded file.

use log::debug;
use std::collections::HashSet;

use super::Fact;
use crate::entities::{Attribute, EntityId};

/// The main fact store.
///
/// Facts are kept in a flat vector in insertion order. Every lookup is a
/// linear scan; contact books hold tens to hundreds of entities.
///
/// The store is a plain value owned by whoever runs the command. Nothing in
/// it fails: absence is reported through `Option`, empty iterators and `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStore {
    facts: Vec<Fact>,
}

impl GraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a flat list of facts.
    ///
    /// Order is kept and duplicates are preserved as-is.
    pub fn load(facts: impl IntoIterator<Item = Fact>) -> Self {
        Self {
            facts: facts.into_iter().collect(),
        }
    }

    /// First fact, in insertion order, whose value equals `value`.
    ///
    /// The attribute is not considered, so a gift idea or tag that happens to
    /// spell a name matches too. Use [`find_by_attribute_value`] to restrict it.
    ///
    /// [`find_by_attribute_value`]: GraphStore::find_by_attribute_value
    pub fn find_by_value(&self, value: &str) -> Option<&Fact> {
        self.facts.iter().find(|f| f.value == value)
    }

    /// First fact matching both attribute and value.
    pub fn find_by_attribute_value(&self, attribute: &Attribute, value: &str) -> Option<&Fact> {
        self.facts
            .iter()
            .find(|f| &f.attribute == attribute && f.value == value)
    }

    /// All facts of `entity` with `attribute`, in insertion order.
    pub fn facts_of(
        &self,
        entity: EntityId,
        attribute: &Attribute,
    ) -> impl Iterator<Item = &Fact> + '_ {
        let attribute = attribute.clone();
        self.facts.iter().filter(move |f| f.is(entity, &attribute))
    }

    /// All facts of `entity` regardless of attribute.
    pub fn facts_of_entity(&self, entity: EntityId) -> impl Iterator<Item = &Fact> + '_ {
        self.facts.iter().filter(move |f| f.entity == entity)
    }

    /// Values of `entity`'s facts with `attribute`.
    pub fn values_of(
        &self,
        entity: EntityId,
        attribute: &Attribute,
    ) -> impl Iterator<Item = &str> + '_ {
        self.facts_of(entity, attribute).map(|f| f.value.as_str())
    }

    /// Append a fact. No uniqueness check is made.
    pub fn insert(&mut self, fact: Fact) {
        self.facts.push(fact);
    }

    /// Remove the first fact structurally equal to `fact`.
    ///
    /// Returns `false`, leaving the store untouched, when there is none.
    pub fn remove(&mut self, fact: &Fact) -> bool {
        match self.facts.iter().position(|f| f == fact) {
            Some(index) => {
                self.facts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Swap the first fact equal to `old` for `new`, keeping its position.
    ///
    /// Equivalent to `remove` followed by `insert`, except that the entity
    /// keeps its place in first-seen order. Returns `false` when `old` is absent.
    pub fn replace(&mut self, old: &Fact, new: Fact) -> bool {
        match self.facts.iter_mut().find(|f| &**f == old) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }

    /// Remove every fact of `entity` across all attributes.
    ///
    /// Returns the number of facts removed; unknown ids remove nothing.
    pub fn remove_cascade(&mut self, entity: EntityId) -> usize {
        let before = self.facts.len();
        self.facts.retain(|f| f.entity != entity);
        let removed = before - self.facts.len();
        debug!("cascade removed {} facts of entity {}", removed, entity);
        removed
    }

    /// Every distinct entity owning a name fact, in first-seen order.
    pub fn all_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        let mut seen = HashSet::new();
        self.facts
            .iter()
            .filter(|f| f.attribute == Attribute::Name)
            .map(|f| f.entity)
            .filter(move |entity| seen.insert(*entity))
    }

    /// Every distinct entity referenced by any fact, in first-seen order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        let mut seen = HashSet::new();
        self.facts
            .iter()
            .map(|f| f.entity)
            .filter(move |entity| seen.insert(*entity))
    }

    /// The entity named `name`, created with a fresh name fact if missing.
    pub fn ensure_entity(&mut self, name: &str) -> EntityId {
        if let Some(fact) = self.find_by_attribute_value(&Attribute::Name, name) {
            return fact.entity;
        }
        let entity = EntityId::new();
        self.insert(Fact::name(entity, name));
        debug!("created entity {} for {:?}", entity, name);
        entity
    }

    /// Check if an identical fact is present.
    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    /// All facts in insertion order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Get the total number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl FromIterator<Fact> for GraphStore {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        Self::load(iter)
    }
}
