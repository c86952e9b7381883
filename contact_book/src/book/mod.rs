//! Contact Book - one logical operation per command on top of the graph store.
//!
//! Contacts are looked up by their name fact only. A gift idea or tag whose
//! text happens to equal a name never resolves to a contact.

mod contact;
mod outcome;

pub use contact::*;
pub use outcome::*;

use log::debug;
use triple_store::{Attribute, EntityId, Fact, GraphStore};

use crate::config::DEFAULT_GIFTED_MARKER;

/// Owns the store for the duration of one command.
#[derive(Debug, Clone)]
pub struct ContactBook {
    store: GraphStore,
    gifted_marker: String,
}

impl ContactBook {
    /// Wrap a loaded store using the default gifted marker.
    pub fn new(store: GraphStore) -> Self {
        Self::with_gifted_marker(store, DEFAULT_GIFTED_MARKER)
    }

    pub fn with_gifted_marker(store: GraphStore, marker: impl Into<String>) -> Self {
        Self {
            store,
            gifted_marker: marker.into(),
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Give the store back for persisting.
    pub fn into_store(self) -> GraphStore {
        self.store
    }

    /// The entity whose name fact equals `name`.
    pub(crate) fn find_contact(&self, name: &str) -> Option<EntityId> {
        self.store
            .find_by_attribute_value(&Attribute::Name, name)
            .map(|f| f.entity)
    }

    /// Every contact in first-seen order.
    pub fn contacts(&self) -> Vec<ContactView> {
        self.store
            .all_entities()
            .filter_map(|entity| ContactView::from_store(&self.store, entity))
            .collect()
    }

    /// One contact by name.
    pub fn contact(&self, name: &str) -> Option<ContactView> {
        let entity = self.find_contact(name)?;
        ContactView::from_store(&self.store, entity)
    }

    /// Add a contact unless one with that name exists.
    pub fn add_contact(&mut self, name: &str) -> Outcome {
        if self.find_contact(name).is_some() {
            return Outcome::ContactExists { name: name.into() };
        }
        self.store.ensure_entity(name);
        Outcome::ContactAdded { name: name.into() }
    }

    /// Delete a contact together with every fact it owns.
    pub fn remove_contact(&mut self, name: &str) -> Outcome {
        let Some(entity) = self.find_contact(name) else {
            return Outcome::ContactNotFound { name: name.into() };
        };
        let Some(contact) = ContactView::from_store(&self.store, entity) else {
            return Outcome::ContactNotFound { name: name.into() };
        };
        let removed = self.store.remove_cascade(entity);
        debug!("removed {} facts of „{}“", removed, name);
        Outcome::ContactRemoved { contact }
    }

    /// Change a contact's name, refusing names already in use.
    pub fn rename_contact(&mut self, from: &str, to: &str) -> Outcome {
        if from == to {
            return Outcome::Unchanged {
                reason: "Name unchanged.".into(),
            };
        }
        let Some(entity) = self.find_contact(from) else {
            return Outcome::ContactNotFound { name: from.into() };
        };
        if self.find_contact(to).is_some() {
            return Outcome::ContactExists { name: to.into() };
        }
        self.store.replace(&Fact::name(entity, from), Fact::name(entity, to));
        Outcome::ContactRenamed {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Attach a value to a contact, creating the contact first if needed.
    ///
    /// Single-valued attributes that already hold a value are left alone,
    /// as are exact duplicates.
    pub fn add_value(&mut self, name: &str, attribute: Attribute, value: &str) -> Outcome {
        if let Some(entity) = self.find_contact(name) {
            if let Some(existing) = self.store.values_of(entity, &attribute).next() {
                let duplicate = existing == value
                    || self.store.contains(&Fact::new(entity, attribute.clone(), value));
                if duplicate {
                    return Outcome::ValueExists {
                        name: name.into(),
                        attribute,
                        value: value.into(),
                    };
                }
                if !attribute.is_multi_valued() {
                    return Outcome::SingleValueTaken {
                        name: name.into(),
                        attribute,
                        existing: existing.to_string(),
                    };
                }
            }
        }

        let created_contact = self.find_contact(name).is_none();
        let entity = self.store.ensure_entity(name);
        self.store.insert(Fact::new(entity, attribute.clone(), value));
        Outcome::ValueAdded {
            name: name.into(),
            attribute,
            value: value.into(),
            created_contact,
        }
    }

    /// Replace every value of a single-valued attribute with `value`,
    /// creating the contact first if needed.
    pub fn set_value(&mut self, name: &str, attribute: Attribute, value: &str) -> Outcome {
        if attribute == Attribute::Name {
            return self.rename_contact(name, value);
        }
        let created_contact = self.find_contact(name).is_none();
        let entity = self.store.ensure_entity(name);

        let previous: Vec<Fact> = self.store.facts_of(entity, &attribute).cloned().collect();
        if previous.len() == 1 && previous[0].value == value {
            return Outcome::Unchanged {
                reason: format!("{} of „{}“ unchanged.", attribute, name),
            };
        }
        for fact in &previous {
            self.store.remove(fact);
        }
        self.store.insert(Fact::new(entity, attribute.clone(), value));
        Outcome::ValueChanged {
            name: name.into(),
            attribute,
            from: previous
                .into_iter()
                .map(|f| f.value)
                .collect::<Vec<_>>()
                .join(", "),
            to: value.into(),
            created_contact,
        }
    }

    /// Detach one value from a contact.
    ///
    /// Names are not removable this way; use [`remove_contact`] or
    /// [`rename_contact`].
    ///
    /// [`remove_contact`]: ContactBook::remove_contact
    /// [`rename_contact`]: ContactBook::rename_contact
    pub fn remove_value(&mut self, name: &str, attribute: Attribute, value: &str) -> Outcome {
        if attribute == Attribute::Name {
            return Outcome::Unchanged {
                reason: "Names can only be renamed or removed with their contact.".into(),
            };
        }
        let Some(entity) = self.find_contact(name) else {
            return Outcome::ContactNotFound { name: name.into() };
        };
        let fact = Fact::new(entity, attribute.clone(), value);
        if !self.store.remove(&fact) {
            return Outcome::ValueNotFound {
                name: name.into(),
                attribute,
                value: value.into(),
            };
        }
        Outcome::ValueRemoved {
            name: name.into(),
            attribute,
            value: value.into(),
        }
    }

    /// Replace one value of a contact with another.
    pub fn edit_value(&mut self, name: &str, attribute: Attribute, from: &str, to: &str) -> Outcome {
        if attribute == Attribute::Name {
            return if from == name {
                self.rename_contact(from, to)
            } else {
                Outcome::ValueNotFound {
                    name: name.into(),
                    attribute,
                    value: from.into(),
                }
            };
        }
        if from == to {
            return Outcome::Unchanged {
                reason: "Attribute unchanged.".into(),
            };
        }
        let Some(entity) = self.find_contact(name) else {
            return Outcome::ContactNotFound { name: name.into() };
        };
        let old = Fact::new(entity, attribute.clone(), from);
        if !self.store.contains(&old) {
            return Outcome::ValueNotFound {
                name: name.into(),
                attribute,
                value: from.into(),
            };
        }
        let new = Fact::new(entity, attribute.clone(), to);
        if self.store.contains(&new) {
            return Outcome::ValueExists {
                name: name.into(),
                attribute,
                value: to.into(),
            };
        }
        self.store.replace(&old, new);
        Outcome::ValueChanged {
            name: name.into(),
            attribute,
            from: from.into(),
            to: to.into(),
            created_contact: false,
        }
    }

    /// Annotate a gift idea as given by prefixing the gifted marker.
    pub fn mark_gifted(&mut self, name: &str, gift: &str) -> Outcome {
        if gift.starts_with(&self.gifted_marker) {
            return Outcome::Unchanged {
                reason: format!("„{}“ is already marked as gifted.", gift),
            };
        }
        let marked = format!("{}{}", self.gifted_marker, gift);
        if self.has_gift(name, &marked) {
            return Outcome::Unchanged {
                reason: format!("„{}“ is already marked as gifted.", gift),
            };
        }
        self.edit_value(name, Attribute::GiftIdea, gift, &marked)
    }

    /// Strip the gifted marker from a gift idea.
    ///
    /// `gift` may be given with or without the marker.
    pub fn unmark_gifted(&mut self, name: &str, gift: &str) -> Outcome {
        let plain = gift.strip_prefix(self.gifted_marker.as_str()).unwrap_or(gift);
        let marked = format!("{}{}", self.gifted_marker, plain);
        if !self.has_gift(name, &marked) && self.has_gift(name, plain) {
            return Outcome::Unchanged {
                reason: format!("„{}“ is not marked as gifted.", plain),
            };
        }
        self.edit_value(name, Attribute::GiftIdea, &marked, plain)
    }

    /// Whether a gift idea text carries the gifted marker.
    pub fn is_gifted(&self, gift: &str) -> bool {
        gift.starts_with(&self.gifted_marker)
    }

    fn has_gift(&self, name: &str, gift: &str) -> bool {
        self.find_contact(name).is_some_and(|entity| {
            self.store.contains(&Fact::new(entity, Attribute::GiftIdea, gift))
        })
    }
}
