//! Read-only view of one contact, for display and JSON output.

use serde::Serialize;
use std::collections::BTreeMap;
use triple_store::{Attribute, EntityId, GraphStore};

/// Everything known about a contact, gathered from its facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub gifts: Vec<String>,
    pub tags: Vec<String>,
    /// Attributes outside the fixed vocabulary, keyed by local name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, Vec<String>>,
}

impl ContactView {
    /// Collect the facts of `entity`. Values keep insertion order.
    pub(crate) fn from_store(store: &GraphStore, entity: EntityId) -> Option<Self> {
        let values = |attribute: Attribute| -> Vec<String> {
            store
                .facts_of(entity, &attribute)
                .map(|f| f.value.clone())
                .collect()
        };
        let name = values(Attribute::Name).into_iter().next()?;

        let mut other: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for fact in store.facts_of_entity(entity) {
            if let Attribute::Custom(local) = &fact.attribute {
                other.entry(local.clone()).or_default().push(fact.value.clone());
            }
        }

        Some(Self {
            name,
            birthday: values(Attribute::Birthday).into_iter().next(),
            emails: values(Attribute::Email),
            phones: values(Attribute::Phone),
            gifts: values(Attribute::GiftIdea),
            tags: values(Attribute::Tag),
            other,
        })
    }
}

impl std::fmt::Display for ContactView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(birthday) = &self.birthday {
            write!(f, "\n- birthday: {}", birthday)?;
        }
        for email in &self.emails {
            write!(f, "\n- email: {}", email)?;
        }
        for phone in &self.phones {
            write!(f, "\n- phone: {}", phone)?;
        }
        if !self.gifts.is_empty() {
            write!(f, "\n- gifts: {}", self.gifts.join(", "))?;
        }
        if !self.tags.is_empty() {
            write!(f, "\n- tags: {}", self.tags.join(", "))?;
        }
        for (key, values) in &self.other {
            write!(f, "\n- {}: {}", key, values.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triple_store::Fact;

    #[test]
    fn test_view_and_display() {
        let mut store = GraphStore::new();
        let anna = store.ensure_entity("Anna");
        store.insert(Fact::new(anna, Attribute::GiftIdea, "Book"));
        store.insert(Fact::new(anna, Attribute::Email, "anna@example.org"));
        store.insert(Fact::new(anna, Attribute::GiftIdea, "Tea"));
        store.insert(Fact::new(anna, Attribute::Tag, "family"));
        store.insert(Fact::new(anna, Attribute::Custom("nickname".into()), "Annie"));

        let view = ContactView::from_store(&store, anna).unwrap();
        assert_eq!(view.gifts, vec!["Book", "Tea"]);
        assert_eq!(
            view.to_string(),
            "Anna\n- email: anna@example.org\n- gifts: Book, Tea\n- tags: family\n- nickname: Annie"
        );
    }

    #[test]
    fn test_entity_without_name_has_no_view() {
        let mut store = GraphStore::new();
        let orphan = EntityId::new();
        store.insert(Fact::new(orphan, Attribute::Tag, "lost"));
        assert!(ContactView::from_store(&store, orphan).is_none());
    }

    #[test]
    fn test_json_shape() {
        let mut store = GraphStore::new();
        let ben = store.ensure_entity("Ben");
        store.insert(Fact::new(ben, Attribute::Birthday, "1990-04-01"));

        let view = ContactView::from_store(&store, ben).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Ben");
        assert_eq!(json["birthday"], "1990-04-01");
        assert!(json.get("other").is_none());
        assert_eq!(json["emails"].as_array().unwrap().len(), 0);
    }
}
