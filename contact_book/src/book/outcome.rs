//! Outcomes of contact book operations.
//!
//! "Not found" and "nothing to do" are ordinary outcomes, not errors. Only
//! outcomes for which [`Outcome::is_change`] holds require saving the file.

use triple_store::Attribute;

use super::ContactView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ContactAdded {
        name: String,
    },
    ContactRemoved {
        contact: ContactView,
    },
    ContactRenamed {
        from: String,
        to: String,
    },
    ValueAdded {
        name: String,
        attribute: Attribute,
        value: String,
        /// The contact did not exist and was created first.
        created_contact: bool,
    },
    ValueRemoved {
        name: String,
        attribute: Attribute,
        value: String,
    },
    ValueChanged {
        name: String,
        attribute: Attribute,
        from: String,
        to: String,
        /// The contact did not exist and was created first.
        created_contact: bool,
    },
    ContactExists {
        name: String,
    },
    ContactNotFound {
        name: String,
    },
    ValueExists {
        name: String,
        attribute: Attribute,
        value: String,
    },
    ValueNotFound {
        name: String,
        attribute: Attribute,
        value: String,
    },
    /// A single-valued attribute already holds `existing`.
    SingleValueTaken {
        name: String,
        attribute: Attribute,
        existing: String,
    },
    Unchanged {
        reason: String,
    },
}

impl Outcome {
    /// Whether the store was mutated and must be persisted.
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Outcome::ContactAdded { .. }
                | Outcome::ContactRemoved { .. }
                | Outcome::ContactRenamed { .. }
                | Outcome::ValueAdded { .. }
                | Outcome::ValueRemoved { .. }
                | Outcome::ValueChanged { .. }
        )
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::ContactAdded { name } => write!(f, "„{}“ added.", name),
            Outcome::ContactRemoved { contact } => write!(f, "Deleted:\n{}", contact),
            Outcome::ContactRenamed { from, to } => write!(f, "„{}“ renamed to „{}“.", from, to),
            Outcome::ValueAdded {
                name,
                attribute,
                value,
                created_contact,
            } => {
                if *created_contact {
                    writeln!(f, "„{}“ added.", name)?;
                }
                write!(f, "Added „{}“ as {} for „{}“.", value, attribute, name)
            }
            Outcome::ValueRemoved {
                name,
                attribute,
                value,
            } => write!(f, "Removed {} „{}“ from „{}“.", attribute, value, name),
            Outcome::ValueChanged {
                name,
                attribute,
                from,
                to,
                created_contact,
            } => {
                if *created_contact {
                    writeln!(f, "„{}“ added.", name)?;
                }
                if from.is_empty() {
                    write!(f, "Set {} of „{}“ to „{}“.", attribute, name, to)
                } else {
                    write!(
                        f,
                        "Changed {} of „{}“ from „{}“ to „{}“.",
                        attribute, name, from, to
                    )
                }
            }
            Outcome::ContactExists { name } => write!(f, "„{}“ already exists.", name),
            Outcome::ContactNotFound { name } => write!(f, "„{}“ doesn't exist.", name),
            Outcome::ValueExists {
                name,
                attribute,
                value,
            } => write!(f, "„{}“ already has {} „{}“.", name, attribute, value),
            Outcome::ValueNotFound {
                name,
                attribute,
                value,
            } => write!(f, "No {} „{}“ exists for „{}“.", attribute, value, name),
            Outcome::SingleValueTaken {
                name,
                attribute,
                existing,
            } => write!(
                f,
                "„{}“ already has a {} („{}“); edit it instead.",
                name, attribute, existing
            ),
            Outcome::Unchanged { reason } => write!(f, "{}", reason),
        }
    }
}
