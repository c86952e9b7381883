//! Persistence Codec - converts a [`GraphStore`] to and from N3 text.
//!
//! The written form is deliberately flat:
//!
//! ```text
//! @prefix c: <http://hiea.de/contact#> .
//!
//! _:b0 c:givenName "Anna" .
//! _:b0 c:email "anna@example.org" .
//! ```
//!
//! Blank-node labels are re-derived on every save. Reusing labels read from
//! the file, or minting new ones on top of them, makes them grow or collide
//! over repeated save cycles; numbering entities `b0, b1, ...` afresh keeps
//! the file compact.
//!
//! Reading accepts a little more than is written (`;` and `,` continuations,
//! `[]` subjects, long literals, SPARQL-style `PREFIX`) so files produced by
//! other N3 writers load too.

mod lexer;
mod parser;

use log::debug;
use std::fmt::Write as _;

use crate::entities::{EntityId, CONTACT_NAMESPACE, CONTACT_PREFIX};
use crate::error::ParseError;
use crate::graph::{Fact, GraphStore};

/// Text codec bound to one attribute namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct N3Codec {
    prefix: String,
    namespace: String,
}

impl N3Codec {
    /// Create a codec writing `prefix:` for `namespace`.
    pub fn new(prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            namespace: namespace.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Parse `source` into facts, preserving file order.
    ///
    /// Each distinct blank-node label becomes one freshly generated entity.
    pub fn decode(&self, source: &str) -> Result<Vec<Fact>, ParseError> {
        let tokens = lexer::tokenize(source)?;
        let facts = parser::Parser::new(tokens, &self.namespace).parse()?;
        debug!("decoded {} facts", facts.len());
        Ok(facts)
    }

    /// Serialize every fact of `store`, one line per fact.
    ///
    /// Facts are grouped by entity in first-seen order, each entity under a
    /// freshly derived label.
    pub fn encode(&self, store: &GraphStore) -> String {
        let labels = derive_labels(store);
        let mut out = String::new();
        let _ = writeln!(out, "@prefix {}: <{}> .", self.prefix, self.namespace);
        out.push('\n');

        for (entity, label) in &labels {
            for fact in store.facts_of_entity(*entity) {
                let _ = writeln!(
                    out,
                    "_:{} {} \"{}\" .",
                    label,
                    self.predicate(fact.attribute.local_name()),
                    escape_literal(&fact.value)
                );
            }
        }
        debug!(
            "encoded {} facts under {} fresh labels",
            store.len(),
            labels.len()
        );
        out
    }
}

impl N3Codec {
    /// Whether `prefix` reads back as the prefix part of a prefixed name.
    ///
    /// A leading `_` would be read as a blank-node label.
    pub fn is_valid_prefix(prefix: &str) -> bool {
        !prefix.starts_with('_') && prefix.chars().all(lexer::is_name_char)
    }

    /// `prefix:local` when `local` is a plain name, the full IRI otherwise.
    fn predicate(&self, local: &str) -> String {
        if !local.is_empty() && local.chars().all(lexer::is_name_char) {
            format!("{}:{}", self.prefix, local)
        } else {
            format!("<{}{}>", self.namespace, local)
        }
    }
}

impl Default for N3Codec {
    fn default() -> Self {
        Self::new(CONTACT_PREFIX, CONTACT_NAMESPACE)
    }
}

/// Assign one fresh label per distinct entity, in the store's first-seen order.
///
/// Every fact of an entity is written under its label; no two entities share one.
pub fn derive_labels(store: &GraphStore) -> Vec<(EntityId, String)> {
    store
        .entities()
        .enumerate()
        .map(|(index, entity)| (entity, format!("b{}", index)))
        .collect()
}

fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}
