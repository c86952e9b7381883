//! Graph module - the in-memory fact store.
//!
//! The graph consists of:
//! - **Facts**: entity-attribute-value triples, kept in insertion order
//! - **Entities**: derived, never stored; an entity exists while it owns a name fact

mod fact;
mod store;

pub use fact::*;
pub use store::*;
