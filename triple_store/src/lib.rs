//! # Triple Store
//!
//! The data crate of the contact book: every contact lives here as a set of
//! subject-attribute-value facts. This crate knows nothing about commands or
//! console output.
//!
//! ## Core Components
//!
//! - **entities**: Entity identifiers and the attribute vocabulary
//! - **graph**: The in-memory fact store with lookup, mutation and cascade delete
//! - **codec**: The N3 text serialization, including blank-node label re-derivation
//! - **storage**: Reading the backing file and replacing it atomically
//!
//! ## Lifecycle
//!
//! A store is built from a file at the start of a command, mutated by at most
//! one logical operation, and written back only when something changed.

pub mod codec;
pub mod entities;
pub mod error;
pub mod graph;
pub mod storage;

pub use codec::*;
pub use entities::*;
pub use error::*;
pub use graph::*;
pub use storage::*;
