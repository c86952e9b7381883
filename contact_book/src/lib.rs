//! # Contact Book
//!
//! Contact-level operations on top of `triple_store`. Every command loads the
//! backing file, performs one operation through [`ContactBook`], and saves the
//! file again only when the returned [`Outcome`] reports a change.
//!
//! ## Core Components
//!
//! - **config**: TOML configuration (file location, namespace, gift marker)
//! - **book**: Find-or-create, cascade delete, attribute edits and gift marking

pub mod book;
pub mod config;

pub use book::*;
pub use config::*;
