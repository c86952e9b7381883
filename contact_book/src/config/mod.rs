//! Configuration loaded from TOML.
//!
//! ```toml
//! contacts_file = "contacts.n3"
//! gifted_marker = "x "
//!
//! [namespace]
//! prefix = "c"
//! iri = "http://hiea.de/contact#"
//! ```
//!
//! Every field is optional; missing ones take the defaults above.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use triple_store::{N3Codec, CONTACT_NAMESPACE, CONTACT_PREFIX};

/// Default location of the contacts file, relative to the working directory.
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.n3";

/// Prefix put in front of a gift idea once it has been given.
pub const DEFAULT_GIFTED_MARKER: &str = "x ";

/// Configuration failures. All of them abort the command before the contacts
/// file is touched.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Attribute namespace written to and expected in the contacts file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    pub prefix: String,
    pub iri: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            prefix: CONTACT_PREFIX.to_string(),
            iri: CONTACT_NAMESPACE.to_string(),
        }
    }
}

/// Complete configuration of the contact book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub contacts_file: PathBuf,
    pub gifted_marker: String,
    pub namespace: NamespaceConfig,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            contacts_file: PathBuf::from(DEFAULT_CONTACTS_FILE),
            gifted_marker: DEFAULT_GIFTED_MARKER.to_string(),
            namespace: NamespaceConfig::default(),
        }
    }
}

impl BookConfig {
    /// Load from `path` when given; defaults otherwise.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, BookError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Read and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, BookError> {
        let text = std::fs::read_to_string(path).map_err(|source| BookError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| BookError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check values the codec and gift marking depend on.
    pub fn validate(&self) -> Result<(), BookError> {
        if !N3Codec::is_valid_prefix(&self.namespace.prefix) {
            return Err(BookError::Invalid(format!(
                "namespace prefix `{}` may only contain letters, digits, `_` and `-`, and must not start with `_`",
                self.namespace.prefix
            )));
        }
        if self.namespace.iri.is_empty()
            || self
                .namespace
                .iri
                .chars()
                .any(|c| c.is_whitespace() || c == '<' || c == '>')
        {
            return Err(BookError::Invalid(format!(
                "namespace iri `{}` is not a valid IRI",
                self.namespace.iri
            )));
        }
        if self.gifted_marker.is_empty() {
            return Err(BookError::Invalid("gifted_marker must not be empty".into()));
        }
        Ok(())
    }

    /// Codec for the configured namespace.
    pub fn codec(&self) -> N3Codec {
        N3Codec::new(self.namespace.prefix.clone(), self.namespace.iri.clone())
    }
}
