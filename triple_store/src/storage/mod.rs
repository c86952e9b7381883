//! Storage - reading the backing file and replacing it atomically.

use log::{debug, info};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::codec::N3Codec;
use crate::error::StoreError;
use crate::graph::GraphStore;

/// Read and decode the file at `path` into a fresh store.
///
/// A missing file is an empty contact book. Any other read failure, and any
/// parse failure, is returned before anything can be mutated.
pub fn load_store(path: &Path, codec: &N3Codec) -> Result<GraphStore, StoreError> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("{} does not exist yet, starting empty", path.display());
            return Ok(GraphStore::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let facts = codec.decode(&source).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} facts from {}", facts.len(), path.display());
    Ok(GraphStore::load(facts))
}

/// Encode `store` and atomically replace the file at `path`.
///
/// The text goes to a temporary file in the same directory, is synced, then
/// renamed over the target. If any step fails the previous file is intact.
pub fn save_store(path: &Path, store: &GraphStore, codec: &N3Codec) -> Result<(), StoreError> {
    let text = codec.encode(store);
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|err| write_err(err.error))?;

    debug!("saved {} facts to {}", store.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Attribute;
    use crate::error::ParseErrorKind;
    use crate::graph::Fact;
    use tempfile::tempdir;

    fn sample_store() -> GraphStore {
        let mut store = GraphStore::new();
        let anna = store.ensure_entity("Anna");
        store.insert(Fact::new(anna, Attribute::Email, "anna@example.org"));
        store
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = load_store(&dir.path().join("contacts.n3"), &N3Codec::default()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.n3");
        let codec = N3Codec::default();

        save_store(&path, &sample_store(), &codec).unwrap();
        let loaded = load_store(&path, &codec).unwrap();

        let anna = loaded.find_by_attribute_value(&Attribute::Name, "Anna").unwrap().entity;
        let emails: Vec<_> = loaded.values_of(anna, &Attribute::Email).collect();
        assert_eq!(emails, vec!["anna@example.org"]);
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.n3");
        let codec = N3Codec::default();

        save_store(&path, &sample_store(), &codec).unwrap();
        save_store(&path, &GraphStore::new(), &codec).unwrap();

        assert!(load_store(&path, &codec).unwrap().is_empty());
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.n3");
        let codec = N3Codec::default();
        save_store(&path, &sample_store(), &codec).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        // A directory cannot be replaced by a file.
        let blocked = dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "x").unwrap();
        let err = save_store(&blocked, &GraphStore::new(), &codec).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));

        // Missing parent directory.
        let err = save_store(&dir.path().join("nope/contacts.n3"), &GraphStore::new(), &codec)
            .unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_parse_failure_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.n3");
        std::fs::write(&path, "@prefix c: <http://hiea.de/contact#> .\n_:a c:tag \"open\n").unwrap();

        match load_store(&path, &N3Codec::default()) {
            Err(StoreError::Parse { path: reported, source }) => {
                assert_eq!(reported, path);
                assert_eq!(source.kind, ParseErrorKind::UnterminatedLiteral);
                assert_eq!(source.line, 2);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_path_is_read_error() {
        let dir = tempdir().unwrap();
        let err = load_store(dir.path(), &N3Codec::default()).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
