//! End-to-end command cycles against a real contacts file.

use std::path::Path;

use contact_book::{BookConfig, ContactBook, Outcome};
use tempfile::TempDir;
use triple_store::{load_store, save_store, Attribute, N3Codec};

/// One command invocation: load, apply, save when changed.
fn invoke(path: &Path, op: impl FnOnce(&mut ContactBook) -> Outcome) -> Outcome {
    let codec = N3Codec::default();
    let mut book = ContactBook::new(load_store(path, &codec).unwrap());
    let outcome = op(&mut book);
    if outcome.is_change() {
        save_store(path, &book.into_store(), &codec).unwrap();
    }
    outcome
}

fn read_book(path: &Path) -> ContactBook {
    ContactBook::new(load_store(path, &N3Codec::default()).unwrap())
}

#[test]
fn test_contact_lifecycle_across_invocations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.n3");

    assert!(invoke(&path, |b| b.add_contact("Anna")).is_change());
    assert!(invoke(&path, |b| b.add_value("Anna", Attribute::Email, "anna@example.org")).is_change());
    assert!(invoke(&path, |b| b.add_value("Ben", Attribute::Tag, "work")).is_change());
    assert!(invoke(&path, |b| b.add_value("Anna", Attribute::GiftIdea, "Book")).is_change());
    assert!(invoke(&path, |b| b.mark_gifted("Anna", "Book")).is_change());

    let book = read_book(&path);
    let names: Vec<_> = book.contacts().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Anna", "Ben"]);
    let anna = book.contact("Anna").unwrap();
    assert_eq!(anna.emails, vec!["anna@example.org"]);
    assert_eq!(anna.gifts, vec!["x Book"]);

    assert!(invoke(&path, |b| b.remove_contact("Anna")).is_change());
    let book = read_book(&path);
    assert_eq!(book.contacts().len(), 1);
    assert_eq!(book.store().len(), 2);
    assert!(book.store().find_by_value("anna@example.org").is_none());
}

#[test]
fn test_file_stays_compact_over_many_saves() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.n3");

    for i in 0..5 {
        invoke(&path, |b| b.add_value("Cora", Attribute::Tag, &format!("t{}", i)));
    }
    invoke(&path, |b| b.add_contact("Dana"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("@prefix c: <http://hiea.de/contact#> .\n"));
    assert_eq!(text.lines().filter(|l| l.starts_with("_:b0 ")).count(), 6);
    assert_eq!(text.lines().filter(|l| l.starts_with("_:b1 ")).count(), 1);
    assert!(!text.contains("_:b2"));
}

#[test]
fn test_unchanged_outcomes_do_not_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.n3");

    let outcome = invoke(&path, |b| b.remove_contact("Nobody"));
    assert_eq!(
        outcome,
        Outcome::ContactNotFound {
            name: "Nobody".into()
        }
    );
    assert!(!path.exists());

    invoke(&path, |b| b.add_contact("Eve"));
    let before = std::fs::metadata(&path).unwrap().modified().unwrap();
    let outcome = invoke(&path, |b| b.add_contact("Eve"));
    assert!(!outcome.is_change());
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), before);
}

#[test]
fn test_reads_files_written_by_other_tools() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.n3");
    std::fs::write(
        &path,
        "@prefix c: <http://hiea.de/contact#> .\n\n\
         _:n3-0 c:givenName \"Frank\";\n    c:giftIdea \"Socks\", \"Tea\".\n\
         _:n3-1 c:givenName \"Gina\".\n",
    )
    .unwrap();

    assert!(invoke(&path, |b| b.remove_value("Frank", Attribute::GiftIdea, "Socks")).is_change());

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "@prefix c: <http://hiea.de/contact#> .\n\n\
         _:b0 c:givenName \"Frank\" .\n\
         _:b0 c:giftIdea \"Tea\" .\n\
         _:b1 c:givenName \"Gina\" .\n"
    );
}

#[test]
fn test_unusual_attribute_names_survive_a_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.n3");
    std::fs::write(
        &path,
        "@prefix c: <http://hiea.de/contact#> .\n\
         _:a c:givenName \"Jo\" ;\n    <http://hiea.de/contact#nick.name> \"JJ\" .\n",
    )
    .unwrap();

    assert!(invoke(&path, |b| b.add_value("Jo", Attribute::Tag, "band")).is_change());
    assert!(invoke(&path, |b| b.add_value("Jo", Attribute::Tag, "gym")).is_change());

    let jo = read_book(&path).contact("Jo").unwrap();
    assert_eq!(jo.tags, vec!["band", "gym"]);
    assert_eq!(jo.other["nick.name"], vec!["JJ"]);
}

#[test]
fn test_malformed_file_aborts_before_mutation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.n3");
    let broken = "@prefix c: <http://hiea.de/contact#> .\n_:a c:givenName \"Hal .\n";
    std::fs::write(&path, broken).unwrap();

    assert!(load_store(&path, &N3Codec::default()).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_configured_namespace_and_marker() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("contacts.toml");
    std::fs::write(
        &config_path,
        "gifted_marker = \"(given) \"\n[namespace]\nprefix = \"p\"\niri = \"http://example.org/people#\"\n",
    )
    .unwrap();
    let config = BookConfig::load(Some(&config_path)).unwrap();
    let path = dir.path().join("people.n3");
    let codec = config.codec();

    let mut book = ContactBook::with_gifted_marker(
        load_store(&path, &codec).unwrap(),
        config.gifted_marker.clone(),
    );
    book.add_value("Ivy", Attribute::GiftIdea, "Plant");
    book.mark_gifted("Ivy", "Plant");
    save_store(&path, book.store(), &codec).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("_:b0 p:giftIdea \"(given) Plant\" ."));
    let reloaded = ContactBook::new(load_store(&path, &codec).unwrap());
    assert_eq!(reloaded.contact("Ivy").unwrap().gifts, vec!["(given) Plant"]);
}
