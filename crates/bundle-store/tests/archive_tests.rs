use bundle_core::{BundleConfig, BundleSession, Catalog, CounterTokens, SelectionPersistence};
use bundle_store::{FileStore, KeyValueStore, MemoryStore, SelectionArchive};
use bundle_test_utils::{flavor, sample_catalog, selection_of, ScriptedSource};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn file_round_trip_is_identity() {
    let dir = TempDir::new().unwrap();
    let catalog = sample_catalog();
    let selection = selection_of(&[("classic", 3), ("smoky", 2), ("merken", 2)]);

    let mut archive = SelectionArchive::new(FileStore::new(dir.path()));
    assert!(archive.save(&selection));

    let reopened = SelectionArchive::new(FileStore::new(dir.path()));
    assert!(reopened.has_saved_selection());
    assert_eq!(reopened.restore(&catalog), selection);
}

#[test]
fn restore_against_shrunken_catalog() {
    let dir = TempDir::new().unwrap();
    let mut archive = SelectionArchive::new(FileStore::new(dir.path()));
    archive.save(&selection_of(&[("classic", 3), ("merken", 4)]));

    let today = Catalog::new(vec![flavor("classic", "Classic Beef")]);
    let restored = archive.restore(&today);
    assert_eq!(restored, selection_of(&[("classic", 3)]));
}

#[test]
fn reads_storefront_written_blob() {
    let mut store = MemoryStore::new();
    store
        .write(
            "last_box",
            r#"{"teriyaki":{"variantId":"teriyaki-v1","quantity":4},"pepper":{"variantId":"pepper-v1","quantity":3}}"#,
        )
        .unwrap();
    let archive = SelectionArchive::new(store);
    let restored = archive.restore(&sample_catalog());
    assert_eq!(restored.total(), 7);
    assert_eq!(restored.quantity_of("teriyaki"), 4);
}

#[test]
fn session_repeats_last_box() {
    let dir = TempDir::new().unwrap();
    let config = BundleConfig::new();

    let mut first = BundleSession::new(sample_catalog(), config.clone());
    first.surprise_me(&mut ScriptedSource::default());
    let mut archive = SelectionArchive::with_key(FileStore::new(dir.path()), &config.storage_key);
    assert!(first.persist(&mut archive));

    let mut second = BundleSession::new(sample_catalog(), config);
    assert!(second.can_load_last(&archive));
    assert!(second.load_last(&archive));
    assert_eq!(second.selection(), first.selection());
    assert!(second.status().is_complete());
}

#[test]
fn has_saved_ignores_content_validity() {
    let mut store = MemoryStore::new();
    store.write("last_box", "[]").unwrap();
    let archive = SelectionArchive::new(store);

    assert!(archive.has_saved_selection());
    let mut session = BundleSession::new(sample_catalog(), BundleConfig::new());
    assert!(!session.load_last(&archive));
    assert!(session.selection().is_empty());
}

#[test]
fn unwritable_directory_degrades() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut archive = SelectionArchive::new(FileStore::new(blocker.join("store")));
    assert!(!archive.save(&selection_of(&[("classic", 7)])));
    assert!(!archive.has_saved_selection());
    assert!(archive.restore(&sample_catalog()).is_empty());
}

#[test]
fn restored_box_keeps_pick_order() {
    let mut session = BundleSession::new(sample_catalog(), BundleConfig::new());
    session.set_quantity("smoky", 4).unwrap();
    session.set_quantity("classic", 3).unwrap();
    let mut archive = SelectionArchive::new(MemoryStore::new());
    assert!(session.persist(&mut archive));

    let mut repeat = BundleSession::new(sample_catalog(), BundleConfig::new());
    assert!(repeat.load_last(&archive));
    let order: Vec<&str> = repeat.selection().iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(order, ["smoky", "classic"]);

    let lines = repeat.checkout(&mut CounterTokens::new()).unwrap();
    let options: Vec<&str> = lines.iter().map(|l| l.purchasing_option_id.as_str()).collect();
    assert_eq!(options, ["smoky-v1", "classic-v1"]);
    assert_eq!(repeat.combination_summary(), session.combination_summary());
}
