use blob_store::{Store, StoreError};
use tempfile::tempdir;

fn store() -> (tempfile::TempDir, Store) {
    let dir = tempdir().expect("tempdir");
    let store = Store::open(dir.path().join("filesystem")).expect("open store");
    (dir, store)
}

#[test]
fn save_and_load_round_trip() {
    let (_dir, store) = store();
    store.save("note.txt", b"hello").expect("save");
    assert_eq!(store.load("note.txt").expect("load"), b"hello");
    assert_eq!(store.load_text("note.txt").expect("load_text"), "hello");
}

#[test]
fn save_under_missing_parent_reports_error_and_leaves_no_file() {
    let (_dir, store) = store();
    let result = store.save("missing/note.txt", b"hello");
    assert!(matches!(result, Err(StoreError::ParentNotFound { .. })));
    assert!(!store.exists("missing/note.txt"));
    assert!(!store.exists("missing"));
}

#[test]
fn save_over_folder_is_a_conflict() {
    let (_dir, store) = store();
    store.make_folder("docs").expect("make_folder");
    let result = store.save("docs", b"oops");
    assert!(matches!(result, Err(StoreError::Conflict { .. })));
    assert!(store.is_folder("docs"));
}

#[test]
fn load_missing_is_not_found() {
    let (_dir, store) = store();
    assert!(matches!(
        store.load("absent.txt"),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn list_is_sorted_and_missing_folder_is_not_found() {
    let (_dir, store) = store();
    store.make_folder("docs").expect("make_folder");
    store.save("docs/b.txt", b"b").expect("save");
    store.save("docs/a.txt", b"a").expect("save");
    assert_eq!(store.list("docs").expect("list"), vec!["a.txt", "b.txt"]);
    assert!(matches!(
        store.list("nope"),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn make_folder_twice_reports_already_exists() {
    let (_dir, store) = store();
    store.make_folder("docs").expect("make_folder");
    assert!(matches!(
        store.make_folder("docs"),
        Err(StoreError::AlreadyExists { .. })
    ));
}

#[test]
fn delete_reports_whether_something_was_removed() {
    let (_dir, store) = store();
    store.save("note.txt", b"x").expect("save");
    assert!(store.delete("note.txt").expect("delete"));
    assert!(!store.delete("note.txt").expect("delete absent"));

    store.make_folder("docs").expect("make_folder");
    store.save("docs/inner.txt", b"x").expect("save");
    assert!(store.delete("docs").expect("delete folder"));
    assert!(!store.exists("docs"));
}

#[test]
fn copy_file_keeps_name_under_target_folder() {
    let (_dir, store) = store();
    store.save("note.txt", b"content").expect("save");
    store.make_folder("backup").expect("make_folder");
    store.copy_file("note.txt", "backup").expect("copy_file");
    assert_eq!(store.load("backup/note.txt").expect("load"), b"content");
    assert!(store.exists("note.txt"));
}

#[test]
fn copy_folder_recurses() {
    let (_dir, store) = store();
    store.make_folder("src").expect("make_folder");
    store.make_folder("src/nested").expect("make_folder");
    store.save("src/a.txt", b"a").expect("save");
    store.save("src/nested/b.txt", b"b").expect("save");
    store.make_folder("dst").expect("make_folder");

    store.copy_folder("src", "dst").expect("copy_folder");
    assert_eq!(store.load("dst/src/a.txt").expect("load"), b"a");
    assert_eq!(store.load("dst/src/nested/b.txt").expect("load"), b"b");
}

#[test]
fn rename_moves_files_and_reports_missing_sources() {
    let (_dir, store) = store();
    store.save("old.txt", b"x").expect("save");
    store.rename("old.txt", "new.txt").expect("rename");
    assert!(!store.exists("old.txt"));
    assert!(store.exists("new.txt"));
    assert!(matches!(
        store.rename("ghost.txt", "elsewhere.txt"),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn paths_cannot_escape_the_sandbox() {
    let (_dir, store) = store();
    assert!(matches!(
        store.save("../outside.txt", b"x"),
        Err(StoreError::InvalidPath { .. })
    ));
    assert!(matches!(
        store.load("/etc/hostname"),
        Err(StoreError::InvalidPath { .. })
    ));
    assert!(!store.exists("a/../../b"));
}

#[test]
fn subdir_scopes_operations_to_the_sub_root() {
    let (_dir, store) = store();
    let scoped = store.subdir("apps/notes").expect("subdir");
    scoped.save("state.txt", b"s").expect("save");
    assert_eq!(store.load("apps/notes/state.txt").expect("load"), b"s");
    assert!(matches!(
        scoped.load("../other"),
        Err(StoreError::InvalidPath { .. })
    ));
}
