use rmemo::core::TagDirectory;
use rmemo::core::TodoList;
use rmemo::errors::AppError;
use rmemo::keys::{tags_key, todos_key};
use rmemo::store::{LocalStore, MemoryStore};

#[test]
fn test_first_load_creates_default_tag() {
    let mut store = MemoryStore::new();
    {
        let dir = TagDirectory::load(&mut store, "alice", None).unwrap();
        assert_eq!(dir.tags(), ["default".to_string()]);
        assert_eq!(dir.active(), Some("default"));
    }
    assert_eq!(
        store.get(&tags_key("alice")).unwrap().as_deref(),
        Some(r#"["default"]"#)
    );
}

#[test]
fn test_custom_default_tag() {
    let mut store = MemoryStore::new();
    let dir = TagDirectory::load_with_default(&mut store, "alice", None, "inbox").unwrap();
    assert_eq!(dir.tags(), ["inbox".to_string()]);
}

#[test]
fn test_add_tag_appends_creates_list_and_selects() {
    let mut store = MemoryStore::new();
    {
        let mut dir = TagDirectory::load(&mut store, "alice", None).unwrap();
        assert_eq!(dir.add_tag("  work ").unwrap(), "work");
        assert_eq!(dir.tags(), ["default".to_string(), "work".to_string()]);
        assert_eq!(dir.active(), Some("work"));
    }

    assert_eq!(
        store.get(&tags_key("alice")).unwrap().as_deref(),
        Some(r#"["default","work"]"#)
    );
    assert_eq!(
        store.get(&todos_key("alice", "work")).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn test_add_tag_rejects_duplicate_and_blank() {
    let mut store = MemoryStore::new();
    TagDirectory::load(&mut store, "alice", None)
        .unwrap()
        .add_tag("work")
        .unwrap();
    let before = store.snapshot();

    {
        let mut dir = TagDirectory::load(&mut store, "alice", None).unwrap();
        assert!(matches!(
            dir.add_tag("work"),
            Err(AppError::DuplicateTag(ref t)) if t == "work"
        ));
        assert!(dir.add_tag("   ").unwrap_err().is_blank_input());
    }
    assert_eq!(store.snapshot(), before);

    // Names are case-sensitive
    let mut dir = TagDirectory::load(&mut store, "alice", None).unwrap();
    assert!(dir.add_tag("Work").is_ok());
}

#[test]
fn test_active_hint_respected_when_listed() {
    let mut store = MemoryStore::new();
    {
        let mut dir = TagDirectory::load(&mut store, "alice", None).unwrap();
        dir.add_tag("work").unwrap();
        dir.add_tag("home").unwrap();
    }

    let dir = TagDirectory::load(&mut store, "alice", Some("work")).unwrap();
    assert_eq!(dir.active(), Some("work"));

    let dir = TagDirectory::load(&mut store, "alice", Some("gone")).unwrap();
    assert_eq!(dir.active(), Some("default"));
}

#[test]
fn test_save_fixes_active_selection() {
    let mut store = MemoryStore::new();
    let mut dir = TagDirectory::load(&mut store, "alice", None).unwrap();
    dir.add_tag("work").unwrap();
    assert_eq!(dir.active(), Some("work"));

    dir.save(vec!["home".into(), "default".into()]).unwrap();
    assert_eq!(dir.active(), Some("home"));

    dir.select("default").unwrap();
    dir.save(vec!["x".into(), "default".into()]).unwrap();
    assert_eq!(dir.active(), Some("default"));

    dir.save(Vec::new()).unwrap();
    assert_eq!(dir.active(), None);
    assert!(dir.tags().is_empty());
}

#[test]
fn test_select_unknown_tag() {
    let mut store = MemoryStore::new();
    let mut dir = TagDirectory::load(&mut store, "alice", None).unwrap();
    assert!(matches!(dir.select("nope"), Err(AppError::UnknownTag(_))));
    assert_eq!(dir.active(), Some("default"));
}

#[test]
fn test_remove_tag_drops_its_todo_list() {
    let mut store = MemoryStore::new();
    TagDirectory::load(&mut store, "alice", None)
        .unwrap()
        .add_tag("work")
        .unwrap();
    TodoList::load(&mut store, "alice", "work")
        .unwrap()
        .add("ship it")
        .unwrap();

    {
        let mut dir = TagDirectory::load(&mut store, "alice", Some("work")).unwrap();
        dir.remove_tag("work").unwrap();
        assert_eq!(dir.tags(), ["default".to_string()]);
        assert_eq!(dir.active(), Some("default"));
        assert!(matches!(
            dir.remove_tag("work"),
            Err(AppError::UnknownTag(_))
        ));
    }

    assert_eq!(store.get(&todos_key("alice", "work")).unwrap(), None);
}

#[test]
fn test_directories_are_per_user() {
    let mut store = MemoryStore::new();
    TagDirectory::load(&mut store, "alice", None)
        .unwrap()
        .add_tag("work")
        .unwrap();

    let dir = TagDirectory::load(&mut store, "bob", None).unwrap();
    assert_eq!(dir.tags(), ["default".to_string()]);
}

#[test]
fn test_remove_tag_writes_nothing_when_store_fails() {
    let mut store = MemoryStore::new();
    {
        let mut dir = TagDirectory::load(&mut store, "alice", None).unwrap();
        dir.add_tag("work").unwrap();
    }
    TodoList::load(&mut store, "alice", "work")
        .unwrap()
        .add("keep me")
        .unwrap();
    let before = store.snapshot();
    store.set_fail_writes(true);

    {
        let mut dir = TagDirectory::load(&mut store, "alice", Some("work")).unwrap();
        assert!(matches!(
            dir.remove_tag("work"),
            Err(AppError::StorageUnavailable(_))
        ));
        assert!(dir.contains("work"));
        assert_eq!(dir.active(), Some("work"));
    }

    assert_eq!(store.snapshot(), before);
}
