use rmemo::core::TodoList;
use rmemo::errors::AppError;
use rmemo::keys::todos_key;
use rmemo::models::{Partition, Todo};
use rmemo::store::{LocalStore, MemoryStore, read_json, write_json};
use std::collections::HashSet;

fn texts(todos: &[Todo]) -> Vec<&str> {
    todos.iter().map(|t| t.text.as_str()).collect()
}

fn stored(store: &MemoryStore, tag: &str) -> Vec<Todo> {
    read_json(store, &todos_key("alice", tag)).unwrap().unwrap_or_default()
}

/// Seed `alice/work` with a mixed list: a(active) b(done) c(active) d(done)
fn seed_mixed(store: &mut MemoryStore) {
    let todos = vec![
        Todo::new("1", "a"),
        Todo::new("2", "b").toggled(),
        Todo::new("3", "c"),
        Todo::new("4", "d").toggled(),
    ];
    write_json(store, &todos_key("alice", "work"), &todos).unwrap();
}

#[test]
fn test_load_splits_partitions_keeping_order() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);

    let list = TodoList::load(&mut store, "alice", "work").unwrap();
    assert_eq!(texts(list.active()), vec!["a", "c"]);
    assert_eq!(texts(list.done()), vec!["b", "d"]);
    assert_eq!(texts(list.partition(Partition::Done)), vec!["b", "d"]);
    assert_eq!(list.len(), 4);
}

#[test]
fn test_load_missing_or_malformed_is_empty() {
    let mut store = MemoryStore::new();
    {
        let list = TodoList::load(&mut store, "alice", "work").unwrap();
        assert!(list.is_empty());
    }
    // Loading never writes
    assert!(store.is_empty());

    store.set(&todos_key("alice", "work"), "{broken").unwrap();
    let list = TodoList::load(&mut store, "alice", "work").unwrap();
    assert!(list.is_empty());
}

#[test]
fn test_add_appends_active_todo() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);

    let added = {
        let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
        let added = list.add("  e  ").unwrap();
        assert_eq!(texts(list.active()), vec!["a", "c", "e"]);
        added
    };

    assert_eq!(added.text, "e");
    assert!(!added.completed);

    // Persisted as active ++ done
    assert_eq!(texts(&stored(&store, "work")), vec!["a", "c", "e", "b", "d"]);
}

#[test]
fn test_add_blank_is_rejected_and_not_written() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);
    let before = store.snapshot();

    {
        let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
        let err = list.add("   ").unwrap_err();
        assert!(err.is_blank_input());
    }
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_add_generates_unique_ids() {
    let mut store = MemoryStore::new();
    let mut list = TodoList::load(&mut store, "alice", "work").unwrap();

    let ids: HashSet<String> = (0..5)
        .map(|i| list.add(&format!("task {i}")).unwrap().id)
        .collect();
    assert_eq!(ids.len(), 5);
}

#[test]
fn test_toggle_accept_moves_to_end_of_done() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);

    {
        let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
        let pending = list.propose_toggle("1").unwrap();
        assert_eq!(pending.destination(), Partition::Done);

        let toggled = list.resolve(pending, true).unwrap().unwrap();
        assert!(toggled.completed);
        assert_eq!(toggled.id, "1");
        assert_eq!(texts(list.active()), vec!["c"]);
        assert_eq!(texts(list.done()), vec!["b", "d", "a"]);
    }

    assert_eq!(texts(&stored(&store, "work")), vec!["c", "b", "d", "a"]);
}

#[test]
fn test_toggle_done_goes_back_to_end_of_active() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);

    let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
    let pending = list.propose_toggle("2").unwrap();
    assert_eq!(pending.destination(), Partition::Active);

    list.resolve(pending, true).unwrap();
    assert_eq!(texts(list.active()), vec!["a", "c", "b"]);
    assert_eq!(texts(list.done()), vec!["d"]);
}

#[test]
fn test_toggle_declined_changes_nothing() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);
    let before = store.snapshot();

    {
        let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
        let pending = list.propose_toggle("3").unwrap();
        assert_eq!(pending.todo().text, "c");
        assert!(list.resolve(pending, false).unwrap().is_none());
        assert_eq!(texts(list.active()), vec!["a", "c"]);
    }

    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_toggle_unknown_id() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);

    let list = TodoList::load(&mut store, "alice", "work").unwrap();
    assert!(matches!(
        list.propose_toggle("99"),
        Err(AppError::UnknownTodo(_))
    ));
}

#[test]
fn test_reorder_within_partition() {
    let mut store = MemoryStore::new();
    let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
    for t in ["a", "b", "c", "d"] {
        list.add(t).unwrap();
    }

    assert!(list.reorder(Partition::Active, 0, Partition::Active, 2).unwrap());
    assert_eq!(texts(list.active()), vec!["b", "c", "a", "d"]);

    assert!(list.reorder(Partition::Active, 3, Partition::Active, 0).unwrap());
    assert_eq!(texts(list.active()), vec!["d", "b", "c", "a"]);
}

#[test]
fn test_reorder_across_partitions_is_noop() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);
    let before = store.snapshot();

    {
        let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
        let moved = list
            .reorder(Partition::Active, 0, Partition::Done, 1)
            .unwrap();
        assert!(!moved);
        assert_eq!(texts(list.active()), vec!["a", "c"]);
        assert_eq!(texts(list.done()), vec!["b", "d"]);
    }

    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_reorder_out_of_range() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);

    let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
    let err = list
        .reorder(Partition::Done, 0, Partition::Done, 5)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidIndex { index: 5, len: 2 }));
}

#[test]
fn test_edit_keeps_id_flag_and_position() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);

    {
        let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
        let edited = list.edit("2", " bee ").unwrap();
        assert_eq!(edited.id, "2");
        assert_eq!(edited.text, "bee");
        assert!(edited.completed);

        assert!(list.edit("2", "  ").unwrap_err().is_blank_input());
    }

    assert_eq!(texts(&stored(&store, "work")), vec!["a", "c", "bee", "d"]);
}

#[test]
fn test_delete_from_either_partition() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);

    {
        let mut list = TodoList::load(&mut store, "alice", "work").unwrap();
        assert_eq!(list.delete("4").unwrap().text, "d");
        assert_eq!(list.delete("1").unwrap().text, "a");
        assert!(matches!(list.delete("1"), Err(AppError::UnknownTodo(_))));
    }

    assert_eq!(texts(&stored(&store, "work")), vec!["c", "b"]);
}

#[test]
fn test_resolve_ref_by_id_or_row() {
    let mut store = MemoryStore::new();
    seed_mixed(&mut store);

    let list = TodoList::load(&mut store, "alice", "work").unwrap();
    // Rows follow the listing: active first, then done
    assert_eq!(list.resolve_ref("1").unwrap().text, "a");
    assert_eq!(list.resolve_ref("3").unwrap().text, "c");
    assert!(list.resolve_ref("0").is_err());
    assert!(list.resolve_ref("nope").is_err());
}

#[test]
fn test_lists_are_scoped_by_user_and_tag() {
    let mut store = MemoryStore::new();
    TodoList::load(&mut store, "alice", "work")
        .unwrap()
        .add("alice work")
        .unwrap();
    TodoList::load(&mut store, "bob", "work")
        .unwrap()
        .add("bob work")
        .unwrap();

    let list = TodoList::load(&mut store, "alice", "home").unwrap();
    assert!(list.is_empty());

    let list = TodoList::load(&mut store, "bob", "work").unwrap();
    assert_eq!(texts(list.active()), vec!["bob work"]);
}
