use chrono::NaiveDate;
use rmemo::core::weekly::{
    self, DEFAULT_SUMMARY_PREFIX, parse_week_start, summary, week_range, week_start,
};
use rmemo::errors::AppError;
use rmemo::keys::weekly_key;
use rmemo::models::WeekEntry;
use rmemo::store::{LocalStore, MemoryStore, read_json, write_json};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn labels(weeks: &[WeekEntry]) -> Vec<&str> {
    weeks.iter().map(|w| w.week_range.as_str()).collect()
}

fn bucket(store: &MemoryStore, year: i32, month: u32) -> Option<Vec<WeekEntry>> {
    read_json(store, &weekly_key("alice", year, month)).unwrap()
}

#[test]
fn test_week_range_labels() {
    assert_eq!(week_range(day(2024, 1, 8)), "08.01-14.01 (2024)");
    assert_eq!(week_range(day(2024, 1, 14)), "08.01-14.01 (2024)");
    // Sunday belongs to the week that started the Monday before
    assert_eq!(week_range(day(2024, 1, 7)), "01.01-07.01 (2024)");
    // Year comes from the date itself
    assert_eq!(week_range(day(2025, 1, 1)), "30.12-05.01 (2025)");

    assert_eq!(week_start(day(2024, 3, 1)), day(2024, 2, 26));
    assert_eq!(week_start(day(2024, 2, 26)), day(2024, 2, 26));
}

#[test]
fn test_parse_week_start() {
    assert_eq!(parse_week_start("08.01-14.01 (2024)"), Some(day(2024, 1, 8)));
    assert_eq!(parse_week_start("8.1-14.1 (2024)"), Some(day(2024, 1, 8)));
    assert_eq!(parse_week_start("31.02-06.03 (2024)"), None);
    assert_eq!(parse_week_start("last week"), None);
    assert_eq!(parse_week_start(""), None);
}

#[test]
fn test_current_week_defaults_to_empty() {
    let store = MemoryStore::new();
    let entry = weekly::current(&store, "alice", day(2024, 1, 10)).unwrap();
    assert_eq!(entry, WeekEntry::empty("08.01-14.01 (2024)"));
}

#[test]
fn test_save_goes_to_bucket_of_monday() {
    let mut store = MemoryStore::new();
    // Friday 1 March, week starting Monday 26 February
    let today = day(2024, 3, 1);

    let saved = weekly::save(&mut store, "alice", today, "plan").unwrap();
    assert_eq!(saved.week_range, "26.02-03.03 (2024)");

    assert_eq!(
        bucket(&store, 2024, 2).unwrap(),
        vec![WeekEntry::new("26.02-03.03 (2024)", "plan")]
    );
    assert!(bucket(&store, 2024, 3).is_none());

    let current = weekly::current(&store, "alice", today).unwrap();
    assert_eq!(current.notes, "plan");
}

#[test]
fn test_save_replaces_existing_entry() {
    let mut store = MemoryStore::new();
    let today = day(2024, 1, 10);

    weekly::save(&mut store, "alice", today, "first").unwrap();
    weekly::save(&mut store, "alice", day(2024, 1, 12), "second").unwrap();

    let entries = bucket(&store, 2024, 1).unwrap();
    assert_eq!(entries, vec![WeekEntry::new("08.01-14.01 (2024)", "second")]);
}

#[test]
fn test_save_drops_copies_from_other_buckets() {
    let mut store = MemoryStore::new();
    write_json(
        &mut store,
        &weekly_key("alice", 2024, 3),
        &vec![
            WeekEntry::new("26.02-03.03 (2024)", "stale"),
            WeekEntry::new("04.03-10.03 (2024)", "keep"),
        ],
    )
    .unwrap();
    write_json(
        &mut store,
        &weekly_key("alice", 2024, 1),
        &vec![WeekEntry::new("26.02-03.03 (2024)", "older")],
    )
    .unwrap();

    weekly::save(&mut store, "alice", day(2024, 3, 1), "fresh").unwrap();

    assert_eq!(
        bucket(&store, 2024, 3).unwrap(),
        vec![WeekEntry::new("04.03-10.03 (2024)", "keep")]
    );
    assert!(bucket(&store, 2024, 1).is_none());

    let all = weekly::load_all(&store, "alice").unwrap();
    let matching: Vec<&WeekEntry> = all
        .iter()
        .filter(|w| w.week_range == "26.02-03.03 (2024)")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].notes, "fresh");
}

#[test]
fn test_load_all_sorts_chronologically_newest_first() {
    let mut store = MemoryStore::new();
    write_json(
        &mut store,
        &weekly_key("alice", 2024, 1),
        &vec![
            WeekEntry::new("29.01-04.02 (2024)", "b"),
            WeekEntry::new("not a label", "x"),
        ],
    )
    .unwrap();
    write_json(
        &mut store,
        &weekly_key("alice", 2024, 2),
        &vec![WeekEntry::new("05.02-11.02 (2024)", "a")],
    )
    .unwrap();
    write_json(
        &mut store,
        &weekly_key("alice", 2023, 12),
        &vec![WeekEntry::new("04.12-10.12 (2023)", "c")],
    )
    .unwrap();

    let all = weekly::load_all(&store, "alice").unwrap();
    assert_eq!(
        labels(&all),
        vec![
            "05.02-11.02 (2024)",
            "29.01-04.02 (2024)",
            "04.12-10.12 (2023)",
            "not a label"
        ]
    );
}

#[test]
fn test_load_all_skips_malformed_bucket() {
    let mut store = MemoryStore::new();
    store.set(&weekly_key("alice", 2024, 1), "oops").unwrap();
    write_json(
        &mut store,
        &weekly_key("alice", 2024, 2),
        &vec![WeekEntry::new("05.02-11.02 (2024)", "a")],
    )
    .unwrap();

    let all = weekly::load_all(&store, "alice").unwrap();
    assert_eq!(labels(&all), vec!["05.02-11.02 (2024)"]);
}

#[test]
fn test_history_excludes_current_week() {
    let mut store = MemoryStore::new();
    weekly::save(&mut store, "alice", day(2024, 1, 3), "old").unwrap();
    weekly::save(&mut store, "alice", day(2024, 1, 10), "now").unwrap();
    weekly::save(&mut store, "alice", day(2024, 1, 17), "next").unwrap();
    weekly::save(&mut store, "bob", day(2023, 6, 1), "not mine").unwrap();

    let history = weekly::history(&store, "alice", day(2024, 1, 10)).unwrap();
    assert_eq!(
        labels(&history),
        vec!["15.01-21.01 (2024)", "01.01-07.01 (2024)"]
    );
}

#[test]
fn test_append_adds_lines() {
    let mut store = MemoryStore::new();
    let today = day(2024, 1, 10);

    weekly::append(&mut store, "alice", today, "one").unwrap();
    let entry = weekly::append(&mut store, "alice", today, "two").unwrap();
    assert_eq!(entry.notes, "one\ntwo");

    let err = weekly::append(&mut store, "alice", today, "  ").unwrap_err();
    assert!(matches!(err, AppError::BlankInput(_)));
    assert_eq!(weekly::current(&store, "alice", today).unwrap().notes, "one\ntwo");
}

#[test]
fn test_summary_format() {
    let entry = WeekEntry::new("08.01-14.01 (2024)", "shipped v1\nfixed bugs");
    assert_eq!(
        summary(&entry, DEFAULT_SUMMARY_PREFIX),
        "#summary #08.01-14.01 (2024)\nshipped v1\nfixed bugs"
    );
    assert_eq!(
        summary(&WeekEntry::empty("01.01-07.01 (2024)"), "#recap"),
        "#recap #01.01-07.01 (2024)\n"
    );
}

#[test]
fn test_save_leaves_corrupt_bucket_alone() {
    let mut store = MemoryStore::new();
    let corrupt = weekly_key("alice", 2023, 5);
    store.set(&corrupt, "{oops").unwrap();
    let today = day(2024, 1, 10);

    let saved = weekly::save(&mut store, "alice", today, "still works").unwrap();
    assert_eq!(saved.week_range, "08.01-14.01 (2024)");

    assert_eq!(weekly::current(&store, "alice", today).unwrap().notes, "still works");
    assert_eq!(store.get(&corrupt).unwrap().as_deref(), Some("{oops"));
}

#[test]
fn test_weekly_ignores_nicknames_sharing_the_prefix() {
    let mut store = MemoryStore::new();
    // "bob_weekly" owns bob_weekly_tags and bob_weekly_weekly_2024_01
    write_json(&mut store, "bob_weekly_tags", &vec!["default"]).unwrap();
    weekly::save(&mut store, "bob_weekly", day(2024, 1, 10), "theirs").unwrap();
    let others: Vec<(String, String)> = store
        .snapshot()
        .into_iter()
        .filter(|(k, _)| k.starts_with("bob_weekly_"))
        .collect();

    weekly::save(&mut store, "bob", day(2024, 1, 10), "mine").unwrap();

    let all = weekly::load_all(&store, "bob").unwrap();
    assert_eq!(all, vec![WeekEntry::new("08.01-14.01 (2024)", "mine")]);

    for (key, value) in others {
        assert_eq!(store.get(&key).unwrap(), Some(value));
    }
}
