//! JSON export / import of one nickname's data.
//!
//! The canonical document is
//!
//! ```json
//! { "nickname": "...", "tags": { "<tag>": [Todo, ...] }, "weekly": { "YYYY-MM": [WeekEntry, ...] } }
//! ```
//!
//! where the key order of `tags` is the tag directory order. The older flat
//! shape (`{ "nickname": "...", "<raw key>": "<raw json>" }`) is still
//! accepted on import and can be produced with [`export_legacy`].

use crate::errors::{AppError, AppResult};
use crate::keys::{StorageKey, tags_key, todos_key, weekly_prefix};
use crate::models::{Todo, WeekEntry};
use crate::store::{LocalStore, StoreOp, read_json};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Tag lists in directory order, encoded as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagLists(pub Vec<(String, Vec<Todo>)>);

impl TagLists {
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn get(&self, tag: &str) -> Option<&[Todo]> {
        self.0
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, todos)| todos.as_slice())
    }
}

impl Serialize for TagLists {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, todos) in &self.0 {
            map.serialize_entry(name, todos)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TagLists {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagListsVisitor;

        impl<'de> Visitor<'de> for TagListsVisitor {
            type Value = TagLists;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping tag names to todo arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TagLists, A::Error> {
                let mut lists: Vec<(String, Vec<Todo>)> = Vec::new();
                while let Some((name, todos)) = access.next_entry::<String, Vec<Todo>>()? {
                    // A repeated key replaces the earlier list in place
                    match lists.iter_mut().find(|(n, _)| *n == name) {
                        Some(slot) => slot.1 = todos,
                        None => lists.push((name, todos)),
                    }
                }
                Ok(TagLists(lists))
            }
        }

        deserializer.deserialize_map(TagListsVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub nickname: String,
    pub tags: TagLists,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weekly: BTreeMap<String, Vec<WeekEntry>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportShape {
    Structured,
    LegacyFlat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Nickname whose namespace was written.
    pub target: String,
    /// The file belonged to another nickname than the active session and
    /// was written under its own nickname.
    pub redirected: bool,
    pub shape: ImportShape,
    /// Number of keys written or removed.
    pub keys_written: usize,
}

/// Snapshot `user`'s tags, todo lists and weekly notes. Nothing is written.
pub fn export(store: &dyn LocalStore, user: &str) -> AppResult<ExportDocument> {
    let tags: Vec<String> = read_json(store, &tags_key(user))?.unwrap_or_default();

    let mut lists = Vec::with_capacity(tags.len());
    for tag in tags {
        let todos: Vec<Todo> = read_json(store, &todos_key(user, &tag))?.unwrap_or_default();
        lists.push((tag, todos));
    }

    let mut weekly = BTreeMap::new();
    for key in store.keys_with_prefix(&weekly_prefix(user))? {
        let Some(bucket) = StorageKey::parse(user, &key).and_then(|k| k.bucket_id()) else {
            continue;
        };
        let entries: Vec<WeekEntry> = read_json(store, &key)?.unwrap_or_default();
        weekly.insert(bucket, entries);
    }

    Ok(ExportDocument {
        nickname: user.to_string(),
        tags: TagLists(lists),
        weekly,
    })
}

/// Flat export: every key of `user` with its raw stored string.
///
/// Todo lists are taken from the tag directory, so keys of nicknames that
/// share the prefix (`<user>_todos`, ...) are never picked up.
pub fn export_legacy(store: &dyn LocalStore, user: &str) -> AppResult<Map<String, Value>> {
    let mut keys = vec![tags_key(user)];
    let tags: Vec<String> = read_json(store, &tags_key(user))?.unwrap_or_default();
    keys.extend(tags.iter().map(|t| todos_key(user, t)));
    keys.extend(
        store
            .keys_with_prefix(&weekly_prefix(user))?
            .into_iter()
            .filter(|k| matches!(StorageKey::parse(user, k), Some(StorageKey::Weekly { .. }))),
    );

    let mut out = Map::new();
    out.insert("nickname".into(), Value::String(user.to_string()));
    for key in keys {
        if let Some(raw) = store.get(&key)? {
            out.insert(key, Value::String(raw));
        }
    }
    Ok(out)
}

fn malformed(reason: impl Into<String>) -> AppError {
    AppError::MalformedImportFile(reason.into())
}

/// Restore a document produced by [`export`] or [`export_legacy`].
///
/// The data goes to the nickname embedded in the file, or to
/// `current_user` when `as_current` is set. Nothing is written unless the
/// whole document validates.
pub fn import(
    store: &mut dyn LocalStore,
    raw: &str,
    current_user: Option<&str>,
    as_current: bool,
) -> AppResult<ImportOutcome> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| malformed(format!("not valid JSON: {e}")))?;
    let Value::Object(obj) = value else {
        return Err(malformed("top-level value must be an object"));
    };

    let file_nick = match obj.get("nickname") {
        Some(Value::String(n)) if !n.trim().is_empty() => n.trim().to_string(),
        Some(_) => return Err(malformed("'nickname' must be a non-empty string")),
        None => return Err(malformed("missing 'nickname' field")),
    };

    let (target, redirected) = if as_current {
        (current_user.ok_or(AppError::NoSession)?.to_string(), false)
    } else {
        let redirected = current_user.is_some_and(|c| c != file_nick);
        (file_nick.clone(), redirected)
    };

    let (shape, ops) = if obj.contains_key("tags") {
        let doc: ExportDocument = serde_json::from_value(Value::Object(obj))
            .map_err(|e| malformed(e.to_string()))?;
        (ImportShape::Structured, structured_ops(&*store, &doc, &target)?)
    } else {
        (ImportShape::LegacyFlat, legacy_ops(&obj, &file_nick, &target)?)
    };

    let keys_written = ops.len();
    store.apply(ops)?;

    Ok(ImportOutcome {
        target,
        redirected,
        shape,
        keys_written,
    })
}

fn structured_ops(
    store: &dyn LocalStore,
    doc: &ExportDocument,
    target: &str,
) -> AppResult<Vec<StoreOp>> {
    let names = doc.tags.names();
    if names.iter().any(|n| n.trim().is_empty()) {
        return Err(malformed("tag names must not be empty"));
    }

    let mut ops = vec![StoreOp::set_json(tags_key(target), &names)?];
    for (name, todos) in &doc.tags.0 {
        ops.push(StoreOp::set_json(todos_key(target, name), todos)?);
    }

    // Full replace: lists of previously listed tags missing from the file go away
    let previous: Vec<String> = match read_json(store, &tags_key(target)) {
        Ok(found) => found.unwrap_or_default(),
        Err(AppError::MalformedRecord { .. }) => Vec::new(),
        Err(e) => return Err(e),
    };
    for tag in previous.iter().filter(|t| !names.contains(t)) {
        ops.push(StoreOp::remove(todos_key(target, tag)));
    }

    for (bucket, entries) in &doc.weekly {
        let key = StorageKey::from_bucket_id(target, bucket)
            .ok_or_else(|| malformed(format!("invalid weekly bucket '{bucket}'")))?;
        ops.push(StoreOp::set_json(key.to_string(), entries)?);
    }

    Ok(ops)
}

fn legacy_ops(obj: &Map<String, Value>, file_nick: &str, target: &str) -> AppResult<Vec<StoreOp>> {
    let mut ops = Vec::new();

    for (key, value) in obj {
        if key == "nickname" {
            continue;
        }
        let Value::String(raw) = value else {
            return Err(malformed(format!("value of '{key}' must be a string")));
        };
        let Some(parsed) = StorageKey::parse(file_nick, key) else {
            return Err(malformed(format!(
                "key '{key}' is not a record of nickname '{file_nick}'"
            )));
        };
        check_record(&parsed, key, raw)?;

        let retargeted = match parsed {
            StorageKey::Tags { .. } => StorageKey::tags(target),
            StorageKey::Todos { tag, .. } => StorageKey::todos(target, &tag),
            StorageKey::Weekly { year, month, .. } => StorageKey::weekly(target, year, month),
        };
        ops.push(StoreOp::set(retargeted.to_string(), raw.clone()));
    }

    if ops.is_empty() {
        return Err(malformed("no 'tags' and no stored keys found"));
    }
    Ok(ops)
}

/// The raw string must decode as the record type its key names.
fn check_record(key: &StorageKey, name: &str, raw: &str) -> AppResult<()> {
    let decoded = match key {
        StorageKey::Tags { .. } => serde_json::from_str::<Vec<String>>(raw).map(|_| ()),
        StorageKey::Todos { .. } => serde_json::from_str::<Vec<Todo>>(raw).map(|_| ()),
        StorageKey::Weekly { .. } => serde_json::from_str::<Vec<WeekEntry>>(raw).map(|_| ()),
    };
    decoded.map_err(|e| malformed(format!("record '{name}' is invalid: {e}")))
}

/// Pretty JSON text of a document, as written to export files.
pub fn to_pretty_json<T: Serialize>(doc: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}
