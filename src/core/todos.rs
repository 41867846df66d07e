//! Todo list of one (user, tag) pair, split into active and done partitions.
//!
//! The stored record is always `active ++ done`; every mutation persists the
//! whole list before returning.

use crate::errors::{AppError, AppResult};
use crate::keys::todos_key;
use crate::models::{Partition, Todo};
use crate::store::{LocalStore, read_json, write_json};
use crate::ui::messages::warning;
use chrono::Local;

/// A toggle that was proposed but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    todo: Todo,
}

impl PendingToggle {
    pub fn todo(&self) -> &Todo {
        &self.todo
    }

    /// Partition the todo lands in if the toggle is accepted.
    pub fn destination(&self) -> Partition {
        Partition::of(self.todo.completed).other()
    }
}

pub struct TodoList<'a> {
    store: &'a mut dyn LocalStore,
    key: String,
    active: Vec<Todo>,
    done: Vec<Todo>,
}

impl<'a> TodoList<'a> {
    /// Load the list stored for `user`/`tag`.
    ///
    /// A missing or undecodable record yields an empty list.
    pub fn load(store: &'a mut dyn LocalStore, user: &str, tag: &str) -> AppResult<Self> {
        let key = todos_key(user, tag);
        let todos: Vec<Todo> = match read_json(&*store, &key) {
            Ok(found) => found.unwrap_or_default(),
            Err(e @ AppError::MalformedRecord { .. }) => {
                warning(format!("{e}; starting from an empty list"));
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let (done, active): (Vec<Todo>, Vec<Todo>) =
            todos.into_iter().partition(|t| t.completed);

        Ok(Self {
            store,
            key,
            active,
            done,
        })
    }

    pub fn active(&self) -> &[Todo] {
        &self.active
    }

    pub fn done(&self) -> &[Todo] {
        &self.done
    }

    pub fn partition(&self, p: Partition) -> &[Todo] {
        match p {
            Partition::Active => &self.active,
            Partition::Done => &self.done,
        }
    }

    /// Stored order: active first, then done.
    pub fn all(&self) -> Vec<Todo> {
        self.active.iter().chain(self.done.iter()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.active.iter().chain(self.done.iter()).find(|t| t.id == id)
    }

    /// Resolve a user reference: an id, or a 1-based row of [`TodoList::all`].
    pub fn resolve_ref(&self, reference: &str) -> AppResult<Todo> {
        let reference = reference.trim();
        if let Some(t) = self.find(reference) {
            return Ok(t.clone());
        }

        if let Ok(row) = reference.parse::<usize>()
            && row >= 1
            && row <= self.len()
        {
            return Ok(self.all()[row - 1].clone());
        }

        Err(AppError::UnknownTodo(reference.to_string()))
    }

    fn persist(&mut self) -> AppResult<()> {
        let all = self.all();
        write_json(&mut *self.store, &self.key, &all)
    }

    fn next_id(&self) -> String {
        let mut candidate = Local::now().timestamp_millis();
        while self.find(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Append a new active todo.
    pub fn add(&mut self, text: &str) -> AppResult<Todo> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::BlankInput("todo text"));
        }

        let todo = Todo::new(self.next_id(), text);
        self.active.push(todo.clone());
        self.persist()?;
        Ok(todo)
    }

    pub fn delete(&mut self, id: &str) -> AppResult<Todo> {
        let removed = if let Some(pos) = self.active.iter().position(|t| t.id == id) {
            self.active.remove(pos)
        } else if let Some(pos) = self.done.iter().position(|t| t.id == id) {
            self.done.remove(pos)
        } else {
            return Err(AppError::UnknownTodo(id.to_string()));
        };

        self.persist()?;
        Ok(removed)
    }

    /// First phase of a toggle: stage the todo, nothing is written.
    pub fn propose_toggle(&self, id: &str) -> AppResult<PendingToggle> {
        let todo = self
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::UnknownTodo(id.to_string()))?;
        Ok(PendingToggle { todo })
    }

    /// Second phase of a toggle.
    ///
    /// Declining changes nothing. Accepting moves the todo to the end of
    /// the other partition and returns it.
    pub fn resolve(&mut self, pending: PendingToggle, accept: bool) -> AppResult<Option<Todo>> {
        if !accept {
            return Ok(None);
        }

        let id = pending.todo.id.as_str();
        let current = self
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::UnknownTodo(id.to_string()))?;

        self.active.retain(|t| t.id != id);
        self.done.retain(|t| t.id != id);

        let toggled = current.toggled();
        if toggled.completed {
            self.done.push(toggled.clone());
        } else {
            self.active.push(toggled.clone());
        }

        self.persist()?;
        Ok(Some(toggled))
    }

    /// Move one todo inside a partition.
    ///
    /// Returns `false` (and writes nothing) when source and destination
    /// partitions differ.
    pub fn reorder(
        &mut self,
        from_partition: Partition,
        from: usize,
        to_partition: Partition,
        to: usize,
    ) -> AppResult<bool> {
        if from_partition != to_partition {
            return Ok(false);
        }

        let list = match from_partition {
            Partition::Active => &mut self.active,
            Partition::Done => &mut self.done,
        };

        let len = list.len();
        if from >= len {
            return Err(AppError::InvalidIndex { index: from, len });
        }
        if to >= len {
            return Err(AppError::InvalidIndex { index: to, len });
        }

        let moved = list.remove(from);
        list.insert(to, moved);

        self.persist()?;
        Ok(true)
    }

    /// Replace a todo's text, keeping id, flag and position.
    pub fn edit(&mut self, id: &str, new_text: &str) -> AppResult<Todo> {
        let text = new_text.trim();
        if text.is_empty() {
            return Err(AppError::BlankInput("todo text"));
        }

        let todo = self
            .active
            .iter_mut()
            .chain(self.done.iter_mut())
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::UnknownTodo(id.to_string()))?;

        todo.text = text.to_string();
        let edited = todo.clone();

        self.persist()?;
        Ok(edited)
    }
}
