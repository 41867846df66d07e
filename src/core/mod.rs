pub mod tags;
pub mod todos;
pub mod transfer;
pub mod weekly;

pub use tags::TagDirectory;
pub use todos::{PendingToggle, TodoList};
