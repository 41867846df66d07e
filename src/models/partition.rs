use clap::ValueEnum;
use serde::Serialize;

/// Side of a todo list a task sits in.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ValueEnum)]
pub enum Partition {
    Active,
    Done,
}

impl Partition {
    pub fn of(completed: bool) -> Self {
        if completed {
            Partition::Done
        } else {
            Partition::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Active => "active",
            Partition::Done => "done",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Partition::Active => Partition::Done,
            Partition::Done => Partition::Active,
        }
    }
}
