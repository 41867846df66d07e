pub mod partition;
pub mod todo;
pub mod week;

pub use partition::Partition;
pub use todo::Todo;
pub use week::WeekEntry;
