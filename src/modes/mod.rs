pub mod human;
pub mod scheduler;

pub use human::{HumanMode, SessionReport};
pub use scheduler::TickScheduler;
