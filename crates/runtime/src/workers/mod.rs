//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the game state and executes every command; timer
//! tasks it spawns only post messages back to it.

mod session;

pub use session::{Command, SessionWorker};
