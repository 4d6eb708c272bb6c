//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during play: the saved game state of
//! each session. Static game content (knowledge, items, challenges) is served
//! by the content catalog, not by repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileStateRepository, SaveFile};
pub use memory::InMemoryStateRepo;
pub use traits::{StateRepository, validate_session_id};
