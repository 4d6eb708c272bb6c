pub mod common;
pub mod item;
pub mod knowledge;

pub use common::{ExamineState, Language, NavigationPhase, RoomIndex, UiState};
pub use item::{InventoryState, ItemRecord};
pub use knowledge::{KnowledgeRecord, KnowledgeState};
