//! Deterministic progression rules for the three-room escape game.
//!
//! `escape-core` defines the canonical state machine (rooms, inventory,
//! knowledge, navigation gate, mini-games) and exposes pure APIs reused by the
//! runtime and by tests. All state mutation flows through
//! [`engine::GameEngine`]; supporting crates depend on the types re-exported
//! here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod minigame;
pub mod navigation;
pub mod rooms;
pub mod state;

pub use action::{
    Action, ActionTransition, CoreAction, ResetPolicy, Room1Action, Room1Error, Room3Action,
    StoreAction, StoreError,
};
pub use config::GameConfig;
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError,
};
pub use env::{ContentOracle, GameEnv, OracleError, RoomInfo};
pub use error::{ErrorSeverity, GameError};
pub use minigame::{
    Answer, AnswerFeedback, ChallengeMode, ChallengeSpec, MiniGame, MiniGameError,
    MiniGameOutcome, Question,
};
pub use navigation::{Direction, NavigationAction, NavigationError};
pub use rooms::{
    CoreBoard, CoreError, CoreId, CoreStatus, PuzzleModule, Room1State, Room2State, Room3State,
    RoomsState,
};
pub use state::{
    CoreChange, ExamineState, GameState, InventoryState, ItemRecord, KnowledgeRecord,
    KnowledgeState, Language, Latch, NavigationPhase, RoomIndex, StateDelta, UiState,
};
