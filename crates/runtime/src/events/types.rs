//! Event types for different topics.

use escape_core::{
    Action, AnswerFeedback, CoreId, MiniGameOutcome, NavigationError, RoomIndex, StateDelta,
    TransitionPhase,
};
use serde::{Deserialize, Serialize};

/// Events related to progression (executed and rejected actions, saves)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// An action was executed with resulting state changes
    ActionExecuted {
        /// Nonce after execution.
        nonce: u64,
        action: Action,
        delta: Box<StateDelta>,
    },

    /// An action was rejected; the state is unchanged
    ActionRejected {
        nonce: u64,
        action: Action,
        phase: TransitionPhase,
        code: String,
        error: String,
    },

    /// The session was written to the state repository
    Saved { session_id: String, nonce: u64 },
}

/// Events related to room-to-room navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NavigationEvent {
    /// The gate accepted a request; the room switches after the transition delay
    Started { from: RoomIndex, target: RoomIndex },

    /// The transition completed and `room` is now current
    Finished { room: RoomIndex },

    /// The gate rejected a request. `advisory` is the message to show the
    /// player in the session language, if any.
    Blocked {
        error: NavigationError,
        advisory: Option<String>,
    },
}

/// Events related to mini-games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MiniGameEvent {
    Opened {
        core: CoreId,
        question_count: usize,
        time_left: Option<u32>,
    },

    Answered {
        core: CoreId,
        step: usize,
        feedback: AnswerFeedback,
    },

    /// Countdown tick of a timed game
    Tick { core: CoreId, time_left: u32 },

    Finished {
        core: CoreId,
        outcome: MiniGameOutcome,
    },

    /// A lost run restarted from the first question
    Retried { core: CoreId },

    Closed { core: CoreId },
}
