/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Delay between an accepted navigation request and the room switch.
    /// The host schedules `FinishNavigation` after this many milliseconds.
    pub transition_delay_ms: u64,
    /// Minimum share (percent) of correct answers needed to pass a scored quiz.
    pub quiz_pass_percent: u8,
    /// Default time limit for timed challenges that do not set their own.
    pub timed_limit_secs: u32,
    /// Default penalty subtracted from the countdown on a wrong answer.
    pub timed_penalty_secs: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Number of sequential rooms.
    pub const ROOM_COUNT: usize = 3;
    /// Number of dials on the Room 1 combination box.
    pub const DIAL_COUNT: usize = 4;
    /// Positions per dial; dial values live in `0..DIAL_POSITIONS`.
    pub const DIAL_POSITIONS: u8 = 4;
    /// Dial combination that opens the Room 1 box (factory, fist, book, justice).
    pub const CORRECT_COMBINATION: [u8; Self::DIAL_COUNT] = [2, 1, 0, 2];

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 500;
    pub const DEFAULT_QUIZ_PASS_PERCENT: u8 = 60;
    pub const DEFAULT_TIMED_LIMIT_SECS: u32 = 120;
    pub const DEFAULT_TIMED_PENALTY_SECS: u32 = 5;

    pub fn new() -> Self {
        Self {
            transition_delay_ms: Self::DEFAULT_TRANSITION_DELAY_MS,
            quiz_pass_percent: Self::DEFAULT_QUIZ_PASS_PERCENT,
            timed_limit_secs: Self::DEFAULT_TIMED_LIMIT_SECS,
            timed_penalty_secs: Self::DEFAULT_TIMED_PENALTY_SECS,
        }
    }

    pub fn with_transition_delay_ms(transition_delay_ms: u64) -> Self {
        Self {
            transition_delay_ms,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
