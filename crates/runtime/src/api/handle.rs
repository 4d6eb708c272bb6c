//! Cloneable façade for issuing commands to the session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! executing actions, playing mini-games or streaming events from specific
//! topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use escape_core::{Action, CoreId, Direction, GameState, StateDelta};

use super::errors::{Result, RuntimeError};
use super::view::{AnswerReport, MiniGameView};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Execute any engine action. A rejected action leaves the state unchanged.
    pub async fn execute(&self, action: impl Into<Action>) -> Result<StateDelta> {
        let action = action.into();
        self.request(|reply| Command::Execute { action, reply })
            .await?
    }

    /// Previous/next button: navigate from the current room.
    ///
    /// On success the session is `Transitioning`; the room switches once the
    /// configured transition delay has elapsed.
    pub async fn request_navigate(&self, direction: Direction) -> Result<StateDelta> {
        self.request(|reply| Command::Navigate { direction, reply })
            .await?
    }

    /// Room indicator click.
    pub async fn select_room(&self, index: usize) -> Result<StateDelta> {
        self.execute(Action::select_room(index)).await
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Open the mini-game bound to a locked core of the current room.
    pub async fn open_minigame(&self, core: CoreId) -> Result<MiniGameView> {
        self.request(|reply| Command::OpenMiniGame { core, reply })
            .await?
    }

    /// Submit an answer to the open mini-game.
    pub async fn answer_minigame(&self, input: impl Into<String>) -> Result<AnswerReport> {
        let input = input.into();
        self.request(|reply| Command::AnswerMiniGame { input, reply })
            .await?
    }

    /// Restart a lost run.
    pub async fn retry_minigame(&self) -> Result<MiniGameView> {
        self.request(|reply| Command::RetryMiniGame { reply })
            .await?
    }

    /// Close the open mini-game, stopping its countdown.
    pub async fn close_minigame(&self) -> Result<()> {
        self.request(|reply| Command::CloseMiniGame { reply })
            .await?
    }

    /// Snapshot of the open mini-game, if any.
    pub async fn minigame(&self) -> Result<Option<MiniGameView>> {
        self.request(|reply| Command::QueryMiniGame { reply }).await
    }

    /// Save the session to the configured repository.
    pub async fn save(&self) -> Result<()> {
        self.request(|reply| Command::Save { reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Progress` - Executed and rejected actions, saves
    /// - `Topic::Navigation` - Transitions started, finished or blocked
    /// - `Topic::MiniGame` - Mini-game lifecycle and countdown ticks
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use escape_runtime::Topic;
    ///
    /// let mut navigation = handle.subscribe(Topic::Navigation);
    /// while let Ok(event) = navigation.recv().await {
    ///     // Show advisories, animate transitions
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
