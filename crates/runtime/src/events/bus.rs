//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::types::{MiniGameEvent, NavigationEvent, ProgressEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Executed and rejected actions, saves
    Progress,
    /// Room transitions started, finished or blocked
    Navigation,
    /// Mini-game lifecycle and countdown
    MiniGame,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Progress, Topic::Navigation, Topic::MiniGame];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Progress(ProgressEvent),
    Navigation(NavigationEvent),
    MiniGame(MiniGameEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Progress(_) => Topic::Progress,
            Event::Navigation(_) => Topic::Navigation,
            Event::MiniGame(_) => Topic::MiniGame,
        }
    }
}

impl From<ProgressEvent> for Event {
    fn from(event: ProgressEvent) -> Self {
        Event::Progress(event)
    }
}

impl From<NavigationEvent> for Event {
    fn from(event: NavigationEvent) -> Self {
        Event::Navigation(event)
    }
}

impl From<MiniGameEvent> for Event {
    fn from(event: MiniGameEvent) -> Self {
        Event::MiniGame(event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic has its own broadcast channel, created
/// up front, so publishing never blocks.
#[derive(Clone)]
pub struct EventBus {
    progress: broadcast::Sender<Event>,
    navigation: broadcast::Sender<Event>,
    minigame: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            progress: broadcast::channel(capacity).0,
            navigation: broadcast::channel(capacity).0,
            minigame: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Progress => &self.progress,
            Topic::Navigation => &self.navigation,
            Topic::MiniGame => &self.minigame,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
