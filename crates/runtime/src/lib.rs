//! Runtime orchestration for an escape-room session.
//!
//! This crate wires together the content catalog, the progression engine,
//! repositories, and the session worker into a cohesive runtime API.
//! Consumers embed [`Runtime`] to start a session, subscribe to events, and
//! play through [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists session state
//! - `workers` keeps the session task internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{AnswerReport, MiniGameView, Result, RuntimeError, SessionHandle};
pub use events::{Event, EventBus, MiniGameEvent, NavigationEvent, ProgressEvent, Topic};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, SaveFile, StateRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
