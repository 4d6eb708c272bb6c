//! Terminal client for the escape game.
//!
//! ```text
//! ClientConfig (env) ─→ content (bundled or ESCAPE_CONTENT_DIR)
//!                     ─→ repository (file or in-memory)
//!                     ─→ Runtime ─→ Repl (stdin lines, event printer)
//! ```
//!
//! The REPL only talks to the session through
//! [`SessionHandle`](escape_runtime::SessionHandle); every rule lives in
//! `escape-core`.

pub mod command;
pub mod config;
pub mod logging;
pub mod render;
pub mod repl;

pub use command::ReplCommand;
pub use config::ClientConfig;
pub use repl::{Repl, Step};
