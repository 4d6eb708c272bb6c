//! `escape` binary: the composition root.
//!
//! ```bash
//! # Play in Vietnamese with a separate save slot and file logs
//! ESCAPE_LANGUAGE=vi ESCAPE_SESSION_ID=slot-2 ESCAPE_LOG_DIR=./logs cargo run -p escape-client
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};

use escape_content::{Catalog, ConfigLoader, ContentFactory};
use escape_core::{ContentOracle, StoreAction};
use escape_runtime::Runtime;

use escape_client::{ClientConfig, Repl, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let _log_guard = logging::setup_logging(config.log_dir.as_deref(), &config.session_id)?;

    tracing::info!("Starting escape client");
    tracing::info!("Session ID: {}", config.session_id);
    tracing::info!("Persistence: {}", config.enable_persistence);

    // 3. Content and tunables
    let (catalog, base_config) = match &config.content_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let base_config = factory.load_config()?;
            let catalog = factory
                .load_catalog_with(&base_config)
                .with_context(|| format!("loading content from {}", dir.display()))?;
            (catalog, base_config)
        }
        None => {
            let base_config = ConfigLoader::builtin()?;
            (Catalog::builtin_with(&base_config)?, base_config)
        }
    };
    let content: Arc<dyn ContentOracle> = Arc::new(catalog);

    // 4. Repository
    let repository = config.open_repository()?;

    // 5. Runtime
    let mut builder = Runtime::builder()
        .config(config.runtime_config(base_config))
        .session_id(config.session_id.clone())
        .content(Arc::clone(&content));
    if let Some(repository) = repository {
        builder = builder.repository(repository);
    }
    let runtime = builder.build().await?;
    tracing::info!("Runtime built successfully");

    let handle = runtime.handle();
    if let Some(language) = config.language {
        handle.execute(StoreAction::SetLanguage(language)).await?;
    }

    // 6. Run
    Repl::new(handle, content).run().await?;

    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    Ok(())
}
