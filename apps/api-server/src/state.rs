//! Application state - shared across all handlers.

use std::sync::Arc;

use agora_core::ContentRepository;
use agora_infra::InMemoryStore;
use agora_infra::database::DatabaseConfig;

#[cfg(feature = "postgres")]
use agora_infra::database::{
    DatabaseConnections, PostgresPostRepository, PostgresProfileRepository,
};

/// Which row store backs the content repository.
#[derive(Clone)]
pub enum Storage {
    #[cfg(feature = "postgres")]
    Postgres(Arc<DatabaseConnections>),
    Memory,
}

impl Storage {
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "postgres")]
            Storage::Postgres(_) => "postgres",
            Storage::Memory => "memory",
        }
    }

    /// Whether the backing store answers.
    pub async fn is_reachable(&self) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            Storage::Postgres(db) => db
                .ping()
                .await
                .inspect_err(|e| tracing::error!("Database ping failed: {}", e))
                .is_ok(),
            Storage::Memory => true,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentRepository,
    pub storage: Storage,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let content = ContentRepository::new(
                            Arc::new(PostgresProfileRepository::new(conn.main.clone())),
                            Arc::new(PostgresPostRepository::new(conn.main.clone())),
                        );
                        tracing::info!("Application state initialized (postgres)");
                        return Self {
                            content,
                            storage: Storage::Postgres(conn),
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
        }

        Self::in_memory(Arc::new(InMemoryStore::new()))
    }

    /// State backed by the given in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        tracing::info!("Application state initialized (in-memory)");
        Self {
            content: ContentRepository::new(store.clone(), store),
            storage: Storage::Memory,
        }
    }
}
