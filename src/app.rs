use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::store::{MongoStore, UserStore};
use crate::{config, database, schema};

/// Shared per-process state: the loaded configuration and the injected
/// user store. One instance is cloned into every worker.
#[derive(Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    users: Arc<dyn UserStore>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    #[tracing::instrument(skip_all)]
    pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
        let pool = database::Pool::new(&cfg.db)
            .await
            .change_context(AppError)?;

        schema::user::ensure(pool.database())
            .await
            .change_context(AppError)
            .attach_printable("could not install the users collection validator")?;

        Ok(Self {
            config: Arc::new(cfg),
            users: Arc::new(MongoStore::new(&pool)),
        })
    }

    /// Builds an [`App`] over an arbitrary store, bypassing the
    /// database bootstrap. This is the seam the handler tests use.
    pub fn with_store(cfg: config::Server, store: impl UserStore + 'static) -> Self {
        Self {
            config: Arc::new(cfg),
            users: Arc::new(store),
        }
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
