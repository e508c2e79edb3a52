use error_stack::ResultExt;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::time::Duration;

use crate::config;
use crate::models::User;

mod error;
pub use error::*;

/// Name of the collection holding every user record.
pub const USERS_COLLECTION: &str = "users";

/// A long-lived handle to the database holding the users collection.
///
/// The underlying driver maintains its own connection pool; one handle
/// is shared for the process lifetime.
#[derive(Clone)]
pub struct Pool {
    db: mongodb::Database,
}

impl Pool {
    pub(crate) async fn new(cfg: &config::Database) -> Result<Self> {
        let mut opts = ClientOptions::parse(&cfg.url)
            .await
            .change_context(Error::InvalidUrl)?;
        opts.server_selection_timeout = Some(Duration::from_secs(cfg.timeout_secs.get()));

        let client = Client::with_options(opts).into_db_error()?;
        let db = match cfg.database.as_deref() {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .ok_or_else(|| error_stack::Report::new(Error::InvalidUrl))
                .attach_printable("connection url does not name a database")?,
        };

        let pool = Self { db };
        match pool.wait_until_healthy().await {
            Ok(()) => {}
            Err(err) if err.is_unhealthy() => {
                tracing::warn!(report = ?err, "deployment is not reachable yet, connecting lazily");
            }
            Err(err) => return Err(err),
        }

        Ok(pool)
    }

    pub fn database(&self) -> &mongodb::Database {
        &self.db
    }

    pub fn users(&self) -> mongodb::Collection<User> {
        self.db.collection(USERS_COLLECTION)
    }

    #[tracing::instrument(name = "db.ping", skip(self))]
    pub async fn wait_until_healthy(&self) -> Result<()> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .change_context(Error::Unhealthy)?;

        Ok(())
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("database", &self.db.name())
            .finish()
    }
}
