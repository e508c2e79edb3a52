use serde::Deserialize;
use std::num::NonZeroU64;

/// Configuration for connecting to the MongoDB deployment holding
/// the users collection.
#[derive(Debug, Deserialize)]
pub struct Database {
    /// Connection URL for the MongoDB deployment.
    ///
    /// **Environment variables**:
    /// - `ROSTER_DB_URL` or `MONGODB_URI`
    #[serde(default = "Database::default_url")]
    pub url: String,
    /// Name of the database holding the users collection. Defaults to
    /// the database named in the connection URL path.
    ///
    /// **Environment variables**:
    /// - `ROSTER_DB_DATABASE`
    #[serde(default)]
    pub database: Option<String>,
    /// How long the driver can wait for a reachable server before a
    /// store operation is given up on.
    ///
    /// **Environment variables**:
    /// - `ROSTER_DB_TIMEOUT_SECS`
    #[serde(default = "Database::default_timeout_secs")]
    pub timeout_secs: NonZeroU64,
}

impl Database {
    const DEFAULT_URL: &str = "mongodb://localhost:27017/user_db";
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    fn default_url() -> String {
        Self::DEFAULT_URL.into()
    }

    // Required by serde
    const fn default_timeout_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TIMEOUT_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TIMEOUT_SECS is accidentally set to 0"),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            database: None,
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}
