use error_stack::Result;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use super::ParseError;

#[derive(Debug, Deserialize)]
pub struct Server {
    /// Address the HTTP server binds to.
    ///
    /// **Environment variables**:
    /// - `ROSTER_ADDRESS`
    #[serde(default = "Server::default_address")]
    pub address: IpAddr,
    /// Port the HTTP server binds to.
    ///
    /// **Environment variables**:
    /// - `ROSTER_PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    #[serde(default)]
    pub db: super::Database,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        Self::figment()
            .extract::<Self>()
            .map_err(super::attach_figment_error)
    }

    /// Creates a configuration suitable for tests that never touch a
    /// live deployment.
    #[doc(hidden)]
    pub fn for_tests() -> Self {
        Self {
            address: Self::default_address(),
            port: 0,
            db: super::Database::default(),
        }
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &str = "roster.toml";
    const DEFAULT_PORT: u16 = 5000;

    const fn default_address() -> IpAddr {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    }

    const fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }

    /// Creates a default [`Figment`] object to load server
    /// configuration. This function is there for implementing
    /// [`Server::load`] and testing.
    ///
    /// [`Figment`]: figment::Figment
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            // The env provider of figment mangles fields with an
            // underscore in their name, hence the explicit arm.
            .merge(Env::prefixed("ROSTER_").map(|v| match v.as_str() {
                "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),
                _ => v.as_str().replace('_', ".").into(),
            }))
            // Environment variable aliases
            .merge(Env::raw().map(|v| match v.as_str() {
                "MONGODB_URI" => "db.url".into(),
                _ => v.into(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::num::NonZeroU64;

    #[test]
    fn env_aliases() {
        Jail::expect_with(|jail| {
            jail.set_env("MONGODB_URI", "mongodb://mongo:27017/user_db");

            jail.set_env("ROSTER_ADDRESS", "127.0.0.1");
            jail.set_env("ROSTER_PORT", "8080");

            jail.set_env("ROSTER_DB_DATABASE", "directory");
            jail.set_env("ROSTER_DB_TIMEOUT_SECS", "30");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.address, "127.0.0.1".parse::<IpAddr>().unwrap());
            assert_eq!(config.port, 8080);

            assert_eq!(config.db.url, "mongodb://mongo:27017/user_db");
            assert_eq!(config.db.database.as_deref(), Some("directory"));
            assert_eq!(config.db.timeout_secs, NonZeroU64::new(30).unwrap());

            Ok(())
        });
    }

    // The raw alias is merged last on purpose: a bare MONGODB_URI
    // wins over the prefixed variable.
    #[test]
    fn alias_overrides_prefixed_url() {
        Jail::expect_with(|jail| {
            jail.set_env("ROSTER_DB_URL", "mongodb://other:27017/user_db");
            jail.set_env("MONGODB_URI", "mongodb://mongo:27017/user_db");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.db.url, "mongodb://mongo:27017/user_db");

            Ok(())
        });
    }

    #[test]
    fn defaults() {
        let config = Server::for_tests();
        assert_eq!(config.address, "0.0.0.0".parse::<IpAddr>().unwrap());
        assert_eq!(Server::DEFAULT_PORT, 5000);
        assert_eq!(config.db.url, "mongodb://localhost:27017/user_db");
        assert!(config.db.database.is_none());
        assert_eq!(config.db.timeout_secs, NonZeroU64::new(5).unwrap());
    }
}
