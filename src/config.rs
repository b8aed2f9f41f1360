use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Process configuration.
///
/// Sources, later ones winning: built-in defaults, `FACTURES_*` environment
/// variables (e.g. `FACTURES_DATABASE_URL`), then a bare `PORT`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub loglevel: String,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_url: "sqlite:factures.db".to_string(),
            loglevel: "info".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("FACTURES_"))
            .merge(Env::raw().only(&["PORT"]))
    }

    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_port_5000() {
        let cfg = Config::default();
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.socket_addr(), "127.0.0.1:5000");
        assert_eq!(cfg.database_url, "sqlite:factures.db");
        assert!(cfg.cors_origins.is_empty());
    }

    #[test]
    fn defaults_provider_round_trips() {
        let cfg: Config = Figment::from(Serialized::defaults(Config::default()))
            .extract()
            .unwrap();
        assert_eq!(cfg, Config::default());
    }
}
