use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_EXPIRATION_HOURS: i64 = 24;
/// One year
const MAX_TOKEN_EXPIRATION_HOURS: i64 = 24 * 366;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings read from the environment (and `.env`, if present)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_expiration_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_expiration_hours = match lookup("TOKEN_EXPIRATION_HOURS") {
            None => DEFAULT_TOKEN_EXPIRATION_HOURS,
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|hours| (1..=MAX_TOKEN_EXPIRATION_HOURS).contains(hours))
                .ok_or(ConfigError::Invalid {
                    key: "TOKEN_EXPIRATION_HOURS",
                    value,
                })?,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_expiration_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("JWT_SECRET", "secret")]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.token_expiration_hours, 24);
        assert_eq!(config.jwt_secret, "secret");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = load(&[
            ("JWT_SECRET", "secret"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("TOKEN_EXPIRATION_HOURS", "2"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.token_expiration_hours, 2);
    }

    #[test]
    fn longest_lifetime_is_accepted() {
        let max = MAX_TOKEN_EXPIRATION_HOURS.to_string();
        let config = load(&[
            ("JWT_SECRET", "secret"),
            ("TOKEN_EXPIRATION_HOURS", max.as_str()),
        ])
        .unwrap();
        assert_eq!(config.token_expiration_hours, MAX_TOKEN_EXPIRATION_HOURS);
    }

    #[rstest]
    #[case(&[])]
    #[case(&[("JWT_SECRET", "")])]
    fn secret_is_required(#[case] vars: &[(&str, &str)]) {
        assert!(matches!(load(vars), Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[rstest]
    #[case("BIND_ADDR", "not-an-address")]
    #[case("TOKEN_EXPIRATION_HOURS", "0")]
    #[case("TOKEN_EXPIRATION_HOURS", "soon")]
    #[case("TOKEN_EXPIRATION_HOURS", "-3")]
    #[case("TOKEN_EXPIRATION_HOURS", "10000000000")]
    fn invalid_values_are_rejected(#[case] key: &'static str, #[case] value: &str) {
        let result = load(&[("JWT_SECRET", "secret"), (key, value)]);
        assert!(matches!(result, Err(ConfigError::Invalid { key: k, .. }) if k == key));
    }
}
