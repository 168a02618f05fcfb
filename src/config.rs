use std::net::SocketAddr;

use anyhow::Context;

const MIN_SECRET_KEY_BYTES: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub secret_key: String,
    pub database_url: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_rps: u32,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let secret_key = var("SECRET_KEY").context("SECRET_KEY must be set")?;
        if secret_key.len() < MIN_SECRET_KEY_BYTES {
            anyhow::bail!("SECRET_KEY must be at least {MIN_SECRET_KEY_BYTES} bytes");
        }

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://top-movies.db?mode=rwc".to_string());

        let tmdb_api_key = var("TMDB_API_KEY").unwrap_or_default();
        let tmdb_base_url =
            var("TMDB_BASE_URL").unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|| "https://image.tmdb.org/t/p/w500".to_string());

        let tmdb_rps: u32 = var("TMDB_RPS").and_then(|s| s.parse().ok()).unwrap_or(4);

        let http_timeout_secs: u64 =
            var("HTTP_TIMEOUT_SECS").and_then(|s| s.parse().ok()).unwrap_or(30);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            secret_key,
            database_url,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base_url,
            tmdb_rps,
            http_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let config = Config::from_vars(vars(&[("SECRET_KEY", SECRET)])).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.database_url, "sqlite://top-movies.db?mode=rwc");
        assert_eq!(config.tmdb_base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb_image_base_url, "https://image.tmdb.org/t/p/w500");
        assert!(config.tmdb_api_key.is_empty());
        assert_eq!(config.tmdb_rps, 4);
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_vars(vars(&[
            ("SECRET_KEY", SECRET),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("TMDB_API_KEY", "k"),
            ("TMDB_RPS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.tmdb_api_key, "k");
        assert_eq!(config.tmdb_rps, 10);
    }

    #[test]
    fn secret_key_is_required_and_long_enough() {
        assert!(Config::from_vars(vars(&[])).is_err());
        assert!(Config::from_vars(vars(&[("SECRET_KEY", "short")])).is_err());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_vars(vars(&[("SECRET_KEY", SECRET), ("PORT", "http")]));
        assert!(err.is_err());
    }
}
