use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LISTINGS_URL: &str = "https://www.dailyinfo.co.uk/whats-on/listings";
const DEFAULT_NUM_LISTINGS: u32 = 120;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub listings_url: String,
    pub num_listings: u32,
    pub fetch_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            listings_url: DEFAULT_LISTINGS_URL.to_string(),
            num_listings: DEFAULT_NUM_LISTINGS,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Reads settings from the process environment. Values that fail to
    /// parse fall back to their defaults. Call [`load_dotenv`] first to
    /// pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let port = lookup("PORT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let listings_url = lookup("LISTINGS_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.listings_url);
        let num_listings = lookup("NUM_LISTINGS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(defaults.num_listings);
        let fetch_timeout = lookup("FETCH_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout);

        Self {
            port,
            listings_url,
            num_listings,
            fetch_timeout,
        }
    }
}

/// Loads a `.env` file into the process environment if one exists.
/// Runs before logging is set up so `RUST_LOG` can come from the file;
/// the returned message describes a file that exists but failed to load.
pub fn load_dotenv() -> Option<String> {
    match dotenvy::dotenv() {
        Ok(_) => None,
        Err(err) if err.not_found() => None,
        Err(err) => Some(format!("failed to load .env: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.port, 8000);
        assert_eq!(config.num_listings, 120);
        assert_eq!(config.fetch_timeout, Duration::from_secs(20));
        assert_eq!(
            config.listings_url,
            "https://www.dailyinfo.co.uk/whats-on/listings"
        );
    }

    #[test]
    fn lookup_defaults_match_default_impl() {
        let defaults = AppConfig::default();
        let config = AppConfig::from_lookup(lookup_from(&[("PORT", "")]));
        assert_eq!(config.port, defaults.port);
        assert_eq!(config.listings_url, defaults.listings_url);
        assert_eq!(config.num_listings, defaults.num_listings);
        assert_eq!(config.fetch_timeout, defaults.fetch_timeout);
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "5000"),
            ("NUM_LISTINGS", "lots"),
            ("FETCH_TIMEOUT_SECS", "0"),
            ("LISTINGS_URL", "http://localhost:9999/listings"),
        ]));
        assert_eq!(config.port, 5000);
        assert_eq!(config.num_listings, 120);
        assert_eq!(config.fetch_timeout, Duration::from_secs(20));
        assert_eq!(config.listings_url, "http://localhost:9999/listings");
    }
}
