use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::{AppError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://itunes.apple.com/search";
pub const DEFAULT_LIMIT: u32 = 200;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What the parser does with a recognized item that lacks a mandatory field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedItemPolicy {
    /// Drop the item, log it, keep parsing.
    #[default]
    Skip,
    /// Fail the whole parse.
    Abort,
}

impl FromStr for MalformedItemPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(MalformedItemPolicy::Skip),
            "abort" => Ok(MalformedItemPolicy::Abort),
            other => Err(AppError::Configuration(format!(
                "unknown malformed item policy: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: Url,
    pub limit: u32,
    pub timeout: Duration,
    pub user_agent: String,
    pub malformed_items: MalformedItemPolicy,
    /// Upper bound on time spent retrying a failed search fetch. Zero disables retries.
    pub retry_window: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            limit: DEFAULT_LIMIT,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("store-search/{}", env!("CARGO_PKG_VERSION")),
            malformed_items: MalformedItemPolicy::default(),
            retry_window: Duration::ZERO,
        }
    }
}

impl SearchConfig {
    /// Defaults overlaid with `STORE_SEARCH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SearchConfig::default();

        if let Some(endpoint) = lookup("STORE_SEARCH_ENDPOINT") {
            config.endpoint = Url::parse(&endpoint)?;
        }
        if let Some(limit) = lookup("STORE_SEARCH_LIMIT") {
            config.limit = parse_number("STORE_SEARCH_LIMIT", &limit)?;
        }
        if let Some(secs) = lookup("STORE_SEARCH_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_number("STORE_SEARCH_TIMEOUT_SECS", &secs)?);
        }
        if let Some(agent) = lookup("STORE_SEARCH_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(policy) = lookup("STORE_SEARCH_MALFORMED") {
            config.malformed_items = policy.parse()?;
        }
        if let Some(secs) = lookup("STORE_SEARCH_RETRY_SECS") {
            config.retry_window =
                Duration::from_secs(parse_number("STORE_SEARCH_RETRY_SECS", &secs)?);
        }

        Ok(config)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Configuration(format!("{key} is not a number: {value}")))
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
    fn defaults_match_store_endpoint() {
        let config = SearchConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.endpoint.as_str(), "https://itunes.apple.com/search");
        assert_eq!(config.limit, 200);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.malformed_items, MalformedItemPolicy::Skip);
        assert_eq!(config.retry_window, Duration::ZERO);
    }

    #[test]
    fn environment_overrides_apply() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            ("STORE_SEARCH_LIMIT", "25"),
            ("STORE_SEARCH_MALFORMED", "Abort"),
            ("STORE_SEARCH_RETRY_SECS", "3"),
            ("STORE_SEARCH_USER_AGENT", "tests"),
        ]))
        .unwrap();
        assert_eq!(config.limit, 25);
        assert_eq!(config.malformed_items, MalformedItemPolicy::Abort);
        assert_eq!(config.retry_window, Duration::from_secs(3));
        assert_eq!(config.user_agent, "tests");
    }

    #[test]
    fn bad_values_are_configuration_errors() {
        let err = SearchConfig::from_lookup(lookup_from(&[("STORE_SEARCH_LIMIT", "lots")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));

        let err = SearchConfig::from_lookup(lookup_from(&[("STORE_SEARCH_ENDPOINT", "nope")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
