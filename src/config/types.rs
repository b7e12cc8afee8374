use serde::Deserialize;

/// Main configuration structure for funnelweb
///
/// Every field has a default, so a config file only needs to name the
/// settings it changes; running without a file uses the defaults shown on
/// the individual fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub text: TextConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of worker tasks in the crawl pool
    pub workers: usize,

    /// Whole-request timeout for one page fetch (milliseconds)
    #[serde(rename = "fetch-timeout-ms")]
    pub fetch_timeout_ms: u64,

    /// Connection-establishment timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms")]
    pub connect_timeout_ms: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler, as sent in the User-Agent header
    pub name: String,

    /// Version of the crawler
    pub version: String,

    /// Optional URL with information about the crawler, appended to the
    /// User-Agent header as "(+url)"
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

/// Text normalization configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Path to a stop word file, one word per line; the built-in English
    /// list is used when unset
    #[serde(rename = "stopwords-path")]
    pub stopwords_path: Option<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            fetch_timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "funnelweb".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.crawler.workers, 8);
        assert_eq!(config.crawler.fetch_timeout_ms, 10_000);
        assert_eq!(config.user_agent.name, "funnelweb");
        assert!(config.user_agent.contact_url.is_none());
        assert!(config.text.stopwords_path.is_none());
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.crawler.workers, 8);
        assert_eq!(config.user_agent.name, "funnelweb");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[crawler]
workers = 2
"#,
        )
        .unwrap();
        assert_eq!(config.crawler.workers, 2);
        // Untouched sections and fields fall back to their defaults.
        assert_eq!(config.crawler.fetch_timeout_ms, 10_000);
        assert_eq!(config.user_agent.name, "funnelweb");
    }
}
