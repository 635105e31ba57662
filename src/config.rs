use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Default number of results returned by recommendation queries when
    /// the request does not ask for a specific limit
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Vocabulary cap for the TF-IDF content index
    #[serde(default = "default_vectorizer_max_terms")]
    pub vectorizer_max_terms: usize,

    /// How many synthetic records to ingest at startup; 0 starts empty
    #[serde(default = "default_seed_catalog_size")]
    pub seed_catalog_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_recommendations() -> usize {
    8
}

fn default_vectorizer_max_terms() -> usize {
    5000
}

fn default_seed_catalog_size() -> usize {
    24
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_recommendations: default_max_recommendations(),
            vectorizer_max_terms: default_vectorizer_max_terms(),
            seed_catalog_size: default_seed_catalog_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_recommendations, 8);
        assert_eq!(config.vectorizer_max_terms, 5000);
    }
}
