// Runtime configuration. Every value has a fixed default so the program
// runs with no setup; environment variables only override them.

use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_CATALOG_FILE: &str = "movies.json";
pub const DEFAULT_API_BASE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_API_KEY: &str = "3804dca";

#[derive(Clone)]
pub struct Config {
    /// JSON file holding the catalog.
    pub catalog_path: PathBuf,
    /// Metadata provider endpoint.
    pub api_base_url: String,
    /// Provider access key.
    pub api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            api_key: DEFAULT_API_KEY.into(),
        }
    }
}

// The access key never shows up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("catalog_path", &self.catalog_path)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Build the configuration from `MOVIE_CATALOG_FILE`, `OMDB_BASE_URL`
    /// and `OMDB_API_KEY`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        Config {
            catalog_path: lookup("MOVIE_CATALOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            api_base_url: lookup("OMDB_BASE_URL").unwrap_or(defaults.api_base_url),
            api_key: lookup("OMDB_API_KEY").unwrap_or(defaults.api_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.catalog_path, PathBuf::from("movies.json"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api_key, DEFAULT_API_KEY);
    }

    #[test]
    fn overrides_are_picked_up() {
        let config = Config::from_lookup(|key| match key {
            "MOVIE_CATALOG_FILE" => Some("/tmp/catalog.json".into()),
            "OMDB_API_KEY" => Some("secret".into()),
            _ => None,
        });
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/catalog.json"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = Config::from_lookup(|key| (key == "OMDB_API_KEY").then(|| "s3cr3t".to_string()));
        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("movies.json"));
    }
}
