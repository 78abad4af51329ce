// API client module: a small blocking HTTP client that looks a movie up
// on the OMDb metadata provider and maps the answer onto a catalog
// record. One request per lookup; no retries and no caching.

use crate::config::Config;
use crate::error::FetchError;
use crate::model::{parse_leading_float, parse_leading_int, split_genres, MovieRecord};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;

/// Source of movie metadata keyed by title. The menu only depends on
/// this trait so lookups can be faked in tests.
pub trait MetadataFetcher {
    fn fetch(&self, title: &str) -> Result<MovieRecord, FetchError>;
}

/// Client for the OMDb title endpoint. Holds a reqwest blocking client,
/// the base URL and the access key.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Body returned by the title endpoint. Only the fields the catalog
/// needs are kept; `Response` is the literal text "True" or "False".
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct OmdbResponse {
    pub response: String,
    pub error: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub director: Option<String>,
    pub genre: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
}

impl OmdbResponse {
    /// Turn a decoded body into a record, or into the provider's own
    /// error when it reports `Response: "False"`.
    pub fn into_record(self) -> Result<MovieRecord, FetchError> {
        if self.response == "False" {
            let message = self.error.unwrap_or_else(|| "Unknown error".into());
            return Err(FetchError::Api(message));
        }
        let genre = self
            .genre
            .ok_or_else(|| FetchError::Decode("missing Genre field".into()))?;
        Ok(MovieRecord {
            name: self.title.unwrap_or_default(),
            release_year: self.year.as_deref().and_then(parse_leading_int),
            director: self.director.unwrap_or_default(),
            rating: self.imdb_rating.as_deref().and_then(parse_leading_float),
            genres: split_genres(&genre),
            ..MovieRecord::default()
        })
    }
}

impl OmdbClient {
    /// Create a client pointed at the configured base URL and key.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(OmdbClient {
            client,
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Full lookup URL for `title`, with the title percent-encoded.
    pub fn title_url(&self, title: &str) -> String {
        format!(
            "{}?t={}&apikey={}",
            self.base_url,
            urlencoding::encode(title),
            urlencoding::encode(&self.api_key)
        )
    }
}

impl MetadataFetcher for OmdbClient {
    fn fetch(&self, title: &str) -> Result<MovieRecord, FetchError> {
        log::info!("fetching metadata for {:?}", title);
        let res = self.client.get(self.title_url(title)).send()?;
        let status = res.status();
        if !status.is_success() {
            log::warn!("metadata lookup for {:?} failed with status {}", title, status);
            return Err(FetchError::Http(status.as_u16()));
        }
        let body: OmdbResponse = res
            .json()
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        body.into_record()
    }
}
