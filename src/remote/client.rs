//! HTTP implementation of [`CatalogSource`] for the PokéAPI.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{DexError, Result};
use crate::types::{Category, Entry, EntryKey, Summary, SummaryPage};

use super::CatalogSource;
use super::wire::{self, ListResponse, PokemonResponse, TypeResponse};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// PokéAPI client.
///
/// One GET per operation. Failures are returned as-is; there is no retry.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: Url,
}

impl PokeApiClient {
    /// Create a client from configuration.
    ///
    /// The configured timeouts become the transport defaults for every request.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("dexview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DexError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url)?,
        })
    }

    /// Create a client for `base_url` with default timeouts.
    pub fn new(base_url: &str) -> Result<Self> {
        let config = Config {
            base_url: base_url.to_string(),
            ..Config::default()
        };
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DexError::Config(format!("invalid endpoint path '{path}': {e}")))
    }

    /// GET `url` and decode the JSON body.
    ///
    /// 404 maps to `NotFound(subject)`, any other non-success status and all
    /// transport failures map to `Network`, unparseable bodies to `Decode`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, subject: &str) -> Result<T> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DexError::from_http(e, subject))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DexError::NotFound(subject.to_string()));
        }
        if !status.is_success() {
            return Err(DexError::Network(format!("HTTP {status} from {url}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DexError::from_http(e, subject))?;

        wire::decode(&body, subject)
    }

    /// Detail endpoint for `key`; names are pushed as one escaped path
    /// segment so they cannot address another resource.
    fn entry_url(&self, key: &EntryKey) -> Result<Url> {
        let mut url = self.endpoint("pokemon")?;
        url.path_segments_mut()
            .map_err(|_| {
                DexError::Config(format!("base_url '{}' cannot be used as a base", self.base_url))
            })?
            .push(&key.path_segment());
        Ok(url)
    }

    async fn fetch_entry(&self, url: Url, subject: &str) -> Result<Entry> {
        let response: PokemonResponse = self.get_json(url, subject).await?;
        Entry::try_from(response)
    }
}

#[async_trait::async_trait]
impl CatalogSource for PokeApiClient {
    async fn list_summaries(&self, offset: u32, limit: u32) -> Result<SummaryPage> {
        let mut url = self.endpoint("pokemon")?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());

        let response: ListResponse = self.get_json(url, "pokemon list").await?;
        Ok(response.into())
    }

    async fn get_entry(&self, key: &EntryKey) -> Result<Entry> {
        let subject = format!("pokemon/{key}");
        let url = self.entry_url(key)?;
        self.fetch_entry(url, &subject).await
    }

    async fn get_entry_at(&self, reference: &str) -> Result<Entry> {
        let url = Url::parse(reference)
            .map_err(|e| DexError::Decode(format!("invalid entry reference '{reference}': {e}")))?;
        self.fetch_entry(url, reference).await
    }

    async fn get_category_group(&self, category: Category) -> Result<Vec<Summary>> {
        let subject = format!("type/{category}");
        let url = self.endpoint(&subject)?;
        let response: TypeResponse = self.get_json(url, &subject).await?;
        Ok(response.into())
    }
}

/// Parse the base URL and make sure relative joins append to its path.
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url.trim())
        .map_err(|e| DexError::Config(format!("invalid base_url '{base_url}': {e}")))?;

    if url.cannot_be_a_base() {
        return Err(DexError::Config(format!(
            "base_url '{base_url}' cannot be used as a base"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
