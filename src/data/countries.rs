//! REST Countries API gateway
//!
//! This module provides the single point of access to the external
//! country-data provider. Every lookup consults the in-memory cache first;
//! misses go to the network and successful results are stored before being
//! returned. Failures are surfaced to the caller and never cached, so the
//! next call for the same key retries the network.

use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::{Country, Region};
use crate::cache::{CacheStore, CachedLookup};

/// Base URL for the REST Countries API
const REST_COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Errors that can occur when fetching country data
///
/// Every variant carries the query key of the failing operation so callers
/// can report which lookup went wrong.
#[derive(Debug, Error)]
pub enum CountryError {
    /// Transport failure, timeout, or a non-success status other than 404
    #[error("request for `{query}` failed: {source}")]
    Network {
        /// The query key being resolved
        query: String,
        /// The underlying transport or status error
        #[source]
        source: reqwest::Error,
    },

    /// Provider reported no entity matching the query
    #[error("no country matches `{query}`")]
    NotFound {
        /// The query key being resolved
        query: String,
    },

    /// Provider payload did not have the expected shape
    #[error("unexpected provider payload for `{query}`: {message}")]
    Parse {
        /// The query key being resolved
        query: String,
        /// What went wrong while decoding
        message: String,
    },
}

impl CountryError {
    /// Returns the query key the failing operation was resolving
    pub fn query(&self) -> &str {
        match self {
            CountryError::Network { query, .. }
            | CountryError::NotFound { query }
            | CountryError::Parse { query, .. } => query,
        }
    }

    /// Returns true when the provider reported no match, as opposed to a
    /// transport or decoding problem
    pub fn is_not_found(&self) -> bool {
        matches!(self, CountryError::NotFound { .. })
    }
}

/// Gateway to the REST Countries provider
///
/// Owns an HTTP client and a handle to the shared cache store. Lookups are
/// keyed by operation name plus normalized argument; a hit returns the
/// stored value with no network call. There are no retries and no request
/// deduplication: two concurrent lookups for the same uncached key both go
/// to the network and both store the same result.
#[derive(Debug, Clone)]
pub struct CountryGateway {
    /// HTTP client for provider requests
    http_client: Client,
    /// Shared in-memory response cache
    cache: CacheStore,
    /// Base URL for the provider (overridable for testing)
    base_url: String,
}

impl Default for CountryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryGateway {
    /// Creates a gateway with its own empty cache
    pub fn new() -> Self {
        Self::with_cache(CacheStore::new())
    }

    /// Creates a gateway sharing the given cache store
    pub fn with_cache(cache: CacheStore) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url: REST_COUNTRIES_BASE_URL.to_string(),
        }
    }

    /// Overrides the provider base URL (for testing)
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches the full ordered sequence of all known countries
    ///
    /// # Returns
    /// * `Ok(Vec<Country>)` - All countries, in provider order
    /// * `Err(CountryError)` - If the provider is unreachable or returns a
    ///   non-success status
    pub async fn fetch_all(&self) -> Result<Vec<Country>, CountryError> {
        let url = format!("{}/all", self.base_url);
        self.lookup_list(ALL_KEY, &url, false).await
    }

    /// Fetches countries matching a fuzzy name search
    ///
    /// Matching semantics are the provider's. An empty or whitespace-only
    /// name cannot match anything and fails without a network call.
    ///
    /// # Returns
    /// * `Ok(Vec<Country>)` - Matching countries, in provider order
    /// * `Err(CountryError::NotFound)` - If the provider reports no matches
    /// * `Err(CountryError)` - On transport or decoding failure
    pub async fn fetch_by_name(&self, name: &str) -> Result<Vec<Country>, CountryError> {
        let trimmed = name.trim();
        let query = name_key(name);
        if trimmed.is_empty() {
            return Err(CountryError::NotFound { query });
        }
        let url = format!("{}/name/{}", self.base_url, encode_path_segment(trimmed));
        self.lookup_list(&query, &url, true).await
    }

    /// Fetches all countries in the given region
    pub async fn fetch_by_region(&self, region: Region) -> Result<Vec<Country>, CountryError> {
        let query = region_key(region);
        let url = format!("{}/region/{}", self.base_url, region.provider_path());
        self.lookup_list(&query, &url, true).await
    }

    /// Fetches the single country whose alpha code matches
    ///
    /// Codes are 2- or 3-letter ISO 3166-1 values. The provider matches them
    /// case-insensitively, so codes are normalized to lowercase before the
    /// cache key and the URL are built: `fetch_by_code("us")` and
    /// `fetch_by_code("US")` are the same logical query. The provider returns
    /// a one-element array for an exact match; the sole element is returned.
    pub async fn fetch_by_code(&self, code: &str) -> Result<Country, CountryError> {
        let query = code_key(code);

        if let Some(CachedLookup::Country(country)) = self.cache.get(&query) {
            return Ok(*country);
        }

        let normalized = code.trim().to_lowercase();
        let url = format!("{}/alpha/{}", self.base_url, encode_path_segment(&normalized));
        let countries = self.request_countries(&query, &url).await?;
        let country = countries
            .into_iter()
            .next()
            .ok_or_else(|| CountryError::NotFound {
                query: query.clone(),
            })?;

        self.cache
            .insert(query, CachedLookup::Country(Box::new(country.clone())));
        Ok(country)
    }

    /// Empties every cache entry unconditionally
    ///
    /// The next lookup for any key issues a fresh network call.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Looks up a list-shaped query, consulting the cache first
    ///
    /// With `require_match`, an empty provider array is reported as
    /// `NotFound` and (like every failure) not cached.
    async fn lookup_list(
        &self,
        query: &str,
        url: &str,
        require_match: bool,
    ) -> Result<Vec<Country>, CountryError> {
        if let Some(CachedLookup::Countries(countries)) = self.cache.get(query) {
            return Ok(countries);
        }

        let countries = self.request_countries(query, url).await?;
        let countries = if require_match {
            require_some(countries, query)?
        } else {
            countries
        };

        self.cache
            .insert(query.to_string(), CachedLookup::Countries(countries.clone()));
        Ok(countries)
    }

    /// Performs the network request and decodes the response body
    async fn request_countries(
        &self,
        query: &str,
        url: &str,
    ) -> Result<Vec<Country>, CountryError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|source| CountryError::Network {
                query: query.to_string(),
                source,
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CountryError::NotFound {
                query: query.to_string(),
            });
        }

        let response = response
            .error_for_status()
            .map_err(|source| CountryError::Network {
                query: query.to_string(),
                source,
            })?;

        let text = response.text().await.map_err(|source| CountryError::Network {
            query: query.to_string(),
            source,
        })?;

        parse_countries(&text, query)
    }
}

/// Cache key for the full country list
const ALL_KEY: &str = "all";

/// Cache key for a name search
fn name_key(name: &str) -> String {
    format!("name:{}", name.trim().to_lowercase())
}

/// Cache key for a region lookup
fn region_key(region: Region) -> String {
    format!("region:{}", region.provider_path())
}

/// Cache key for an alpha-code lookup
fn code_key(code: &str) -> String {
    format!("code:{}", code.trim().to_lowercase())
}

/// Decodes a provider response body into country records
fn parse_countries(text: &str, query: &str) -> Result<Vec<Country>, CountryError> {
    serde_json::from_str(text).map_err(|err| CountryError::Parse {
        query: query.to_string(),
        message: err.to_string(),
    })
}

/// Reports an empty match list as `NotFound`
fn require_some(countries: Vec<Country>, query: &str) -> Result<Vec<Country>, CountryError> {
    if countries.is_empty() {
        Err(CountryError::NotFound {
            query: query.to_string(),
        })
    } else {
        Ok(countries)
    }
}

/// Percent-encodes a path segment so names with spaces or accents form a
/// valid URL (e.g. "Côte d'Ivoire")
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}
