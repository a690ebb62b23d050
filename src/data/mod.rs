//! Core data models for Country Atlas CLI
//!
//! This module contains all the data types used throughout the application
//! for representing countries as served by the REST Countries provider,
//! together with the gateway that fetches them and the favorites store.

pub mod countries;
pub mod favorites;

pub use countries::{CountryError, CountryGateway};
pub use favorites::Favorites;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single country record from the REST Countries provider
///
/// Field names mirror the v3.1 payload (camelCase on the wire). The provider
/// omits fields for some territories, so every field falls back to its
/// default when absent. Records are treated as immutable values once fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Country {
    /// Name forms (common, official, native)
    pub name: CountryName,
    /// Top-level domains (e.g. ".fr")
    pub tld: Vec<String>,
    /// ISO 3166-1 alpha-2 code
    pub cca2: String,
    /// ISO 3166-1 alpha-3 code
    pub cca3: String,
    /// Whether the country is independent, if known
    pub independent: Option<bool>,
    /// Whether the country is a UN member
    pub un_member: bool,
    /// Currencies keyed by ISO 4217 code
    pub currencies: HashMap<String, Currency>,
    /// Capital city or cities
    pub capital: Vec<String>,
    /// Continental region (e.g. "Europe")
    pub region: String,
    /// Subregion (e.g. "Western Europe"), if any
    pub subregion: Option<String>,
    /// Languages keyed by ISO 639-3 code
    pub languages: HashMap<String, String>,
    /// Geographic coordinates as [latitude, longitude]
    pub latlng: Vec<f64>,
    /// Alpha-3 codes of bordering countries
    pub borders: Vec<String>,
    /// Land area in square kilometers
    pub area: f64,
    /// Population count
    pub population: u64,
    /// Flag emoji
    pub flag: Option<String>,
    /// Flag image URLs
    pub flags: Flags,
    /// Coat of arms image URLs
    pub coat_of_arms: CoatOfArms,
}

/// Name forms for a country
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountryName {
    /// Common name (e.g. "France")
    pub common: String,
    /// Official name (e.g. "French Republic")
    pub official: String,
    /// Native name forms keyed by language code
    pub native_name: HashMap<String, NativeName>,
}

/// A native-language name form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeName {
    /// Official native name
    pub official: String,
    /// Common native name
    pub common: String,
}

/// A currency used by a country
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    /// Currency name (e.g. "Euro")
    pub name: String,
    /// Currency symbol (e.g. "€"), if any
    pub symbol: Option<String>,
}

/// Flag image URLs for a country
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    /// PNG flag URL
    pub png: String,
    /// SVG flag URL
    pub svg: String,
    /// Alt text describing the flag, if any
    pub alt: Option<String>,
}

/// Coat of arms image URLs for a country
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoatOfArms {
    /// PNG coat of arms URL, if any
    pub png: Option<String>,
    /// SVG coat of arms URL, if any
    pub svg: Option<String>,
}

impl Country {
    /// Returns the capital(s) joined for display, or a dash when unknown
    pub fn capital_display(&self) -> String {
        if self.capital.is_empty() {
            "—".to_string()
        } else {
            self.capital.join(", ")
        }
    }

    /// Returns currency names with symbols, sorted for stable display
    pub fn currency_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .currencies
            .values()
            .map(|currency| match &currency.symbol {
                Some(symbol) => format!("{} ({})", currency.name, symbol),
                None => currency.name.clone(),
            })
            .collect();
        names.sort();
        names
    }

    /// Returns language names, sorted for stable display
    pub fn language_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.languages.values().cloned().collect();
        names.sort();
        names
    }
}

/// Continental regions recognized by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
    Antarctic,
}

impl Region {
    /// All regions, in menu order
    pub const ALL: [Region; 6] = [
        Region::Africa,
        Region::Americas,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
        Region::Antarctic,
    ];

    /// Parses a region from user input (case-insensitive, common aliases)
    pub fn from_str(s: &str) -> Option<Region> {
        match s.to_lowercase().as_str() {
            "africa" => Some(Region::Africa),
            "americas" | "america" => Some(Region::Americas),
            "asia" => Some(Region::Asia),
            "europe" => Some(Region::Europe),
            "oceania" => Some(Region::Oceania),
            "antarctic" | "antarctica" => Some(Region::Antarctic),
            _ => None,
        }
    }

    /// Path segment expected by the provider's region endpoint
    pub fn provider_path(&self) -> &'static str {
        match self {
            Region::Africa => "africa",
            Region::Americas => "americas",
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::Oceania => "oceania",
            Region::Antarctic => "antarctic",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
            Region::Antarctic => "Antarctic",
        }
    }
}
