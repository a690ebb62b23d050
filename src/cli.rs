//! Command-line interface parsing for Country Atlas CLI
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --country, --region, and --stats flags for opening the application
//! directly in a specific view.

use clap::Parser;
use thiserror::Error;

use crate::data::Region;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified region name is not recognized
    #[error("Invalid region: '{0}'. Valid regions: africa, americas, asia, europe, oceania, antarctic")]
    InvalidRegion(String),

    /// The specified country code is not a 2- or 3-letter alpha code
    #[error("Invalid country code: '{0}'. Expected a 2- or 3-letter code like 'fr' or 'fra'")]
    InvalidCountryCode(String),
}

/// Country Atlas CLI - browse country data from your terminal
#[derive(Parser, Debug)]
#[command(name = "countryatlas")]
#[command(about = "Country data browser: flags, population, currencies, languages, borders")]
#[command(version)]
pub struct Cli {
    /// Open directly on a country's detail view by alpha code
    ///
    /// Examples:
    ///   countryatlas --country fr     # Open France
    ///   countryatlas --country deu    # Open Germany
    #[arg(long, value_name = "CODE")]
    pub country: Option<String>,

    /// Start with the list filtered to a region
    ///
    /// Valid regions: africa, americas, asia, europe, oceania, antarctic
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Open directly in the statistics view
    #[arg(long)]
    pub stats: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Country code to open a detail view for, normalized to lowercase
    pub initial_country: Option<String>,
    /// Region to pre-filter the list with
    pub initial_region: Option<Region>,
    /// Whether to start in the statistics view
    pub start_in_statistics: bool,
}

/// Parses a region string argument into a Region enum.
///
/// # Arguments
/// * `s` - The region string from CLI
///
/// # Returns
/// * `Ok(Region)` if the string matches a known region
/// * `Err(CliError::InvalidRegion)` if it doesn't
pub fn parse_region_arg(s: &str) -> Result<Region, CliError> {
    Region::from_str(s).ok_or_else(|| CliError::InvalidRegion(s.to_string()))
}

/// Parses and normalizes a country code argument.
///
/// The provider matches alpha codes case-insensitively, so the code is
/// lowercased here; only the length and character class are validated
/// locally, existence is the provider's call.
pub fn parse_country_code_arg(s: &str) -> Result<String, CliError> {
    let trimmed = s.trim();
    let valid = (2..=3).contains(&trimmed.len()) && trimmed.chars().all(|c| c.is_ascii_alphabetic());
    if valid {
        Ok(trimmed.to_lowercase())
    } else {
        Err(CliError::InvalidCountryCode(s.to_string()))
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if a region or country code is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_country = match &cli.country {
            Some(code) => Some(parse_country_code_arg(code)?),
            None => None,
        };
        let initial_region = match &cli.region {
            Some(region) => Some(parse_region_arg(region)?),
            None => None,
        };

        Ok(StartupConfig {
            initial_country,
            initial_region,
            start_in_statistics: cli.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region_arg_known_regions() {
        assert_eq!(parse_region_arg("europe").unwrap(), Region::Europe);
        assert_eq!(parse_region_arg("Africa").unwrap(), Region::Africa);
        assert_eq!(parse_region_arg("OCEANIA").unwrap(), Region::Oceania);
    }

    #[test]
    fn test_parse_region_arg_aliases() {
        assert_eq!(parse_region_arg("america").unwrap(), Region::Americas);
        assert_eq!(parse_region_arg("antarctica").unwrap(), Region::Antarctic);
    }

    #[test]
    fn test_parse_region_arg_invalid() {
        let result = parse_region_arg("atlantis");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid region"));
        assert!(err.to_string().contains("atlantis"));
    }

    #[test]
    fn test_parse_country_code_arg_accepts_two_and_three_letters() {
        assert_eq!(parse_country_code_arg("fr").unwrap(), "fr");
        assert_eq!(parse_country_code_arg("FRA").unwrap(), "fra");
        assert_eq!(parse_country_code_arg(" de ").unwrap(), "de");
    }

    #[test]
    fn test_parse_country_code_arg_rejects_bad_input() {
        assert!(parse_country_code_arg("f").is_err());
        assert!(parse_country_code_arg("abcd").is_err());
        assert!(parse_country_code_arg("12").is_err());
        assert!(parse_country_code_arg("").is_err());
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert!(config.initial_country.is_none());
        assert!(config.initial_region.is_none());
        assert!(!config.start_in_statistics);
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["countryatlas"]);
        assert!(cli.country.is_none());
        assert!(cli.region.is_none());
        assert!(!cli.stats);
    }

    #[test]
    fn test_cli_parse_country_flag() {
        let cli = Cli::parse_from(["countryatlas", "--country", "fr"]);
        assert_eq!(cli.country.as_deref(), Some("fr"));
    }

    #[test]
    fn test_cli_parse_region_flag() {
        let cli = Cli::parse_from(["countryatlas", "--region", "europe"]);
        assert_eq!(cli.region.as_deref(), Some("europe"));
    }

    #[test]
    fn test_cli_parse_stats_flag() {
        let cli = Cli::parse_from(["countryatlas", "--stats"]);
        assert!(cli.stats);
    }

    #[test]
    fn test_startup_config_from_cli_normalizes_country() {
        let cli = Cli::parse_from(["countryatlas", "--country", "FRA"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_country.as_deref(), Some("fra"));
    }

    #[test]
    fn test_startup_config_from_cli_parses_region() {
        let cli = Cli::parse_from(["countryatlas", "--region", "Asia"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_region, Some(Region::Asia));
    }

    #[test]
    fn test_startup_config_from_cli_invalid_region() {
        let cli = Cli::parse_from(["countryatlas", "--region", "nowhere"]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn test_startup_config_from_cli_invalid_country() {
        let cli = Cli::parse_from(["countryatlas", "--country", "x"]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn test_startup_config_from_cli_combined_flags() {
        let cli = Cli::parse_from(["countryatlas", "--region", "europe", "--stats"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_region, Some(Region::Europe));
        assert!(config.start_in_statistics);
    }
}
