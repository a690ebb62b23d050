//! Aggregate statistics over country data
//!
//! Pure computations over a fetched country list: totals, per-region
//! breakdowns, population rankings, and language spread. Used by the
//! statistics view.

use std::collections::HashMap;

use crate::data::Country;

/// Number of countries shown in the population ranking
const TOP_COUNTRIES: usize = 10;

/// Number of languages shown in the language spread
const TOP_LANGUAGES: usize = 8;

/// Country counts and population for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionBreakdown {
    /// Region name as reported by the provider
    pub region: String,
    /// Number of countries in the region
    pub countries: usize,
    /// Combined population of the region
    pub population: u64,
}

/// A country in the population ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCountry {
    /// Common name
    pub name: String,
    /// Alpha-3 code
    pub cca3: String,
    /// Population count
    pub population: u64,
}

/// How many countries speak a language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSpread {
    /// Language name
    pub language: String,
    /// Number of countries listing it
    pub countries: usize,
}

/// Aggregates for the statistics view
#[derive(Debug, Clone, Default)]
pub struct WorldStats {
    /// Total number of countries
    pub total_countries: usize,
    /// Combined population of all countries
    pub total_population: u64,
    /// Mean population per country (zero when the list is empty)
    pub average_population: u64,
    /// Per-region breakdown, largest population first
    pub regions: Vec<RegionBreakdown>,
    /// Most populous countries, largest first
    pub most_populous: Vec<RankedCountry>,
    /// Most widespread languages, by number of countries
    pub top_languages: Vec<LanguageSpread>,
}

/// Computes aggregate statistics over the given countries
pub fn compute(countries: &[Country]) -> WorldStats {
    let total_countries = countries.len();
    let total_population: u64 = countries.iter().map(|c| c.population).sum();
    let average_population = if total_countries == 0 {
        0
    } else {
        total_population / total_countries as u64
    };

    WorldStats {
        total_countries,
        total_population,
        average_population,
        regions: region_breakdown(countries),
        most_populous: most_populous(countries, TOP_COUNTRIES),
        top_languages: language_spread(countries, TOP_LANGUAGES),
    }
}

/// Groups countries by region, largest combined population first
fn region_breakdown(countries: &[Country]) -> Vec<RegionBreakdown> {
    let mut by_region: HashMap<&str, (usize, u64)> = HashMap::new();
    for country in countries {
        let entry = by_region.entry(country.region.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += country.population;
    }

    let mut regions: Vec<RegionBreakdown> = by_region
        .into_iter()
        .map(|(region, (count, population))| RegionBreakdown {
            region: region.to_string(),
            countries: count,
            population,
        })
        .collect();

    // Ties broken by name so the ordering is stable
    regions.sort_by(|a, b| {
        b.population
            .cmp(&a.population)
            .then_with(|| a.region.cmp(&b.region))
    });
    regions
}

/// Ranks the `limit` most populous countries
fn most_populous(countries: &[Country], limit: usize) -> Vec<RankedCountry> {
    let mut ranked: Vec<RankedCountry> = countries
        .iter()
        .map(|country| RankedCountry {
            name: country.name.common.clone(),
            cca3: country.cca3.clone(),
            population: country.population,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.population
            .cmp(&a.population)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(limit);
    ranked
}

/// Counts in how many countries each language is spoken
fn language_spread(countries: &[Country], limit: usize) -> Vec<LanguageSpread> {
    let mut by_language: HashMap<&str, usize> = HashMap::new();
    for country in countries {
        for language in country.languages.values() {
            *by_language.entry(language.as_str()).or_insert(0) += 1;
        }
    }

    let mut spread: Vec<LanguageSpread> = by_language
        .into_iter()
        .map(|(language, count)| LanguageSpread {
            language: language.to_string(),
            countries: count,
        })
        .collect();

    spread.sort_by(|a, b| {
        b.countries
            .cmp(&a.countries)
            .then_with(|| a.language.cmp(&b.language))
    });
    spread.truncate(limit);
    spread
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str, cca3: &str, region: &str, population: u64, languages: &[&str]) -> Country {
        let mut c = Country::default();
        c.name.common = name.to_string();
        c.cca3 = cca3.to_string();
        c.region = region.to_string();
        c.population = population;
        for (i, lang) in languages.iter().enumerate() {
            c.languages.insert(format!("l{}", i), lang.to_string());
        }
        c
    }

    fn sample_countries() -> Vec<Country> {
        vec![
            country("France", "FRA", "Europe", 67_000_000, &["French"]),
            country("Germany", "DEU", "Europe", 83_000_000, &["German"]),
            country("Japan", "JPN", "Asia", 125_000_000, &["Japanese"]),
            country("Canada", "CAN", "Americas", 38_000_000, &["English", "French"]),
            country("Brazil", "BRA", "Americas", 212_000_000, &["Portuguese"]),
        ]
    }

    #[test]
    fn test_compute_on_empty_list() {
        let stats = compute(&[]);
        assert_eq!(stats.total_countries, 0);
        assert_eq!(stats.total_population, 0);
        assert_eq!(stats.average_population, 0);
        assert!(stats.regions.is_empty());
        assert!(stats.most_populous.is_empty());
        assert!(stats.top_languages.is_empty());
    }

    #[test]
    fn test_totals() {
        let stats = compute(&sample_countries());
        assert_eq!(stats.total_countries, 5);
        assert_eq!(stats.total_population, 525_000_000);
        assert_eq!(stats.average_population, 105_000_000);
    }

    #[test]
    fn test_region_breakdown_sorted_by_population() {
        let stats = compute(&sample_countries());

        assert_eq!(stats.regions.len(), 3);
        // Americas 250M > Europe 150M > Asia 125M
        assert_eq!(stats.regions[0].region, "Americas");
        assert_eq!(stats.regions[0].countries, 2);
        assert_eq!(stats.regions[0].population, 250_000_000);
        assert_eq!(stats.regions[1].region, "Europe");
        assert_eq!(stats.regions[2].region, "Asia");
    }

    #[test]
    fn test_most_populous_ordering() {
        let stats = compute(&sample_countries());

        let names: Vec<&str> = stats.most_populous.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Brazil", "Japan", "Germany", "France", "Canada"]);
    }

    #[test]
    fn test_most_populous_is_truncated() {
        let countries: Vec<Country> = (0..20u64)
            .map(|i| country(&format!("Country {:02}", i), "XXX", "Europe", i * 1000, &[]))
            .collect();

        let stats = compute(&countries);
        assert_eq!(stats.most_populous.len(), TOP_COUNTRIES);
        assert_eq!(stats.most_populous[0].population, 19_000);
    }

    #[test]
    fn test_language_spread_counts_countries_not_speakers() {
        let stats = compute(&sample_countries());

        let french = stats
            .top_languages
            .iter()
            .find(|l| l.language == "French")
            .expect("French should be listed");
        // France and Canada both list French
        assert_eq!(french.countries, 2);
        assert_eq!(stats.top_languages[0].language, "French");
    }

    #[test]
    fn test_language_spread_tie_broken_by_name() {
        let countries = vec![
            country("A", "AAA", "Europe", 1, &["Zulu"]),
            country("B", "BBB", "Europe", 1, &["Arabic"]),
        ];
        let stats = compute(&countries);

        assert_eq!(stats.top_languages[0].language, "Arabic");
        assert_eq!(stats.top_languages[1].language, "Zulu");
    }

    #[test]
    fn test_population_tie_broken_by_name() {
        let countries = vec![
            country("Zeta", "ZZZ", "Europe", 500, &[]),
            country("Alpha", "AAA", "Europe", 500, &[]),
        ];
        let stats = compute(&countries);

        assert_eq!(stats.most_populous[0].name, "Alpha");
        assert_eq!(stats.most_populous[1].name, "Zeta");
    }
}
