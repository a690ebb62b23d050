//! Integration tests for CLI argument handling
//!
//! Tests the --country, --region, and --stats flags from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_countryatlas"))
        .args(args)
        .output()
        .expect("Failed to execute countryatlas")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("countryatlas"), "Help should mention countryatlas");
    assert!(stdout.contains("region"), "Help should mention --region flag");
    assert!(stdout.contains("country"), "Help should mention --country flag");
    assert!(stdout.contains("stats"), "Help should mention --stats flag");
}

#[test]
fn test_invalid_region_prints_error_and_exits() {
    let output = run_cli(&["--region", "atlantis"]);
    assert!(!output.status.success(), "Expected invalid region to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid region"),
        "Should print error message about invalid region: {}",
        stderr
    );
}

#[test]
fn test_invalid_country_code_prints_error_and_exits() {
    let output = run_cli(&["--country", "notacode"]);
    assert!(
        !output.status.success(),
        "Expected invalid country code to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid country code"),
        "Should print error message about invalid country code: {}",
        stderr
    );
}

#[test]
fn test_region_with_help_is_valid() {
    // This test just verifies the argument is accepted (doesn't error immediately)
    // The actual state transition is tested in unit tests
    let output = run_cli(&["--region", "europe", "--help"]);
    // With --help, it should succeed regardless of other flags
    // This is a workaround since we can't easily test TUI apps
    assert!(output.status.success());
}

#[test]
fn test_country_with_help_is_valid() {
    let output = run_cli(&["--country", "fr", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use countryatlas::cli::{parse_country_code_arg, parse_region_arg, Cli, StartupConfig};
    use countryatlas::data::Region;

    #[test]
    fn test_cli_no_args_has_no_flags() {
        let cli = Cli::parse_from(["countryatlas"]);
        assert!(cli.country.is_none());
        assert!(cli.region.is_none());
        assert!(!cli.stats);
    }

    #[test]
    fn test_cli_region_flag_with_value() {
        let cli = Cli::parse_from(["countryatlas", "--region", "oceania"]);
        assert_eq!(cli.region.as_deref(), Some("oceania"));
    }

    #[test]
    fn test_region_arg_parses_into_enum() {
        assert_eq!(parse_region_arg("oceania").unwrap(), Region::Oceania);
    }

    #[test]
    fn test_country_code_arg_is_normalized() {
        assert_eq!(parse_country_code_arg("JPN").unwrap(), "jpn");
    }

    #[test]
    fn test_startup_config_combines_flags() {
        let cli = Cli::parse_from(["countryatlas", "--region", "africa", "--stats"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_region, Some(Region::Africa));
        assert!(config.start_in_statistics);
        assert!(config.initial_country.is_none());
    }
}
