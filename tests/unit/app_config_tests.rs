/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use vtt2srt::app_config::{Config, LineEnding, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.output.extension, "srt");
    assert_eq!(config.output.collision_suffix, "_out");
    assert_eq!(config.output.line_ending, LineEnding::Lf);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.output.extension = String::new();
    assert!(config.validate().is_err());

    config.output.extension = "en.srt".to_string();
    assert!(config.validate().is_err());

    config.output.extension = "srt".to_string();
    config.output.collision_suffix = String::new();
    assert!(config.validate().is_err());

    config.output.collision_suffix = "/x".to_string();
    assert!(config.validate().is_err());

    config.output.collision_suffix = "_converted".to_string();
    assert!(config.validate().is_ok());
}

/// Test that a missing file yields the defaults
#[test]
fn test_load_or_default_withMissingFile_shouldReturnDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load_or_default(temp_dir.path().join("conf.json"))?;

    assert_eq!(config, Config::default());
    assert!(!temp_dir.path().join("conf.json").exists());

    Ok(())
}

/// Test that a partial file is merged with the defaults
#[test]
fn test_load_or_default_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "log_level": "debug", "output": { "line_ending": "crlf" } }"#,
    )?;

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.output.line_ending, LineEnding::Crlf);
    assert_eq!(config.output.extension, "srt");

    Ok(())
}

/// Test that a malformed file is an error
#[test]
fn test_load_or_default_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_default(&path).is_err());

    Ok(())
}

/// Test line ending parsing and rendering
#[test]
fn test_line_ending_fromStr_shouldParseKnownValues() {
    assert_eq!("lf".parse::<LineEnding>().unwrap(), LineEnding::Lf);
    assert_eq!("CRLF".parse::<LineEnding>().unwrap(), LineEnding::Crlf);
    assert!("cr".parse::<LineEnding>().is_err());

    assert_eq!(LineEnding::Lf.as_str(), "\n");
    assert_eq!(LineEnding::Crlf.as_str(), "\r\n");
}

/// Test config JSON round trip through serde
#[test]
fn test_config_serialization_withCustomValues_shouldRoundTrip() -> Result<()> {
    let mut config = Config::default();
    config.log_level = LogLevel::Warn;
    config.output.line_ending = LineEnding::Crlf;

    let json = serde_json::to_string_pretty(&config)?;
    assert!(json.contains("\"crlf\""));
    assert!(json.contains("\"warn\""));

    let parsed: Config = serde_json::from_str(&json)?;
    assert_eq!(parsed, config);

    Ok(())
}
