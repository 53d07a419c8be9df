use anyhow::Result;
use clap::Parser;
use httpmock::prelude::*;
use pet_age::core::ConfigProvider;
use pet_age::utils::validation::Validate;
use pet_age::{CliConfig, Converter, HttpGuideClient, TomlConfig};
use std::time::Duration;
use tempfile::TempDir;

/// 設定檔 + 命令列覆蓋 → 實際呼叫指南服務
#[tokio::test]
async fn test_toml_config_drives_guide_requests() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let guide_mock = server.mock(|when, then| {
        when.method(POST).path("/guide");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"guide": "## Care\nBrush weekly."}));
    });

    std::env::set_var("PET_AGE_IT_GUIDE_ENDPOINT", server.url("/guide"));
    let config_path = temp_dir.path().join("pet-age.toml");
    tokio::fs::write(
        &config_path,
        r#"
[guide]
enabled = true
endpoint = "${PET_AGE_IT_GUIDE_ENDPOINT}"
timeout_seconds = 5

[display]
decimals = 2
"#,
    )
    .await?;

    let config = TomlConfig::from_file(&config_path)?;
    std::env::remove_var("PET_AGE_IT_GUIDE_ENDPOINT");
    config.validate()?;

    assert_eq!(config.display_decimals(), 2);
    assert_eq!(config.request_timeout(), Duration::from_secs(5));

    let converter = Converter::<HttpGuideClient>::from_config(&config)?;
    let cli = CliConfig::parse_from(["pet-age", "--species", "cat", "--age", "2"]);
    let report = converter.submit(&cli.form_input()).await?;

    guide_mock.assert();
    assert_eq!(report.human_age, 24.0);
    assert!(!report.guide.is_fallback());
    Ok(())
}

#[tokio::test]
async fn test_cli_no_guide_overrides_file() -> Result<()> {
    let server = MockServer::start();
    let guide_mock = server.mock(|when, then| {
        when.method(POST).path("/guide");
        then.status(200)
            .json_body(serde_json::json!({"guide": "## Care\nBrush weekly."}));
    });

    let mut config = TomlConfig::from_toml_str(&format!(
        "[guide]\nendpoint = \"{}\"\n",
        server.url("/guide")
    ))?;
    let cli = CliConfig::parse_from([
        "pet-age",
        "--species",
        "rabbit",
        "--age",
        "4",
        "--no-guide",
        "--decimals",
        "0",
    ]);
    config.apply_cli_overrides(&cli);

    assert!(!config.guide_enabled());
    assert_eq!(config.display_decimals(), 0);

    let converter = Converter::<HttpGuideClient>::from_config(&config)?;
    let report = converter.submit(&cli.form_input()).await?;

    guide_mock.assert_hits(0);
    assert_eq!(report.human_age, 32.0);
    assert!(report.guide.is_fallback());
    Ok(())
}

#[test]
fn test_cli_endpoint_override_is_validated() {
    let mut config = TomlConfig::default();
    let cli = CliConfig::parse_from(["pet-age", "--guide-endpoint", "ftp://example.com/guide"]);
    config.apply_cli_overrides(&cli);

    assert_eq!(config.guide_endpoint(), Some("ftp://example.com/guide"));
    assert!(config.validate().is_err());
}
