use crate::config::{DEFAULT_DECIMALS, DEFAULT_TIMEOUT_SECS, MAX_DECIMALS};
use crate::core::ConfigProvider;
use crate::domain::model::FormInput;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pet-age")]
#[command(about = "Convert a pet's age to human years and get a short health guide")]
pub struct CliConfig {
    /// dog, cat, rabbit, hamster or bird
    #[arg(long, default_value = "dog")]
    pub species: String,

    /// Pet age in years, fractions allowed (e.g. 0.5)
    #[arg(long)]
    pub age: Option<String>,

    /// Breed from --list-breeds, or "other" together with --custom-breed
    #[arg(long)]
    pub breed: Option<String>,

    #[arg(long)]
    pub custom_breed: Option<String>,

    /// URL of the health guide service
    #[arg(long)]
    pub guide_endpoint: Option<String>,

    #[arg(long, help = "Skip the health guide service and use the standard guide")]
    pub no_guide: bool,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Decimal places shown for the human age
    #[arg(long)]
    pub decimals: Option<usize>,

    #[arg(long, help = "Print the full report as JSON")]
    pub json: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "List species and their breed options")]
    pub list_breeds: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn form_input(&self) -> FormInput {
        FormInput {
            species: self.species.clone(),
            age: self.age.clone(),
            breed: self.breed.clone(),
            custom_breed: self.custom_breed.clone(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn guide_endpoint(&self) -> Option<&str> {
        self.guide_endpoint.as_deref()
    }

    fn guide_enabled(&self) -> bool {
        !self.no_guide
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    fn display_decimals(&self) -> usize {
        self.decimals.unwrap_or(DEFAULT_DECIMALS)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.guide_endpoint {
            validate_url("guide_endpoint", endpoint)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        if let Some(decimals) = self.decimals {
            validate_range("decimals", decimals, 0, MAX_DECIMALS)?;
        }
        Ok(())
    }
}
