pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::http::HttpGuideClient;
pub use crate::core::age::{classify_breed, compute_human_age, convert};
pub use crate::core::converter::Converter;
pub use crate::domain::model::{
    AgeQuery, AgeResult, BreedSizeClass, ConversionReport, FormInput, GuideOutcome, Species,
};
pub use crate::utils::error::{PetAgeError, Result};
