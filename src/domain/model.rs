use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    Rabbit,
    Hamster,
    Bird,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Dog,
        Species::Cat,
        Species::Rabbit,
        Species::Hamster,
        Species::Bird,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Rabbit => "rabbit",
            Species::Hamster => "hamster",
            Species::Bird => "bird",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// 狗的體型分類，由品種名稱比對而來，不會被儲存
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreedSizeClass {
    Small,
    Large,
    Unspecified,
}

impl BreedSizeClass {
    pub fn label(&self) -> &'static str {
        match self {
            BreedSizeClass::Small => "small",
            BreedSizeClass::Large => "large",
            BreedSizeClass::Unspecified => "medium",
        }
    }
}

/// 三段式年齡曲線：
/// age <= 1 → age × first_year；1 < age <= breakpoint → 線性 mid_rate；之後 late_rate。
/// 各段在斷點處的值由前一段推得，因此曲線必然連續。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiecewiseCurve {
    pub first_year: f64,
    pub breakpoint: f64,
    pub mid_rate: f64,
    pub late_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgeFormula {
    /// 依狗的體型分類選擇曲線
    DogBySize,
    Piecewise(PiecewiseCurve),
    Linear { factor: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct SpeciesProfile {
    pub species: Species,
    pub display_name: &'static str,
    pub typical_lifespan: &'static str,
    pub age_formula: AgeFormula,
    pub breed_options: &'static [&'static str],
}

/// 表單原始輸入，尚未驗證
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormInput {
    pub species: String,
    pub age: Option<String>,
    pub breed: Option<String>,
    pub custom_breed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeQuery {
    pub species: Species,
    pub age: f64,
    pub breed: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeResult {
    pub human_age: f64,
    pub size_class: Option<BreedSizeClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideRequest {
    pub breed: String,
    pub age: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideResponse {
    #[serde(default)]
    pub guide: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "text", rename_all = "snake_case")]
pub enum GuideOutcome {
    Generated(String),
    Fallback(String),
}

impl GuideOutcome {
    pub fn text(&self) -> &str {
        match self {
            GuideOutcome::Generated(text) | GuideOutcome::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GuideOutcome::Fallback(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideSection {
    pub title: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub species: Species,
    pub breed: String,
    pub age: f64,
    pub human_age: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_class: Option<BreedSizeClass>,
    pub lifespan: String,
    pub guide: GuideOutcome,
    pub generated_at: DateTime<Utc>,
}
