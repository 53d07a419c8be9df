use crate::adapters::http::HttpGuideClient;
use crate::core::age::convert;
use crate::core::form::parse_form;
use crate::core::guide::{build_guide_request, fallback_guide, fetch_guide};
use crate::core::profiles::profile;
use crate::domain::model::{AgeQuery, ConversionReport, FormInput, GuideOutcome};
use crate::domain::ports::{ConfigProvider, GuideProvider};
use crate::utils::error::Result;
use chrono::Utc;

/// 一次提交：驗證 → 計算 → 健康指南
pub struct Converter<G: GuideProvider> {
    guide: Option<G>,
}

impl<G: GuideProvider> Converter<G> {
    pub fn new(guide: G) -> Self {
        Self { guide: Some(guide) }
    }

    /// 不呼叫外部服務，直接使用備用指南
    pub fn offline() -> Self {
        Self { guide: None }
    }

    pub fn guide_enabled(&self) -> bool {
        self.guide.is_some()
    }

    /// Validates the raw form first; nothing is computed for an invalid submission.
    pub async fn submit(&self, form: &FormInput) -> Result<ConversionReport> {
        let query = parse_form(form)?;
        Ok(self.run(&query).await)
    }

    pub async fn run(&self, query: &AgeQuery) -> ConversionReport {
        let result = convert(query);
        tracing::info!(
            species = %query.species,
            breed = %query.breed,
            age = query.age,
            human_age = result.human_age,
            "Converted pet age"
        );

        let request = build_guide_request(query);
        let guide = match &self.guide {
            Some(provider) => fetch_guide(provider, &request, result.human_age).await,
            None => {
                tracing::debug!("Guide generation disabled, using fallback guide");
                GuideOutcome::Fallback(fallback_guide(&request.breed, request.age, result.human_age))
            }
        };

        ConversionReport {
            species: query.species,
            breed: query.breed.clone(),
            age: query.age,
            human_age: result.human_age,
            size_class: result.size_class,
            lifespan: profile(query.species).typical_lifespan.to_string(),
            guide,
            generated_at: Utc::now(),
        }
    }
}

impl Converter<HttpGuideClient> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        if !config.guide_enabled() {
            tracing::info!("Health guide generation disabled by configuration");
            return Ok(Self::offline());
        }

        match config.guide_endpoint() {
            Some(endpoint) => {
                let client = HttpGuideClient::new(endpoint, config.request_timeout())?;
                Ok(Self::new(client))
            }
            None => {
                tracing::warn!("No health guide endpoint configured, guides will use the fallback text");
                Ok(Self::offline())
            }
        }
    }
}
