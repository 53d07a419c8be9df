use crate::domain::model::{GuideRequest, GuideResponse};
use crate::domain::ports::GuideProvider;
use crate::utils::error::{PetAgeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 透過 HTTP POST 呼叫健康指南服務
#[derive(Debug, Clone)]
pub struct HttpGuideClient {
    endpoint: String,
    client: Client,
}

impl HttpGuideClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pet-age/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl GuideProvider for HttpGuideClient {
    async fn generate(&self, request: &GuideRequest) -> Result<String> {
        tracing::debug!("Requesting health guide from: {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        tracing::debug!("Guide response status: {}", status);

        if !status.is_success() {
            return Err(PetAgeError::guide_service(format!(
                "service responded with {}",
                status
            )));
        }

        let body: GuideResponse = response.json().await?;
        if body.guide.trim().is_empty() {
            return Err(PetAgeError::guide_service("service returned an empty guide"));
        }

        Ok(body.guide)
    }
}
