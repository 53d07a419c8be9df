use crate::domain::model::GuideRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn guide_endpoint(&self) -> Option<&str>;
    fn guide_enabled(&self) -> bool;
    fn request_timeout(&self) -> Duration;
    fn display_decimals(&self) -> usize;
}

/// 健康指南文字產生服務
#[async_trait]
pub trait GuideProvider: Send + Sync {
    /// 成功時回傳非空的指南文字；任何失敗都以 Err 回報，由呼叫端決定是否改用備用內容
    async fn generate(&self, request: &GuideRequest) -> Result<String>;
}
