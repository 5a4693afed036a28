use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::common::MediaKind;
use crate::config::AnalysisSettings;
use crate::error::AppError;
use crate::pipeline::types::AnalysisResult;

/// Asks the analysis backend where a piece of hosted media was taken.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, media_url: &str, kind: MediaKind) -> Result<AnalysisResult, AppError>;
}

pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(untagged)]
enum AnalyzeRequest<'a> {
    Image { image_url: &'a str },
    Video { video_url: &'a str },
}

#[derive(Deserialize)]
struct BackendError {
    error: Option<String>,
}

impl HttpAnalysisClient {
    pub fn new(client: reqwest::Client, settings: &AnalysisSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, kind: MediaKind) -> String {
        let route = match kind {
            MediaKind::Image => "analyze",
            MediaKind::Video => "analyze_video",
        };
        format!("{}/{}", self.base_url, route)
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, media_url: &str, kind: MediaKind) -> Result<AnalysisResult, AppError> {
        let endpoint = self.endpoint(kind);
        let request = match kind {
            MediaKind::Image => AnalyzeRequest::Image { image_url: media_url },
            MediaKind::Video => AnalyzeRequest::Video { video_url: media_url },
        };
        info!("Sending {} URL to backend for analysis", kind);

        let response = self
            .client
            .post(&endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Analysis request failed: {}", e);
                AppError::AnalysisFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<BackendError>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or(body);
            error!("Analysis backend returned {}: {}", status, detail);
            return Err(AppError::AnalysisFailed(format!("{}: {}", status, detail)));
        }

        let result: AnalysisResult = response.json().await.map_err(|e| {
            AppError::AnalysisFailed(format!("unreadable backend response: {}", e))
        })?;

        if !result.is_success() {
            let detail = result.error.clone().unwrap_or_default();
            error!("Backend reported status '{}' {}", result.status, detail);
            return Err(AppError::AnalysisFailed(format!(
                "backend reported status '{}' {}",
                result.status, detail
            )));
        }

        debug!("Backend response received: {:?}", result);
        Ok(result)
    }
}
