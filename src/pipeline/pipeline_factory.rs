use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::error::AppError;
use crate::map::SharedMapView;
use crate::pipeline::orchestration::PipelineOrchestrator;
use crate::pipeline::services::{
    CloudStorageUploader, HttpAnalysisClient, NominatimGeocoder, http_client,
};

pub trait PipelineFactory {
    fn build(&self, map: SharedMapView) -> Result<PipelineOrchestrator, AppError>;
}

/// Wires the HTTP-backed collaborators from configuration.
pub struct HttpPipelineFactory {
    settings: Settings,
}

impl HttpPipelineFactory {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl PipelineFactory for HttpPipelineFactory {
    fn build(&self, map: SharedMapView) -> Result<PipelineOrchestrator, AppError> {
        let client = http_client(&self.settings.http)?;
        info!(
            "Pipeline endpoints: storage {}, analysis {}, geocoder {}",
            self.settings.storage.base_url,
            self.settings.analysis.base_url,
            self.settings.geocoder.base_url
        );

        PipelineOrchestrator::builder(self.settings.progress.clone())
            .uploader(Arc::new(CloudStorageUploader::new(client.clone(), &self.settings.storage)))
            .analysis(Arc::new(HttpAnalysisClient::new(client.clone(), &self.settings.analysis)))
            .geocoder(Arc::new(NominatimGeocoder::new(client, &self.settings.geocoder)))
            .map(map)
            .build()
    }
}
