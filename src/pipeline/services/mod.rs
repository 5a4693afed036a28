pub mod analysis;
pub mod geocoder;
pub mod uploader;

pub use analysis::{AnalysisClient, HttpAnalysisClient};
pub use geocoder::{Geocoder, NominatimGeocoder, is_resolvable};
pub use uploader::{CloudStorageUploader, MediaUploader};

use crate::config::HttpSettings;
use crate::error::AppError;

/// One connection pool shared by every outbound collaborator.
pub fn http_client(settings: &HttpSettings) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(settings.timeout())
        .build()
        .map_err(|e| AppError::HttpClient(e.to_string()))
}
