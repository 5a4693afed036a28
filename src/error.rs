use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported file type '{0}'. Please select an image or video file.")]
    KindRejected(String),
    #[error("Failed to upload file: {0}")]
    UploadFailed(String),
    #[error("Backend analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("No coordinates found for '{0}'")]
    GeocodeUnavailable(String),
    #[error("Map viewer is not initialized, cannot place marker")]
    ViewerUnready,
    #[error("An analysis is already in progress")]
    Busy,
    #[error("Pipeline error: {0}")]
    Pipeline(String),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UI error: {0}")]
    Ui(String),
}

impl AppError {
    /// Failures that end a pipeline run and must be shown to the user.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, AppError::GeocodeUnavailable(_) | AppError::ViewerUnready)
    }
}
