use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::common::{MediaFile, MediaKind};
use crate::config::StorageSettings;
use crate::error::AppError;

/// Sends media to object storage and returns its durable URL.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: &MediaFile, kind: MediaKind) -> Result<String, AppError>;
}

/// Unsigned uploads against a Cloudinary-style `/<cloud>/<kind>/upload` endpoint.
pub struct CloudStorageUploader {
    client: reqwest::Client,
    base_url: String,
    cloud_name: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Deserialize)]
struct UploadErrorResponse {
    error: UploadErrorDetail,
}

#[derive(Deserialize)]
struct UploadErrorDetail {
    message: String,
}

impl CloudStorageUploader {
    pub fn new(client: reqwest::Client, settings: &StorageSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            cloud_name: settings.cloud_name.clone(),
            upload_preset: settings.upload_preset.clone(),
        }
    }

    fn upload_url(&self, kind: MediaKind) -> String {
        format!("{}/{}/{}/upload", self.base_url, self.cloud_name, kind.as_str())
    }
}

#[async_trait]
impl MediaUploader for CloudStorageUploader {
    async fn upload(&self, file: &MediaFile, kind: MediaKind) -> Result<String, AppError> {
        let url = self.upload_url(kind);
        info!("Uploading {} '{}' ({} bytes) to storage", kind, file.name(), file.len());

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())
            .map_err(|e| AppError::UploadFailed(format!("invalid MIME type: {}", e)))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Storage upload request failed: {}", e);
                AppError::UploadFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<UploadErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!("Storage provider returned {}: {}", status, detail);
            return Err(AppError::UploadFailed(format!("{}: {}", status, detail)));
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            AppError::UploadFailed(format!("unreadable storage response: {}", e))
        })?;
        let secure_url = body
            .secure_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::UploadFailed("storage response had no secure_url".into()))?;

        debug!("File uploaded successfully. URL: {}", secure_url);
        Ok(secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn uploader(server: &MockServer) -> CloudStorageUploader {
        CloudStorageUploader::new(
            reqwest::Client::new(),
            &StorageSettings {
                base_url: server.uri(),
                cloud_name: "demo".to_string(),
                upload_preset: "unsigned-preset".to_string(),
            },
        )
    }

    fn photo() -> MediaFile {
        MediaFile::new("tower.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])
    }

    #[tokio::test]
    async fn test_upload_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/demo/image/upload"))
            .and(body_string_contains("unsigned-preset"))
            .and(body_string_contains("tower.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://cdn.example.com/tower.jpg",
                "public_id": "tower"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = uploader(&server).upload(&photo(), MediaKind::Image).await.unwrap();
        assert_eq!(url, "https://cdn.example.com/tower.jpg");
    }

    #[tokio::test]
    async fn test_upload_video_uses_video_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/demo/video/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://cdn.example.com/clip.mp4"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let clip = MediaFile::new("clip.mp4", "video/mp4", vec![0u8; 16]);
        let url = uploader(&server).upload(&clip, MediaKind::Video).await.unwrap();
        assert_eq!(url, "https://cdn.example.com/clip.mp4");
    }

    #[tokio::test]
    async fn test_upload_provider_error_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/demo/image/upload"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Upload preset not found" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&photo(), MediaKind::Image).await.unwrap_err();
        match err {
            AppError::UploadFailed(detail) => assert!(detail.contains("Upload preset not found")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_missing_secure_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&photo(), MediaKind::Image).await.unwrap_err();
        assert!(matches!(err, AppError::UploadFailed(_)));
    }

    #[tokio::test]
    async fn test_upload_network_error() {
        let settings = StorageSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            cloud_name: "demo".to_string(),
            upload_preset: "p".to_string(),
        };
        let uploader = CloudStorageUploader::new(reqwest::Client::new(), &settings);
        let err = uploader.upload(&photo(), MediaKind::Image).await.unwrap_err();
        assert!(matches!(err, AppError::UploadFailed(_)));
    }
}
