use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::error::AppError;

/// The two kinds of media the analysis backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies a MIME type. Anything that is not `image/*` or `video/*` is rejected.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-chosen file held in memory until it is uploaded.
#[derive(Clone)]
pub struct MediaFile {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl MediaFile {
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, sniffing its MIME type from the content and
    /// falling back to the extension.
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = detect_mime(path, &bytes);
        Ok(Self::new(name, mime, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when both handles came from the same load, not merely equal content.
    pub fn same_file(&self, other: &MediaFile) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A selected file together with its accepted kind.
#[derive(Debug, Clone)]
pub struct SelectedMedia {
    pub file: MediaFile,
    pub kind: MediaKind,
}

impl SelectedMedia {
    pub fn try_from_file(file: MediaFile) -> Result<Self, AppError> {
        match MediaKind::from_mime(file.mime()) {
            Some(kind) => Ok(Self { file, kind }),
            None => Err(AppError::KindRejected(file.mime().to_string())),
        }
    }
}

fn detect_mime(path: &Path, bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    };
    mime.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn only_image_and_video_mimes_are_accepted() {
        assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("Video/MP4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("application/pdf"), None);
        assert_eq!(MediaKind::from_mime("text/plain"), None);
        assert_eq!(MediaKind::from_mime(""), None);
    }

    #[test]
    fn cloning_media_shares_bytes() {
        let f1 = MediaFile::new("a.png", "image/png", vec![1u8, 2, 3]);
        let f2 = f1.clone();
        assert!(Arc::ptr_eq(&f1.bytes, &f2.bytes));
        assert!(f1.same_file(&f2));

        let f3 = MediaFile::new("a.png", "image/png", vec![1u8, 2, 3]);
        assert!(!f1.same_file(&f3));
    }

    #[test]
    fn content_sniffing_wins_over_extension() {
        let mime = detect_mime(Path::new("holiday.mp4"), &PNG_HEADER);
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn extension_is_used_when_content_is_unknown() {
        assert_eq!(detect_mime(Path::new("clip.MOV"), b"????"), "video/quicktime");
        assert_eq!(detect_mime(Path::new("notes.txt"), b"hello"), "application/octet-stream");
    }

    #[test]
    fn selection_rejects_documents() {
        let file = MediaFile::new("report.pdf", "application/pdf", vec![0u8; 4]);
        let err = SelectedMedia::try_from_file(file).unwrap_err();
        assert!(matches!(err, AppError::KindRejected(m) if m == "application/pdf"));
    }

    #[tokio::test]
    async fn load_reads_name_and_sniffs_type() {
        let path = std::env::temp_dir().join(format!("{}.bin", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, PNG_HEADER).await.unwrap();
        let file = MediaFile::load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();

        assert_eq!(file.mime(), "image/png");
        assert_eq!(file.len(), PNG_HEADER.len());
        assert!(file.name().ends_with(".bin"));
    }
}
