use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::MediaKind;

pub const SUCCESS_STATUS: &str = "success";

/// The analysis backend's response. Only the fields the dashboard reads are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub top_location: Option<String>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<AiAnalysis>,
    /// Video analyses only.
    #[serde(default)]
    pub frames_analyzed: Option<u32>,
    #[serde(default)]
    pub locations_found: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub top_location_guesses: Option<Vec<String>>,
    #[serde(default)]
    pub confidence_score: Option<Confidence>,
}

/// The backend reports confidence either as a number (`50`) or a string (`"85%"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Number(f64),
    Text(String),
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Confidence::Number(n) => write!(f, "{n}"),
            Confidence::Text(s) => f.write_str(s),
        }
    }
}

impl AnalysisResult {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// The top location, if the backend supplied a non-blank one.
    pub fn location_name(&self) -> Option<&str> {
        self.top_location
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Top-level confidence, falling back to the model's own score.
    pub fn confidence(&self) -> Option<&Confidence> {
        self.confidence.as_ref().or_else(|| {
            self.ai_analysis
                .as_ref()
                .and_then(|ai| ai.confidence_score.as_ref())
        })
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.ai_analysis
            .as_ref()
            .and_then(|ai| ai.reasoning.as_deref())
            .filter(|r| !r.trim().is_empty())
    }

    pub fn location_guesses(&self) -> &[String] {
        self.ai_analysis
            .as_ref()
            .and_then(|ai| ai.top_location_guesses.as_deref())
            .unwrap_or_default()
    }

    pub fn locations_found(&self) -> &[String] {
        self.locations_found.as_deref().unwrap_or_default()
    }

    /// The hosted copy of the analysed media, as echoed by the backend.
    pub fn media_url(&self, kind: MediaKind) -> Option<&str> {
        match kind {
            MediaKind::Image => self.image_url.as_deref(),
            MediaKind::Video => self.video_url.as_deref(),
        }
    }
}
