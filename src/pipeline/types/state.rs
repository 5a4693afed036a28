use std::sync::Arc;

use uuid::Uuid;

use crate::common::{Coordinates, MediaKind, SelectedMedia};
use crate::pipeline::orchestration::stage_timings::StageTimings;
use crate::pipeline::types::AnalysisResult;

/// Approximate completion percentage. Only ever moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Progress(u8);

impl Progress {
    pub const ZERO: Progress = Progress(0);
    pub const COMPLETE: Progress = Progress(100);

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Advance by `step`, never past `cap` and never backwards.
    pub fn advance(self, step: u8, cap: u8) -> Progress {
        Progress(self.0.saturating_add(step).min(cap).max(self.0))
    }
}

#[derive(Debug, Clone)]
pub enum PipelinePhase {
    Idle,
    FileSelected,
    Uploading { progress: Progress },
    Analyzing { progress: Progress },
    Complete { result: Arc<AnalysisResult> },
    Error { reason: String },
}

impl PipelinePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelinePhase::Idle => "Idle",
            PipelinePhase::FileSelected => "FileSelected",
            PipelinePhase::Uploading { .. } => "Uploading",
            PipelinePhase::Analyzing { .. } => "Analyzing",
            PipelinePhase::Complete { .. } => "Complete",
            PipelinePhase::Error { .. } => "Error",
        }
    }
}

/// Which control the dashboard should nudge the user towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Upload,
    Analyze,
    Details,
    None,
}

/// Everything the dashboard renders, owned by the orchestrator.
#[derive(Debug, Clone)]
pub struct PipelineState {
    phase: PipelinePhase,
    selected: Option<SelectedMedia>,
    location: Option<Coordinates>,
    details_visible: bool,
    timings: StageTimings,
    run_id: Option<Uuid>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            phase: PipelinePhase::Idle,
            selected: None,
            location: None,
            details_visible: false,
            timings: StageTimings::new(),
            run_id: None,
        }
    }
}

impl PipelineState {
    pub fn phase(&self) -> &PipelinePhase {
        &self.phase
    }

    pub fn selected(&self) -> Option<&SelectedMedia> {
        self.selected.as_ref()
    }

    pub fn media_kind(&self) -> Option<MediaKind> {
        self.selected.as_ref().map(|m| m.kind)
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        match &self.phase {
            PipelinePhase::Complete { result } => Some(result),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            PipelinePhase::Error { reason } => Some(reason),
            _ => None,
        }
    }

    /// Percentage to display, if any. A completed run always reads 100.
    pub fn progress(&self) -> Option<u8> {
        match &self.phase {
            PipelinePhase::Uploading { progress } | PipelinePhase::Analyzing { progress } => {
                Some(progress.percent())
            }
            PipelinePhase::Complete { .. } => Some(Progress::COMPLETE.percent()),
            _ => None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(
            self.phase,
            PipelinePhase::Uploading { .. } | PipelinePhase::Analyzing { .. }
        )
    }

    pub fn details_visible(&self) -> bool {
        self.details_visible && self.result().is_some()
    }

    pub fn timings(&self) -> &StageTimings {
        &self.timings
    }

    pub fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }

    pub fn next_step(&self) -> NextStep {
        match &self.phase {
            PipelinePhase::Idle => NextStep::Upload,
            PipelinePhase::FileSelected
            | PipelinePhase::Uploading { .. }
            | PipelinePhase::Analyzing { .. }
            | PipelinePhase::Error { .. } => NextStep::Analyze,
            PipelinePhase::Complete { .. } if self.details_visible => NextStep::None,
            PipelinePhase::Complete { .. } => NextStep::Details,
        }
    }

    /// Replace the selection, discarding any previous result.
    pub(crate) fn select(&mut self, media: SelectedMedia) {
        self.selected = Some(media);
        self.phase = PipelinePhase::FileSelected;
        self.location = None;
        self.details_visible = false;
        self.timings.reset();
        self.run_id = None;
    }

    pub(crate) fn begin_upload(&mut self, run_id: Uuid) {
        self.phase = PipelinePhase::Uploading {
            progress: Progress::ZERO,
        };
        self.location = None;
        self.details_visible = false;
        self.timings.reset();
        self.run_id = Some(run_id);
    }

    /// Uploading carries its progress over into Analyzing.
    pub(crate) fn begin_analysis(&mut self) {
        if let PipelinePhase::Uploading { progress } = self.phase {
            self.phase = PipelinePhase::Analyzing { progress };
        }
    }

    /// Returns whether the displayed percentage changed.
    pub(crate) fn tick(&mut self, step: u8, cap: u8) -> bool {
        match &mut self.phase {
            PipelinePhase::Uploading { progress } | PipelinePhase::Analyzing { progress } => {
                let next = progress.advance(step, cap);
                let changed = next != *progress;
                *progress = next;
                changed
            }
            _ => false,
        }
    }

    pub(crate) fn complete(&mut self, result: Arc<AnalysisResult>) {
        self.phase = PipelinePhase::Complete { result };
        self.details_visible = false;
    }

    pub(crate) fn fail(&mut self, reason: impl Into<String>) {
        self.phase = PipelinePhase::Error {
            reason: reason.into(),
        };
        self.details_visible = false;
    }

    pub(crate) fn set_location(&mut self, location: Coordinates) {
        self.location = Some(location);
    }

    pub(crate) fn timings_mut(&mut self) -> &mut StageTimings {
        &mut self.timings
    }

    /// Returns whether visibility changed.
    pub(crate) fn set_details_visible(&mut self, visible: bool) -> bool {
        let visible = visible && self.result().is_some();
        let changed = self.details_visible != visible;
        self.details_visible = visible;
        changed
    }
}
