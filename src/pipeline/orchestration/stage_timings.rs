use indexmap::IndexMap;
use std::time::{Duration, Instant};

/// The ordered stages of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Upload,
    Analyze,
    Geocode,
    Marker,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Upload => "Upload",
            PipelineStage::Analyze => "Analyze",
            PipelineStage::Geocode => "Geocode",
            PipelineStage::Marker => "Marker",
        }
    }
}

/// Tracks how long each stage of the last run took, in the order the stages ran
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    durations: IndexMap<PipelineStage, Duration>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished stage, accumulating if the stage was already seen
    pub fn record(&mut self, stage: PipelineStage, duration: Duration) {
        *self.durations.entry(stage).or_insert(Duration::ZERO) += duration;
    }

    pub fn get(&self, stage: PipelineStage) -> Option<Duration> {
        self.durations.get(&stage).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PipelineStage, Duration)> + '_ {
        self.durations.iter().map(|(stage, duration)| (*stage, *duration))
    }

    pub fn total(&self) -> Duration {
        self.durations.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    pub fn reset(&mut self) {
        self.durations.clear();
    }
}

/// Measures a single stage; hand the result to [`StageTimings::record`].
pub struct StageTimer {
    stage: PipelineStage,
    started: Instant,
}

impl StageTimer {
    pub fn start(stage: PipelineStage) -> Self {
        Self {
            stage,
            started: Instant::now(),
        }
    }

    pub fn finish(self) -> (PipelineStage, Duration) {
        (self.stage, self.started.elapsed())
    }
}
