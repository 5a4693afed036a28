pub mod orchestration;
pub mod pipeline_factory;
pub mod services;
pub mod types;

pub use orchestration::{PipelineOrchestrator, RunOutcome};
pub use types::{AnalysisResult, NextStep, PipelinePhase, PipelineState};
