pub mod analysis_result;
pub mod state;

pub use analysis_result::{AiAnalysis, AnalysisResult, Confidence};
pub use state::{NextStep, PipelinePhase, PipelineState, Progress};
