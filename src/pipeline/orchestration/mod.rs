pub mod orchestrator;
pub mod progress;
pub mod stage_timings;

pub use orchestrator::{PipelineOrchestrator, PipelineOrchestratorBuilder, RunOutcome};
pub use progress::ProgressTicker;
pub use stage_timings::{PipelineStage, StageTimer, StageTimings};
