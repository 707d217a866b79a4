pub mod orchestrator;
pub mod single;

pub use orchestrator::{AnalysisOrchestrator, BatchReport, ImageOutcome};
pub use single::submit_single;
