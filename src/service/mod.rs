pub mod analyze;
pub mod backend;
pub mod recommend;
pub mod report;

pub use analyze::{Analyzer, AnalyzerBuilder, AnalyzerService, BoxedAnalyzer, HttpAnalyzer};
pub use backend::Backend;
pub use recommend::{clean_recommendation, RecommendationClient, RecommendationRequest};
pub use report::{ReportClient, ReportEntry, ReportRequest};
