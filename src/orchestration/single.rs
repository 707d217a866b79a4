use tower::ServiceExt;
use tracing::info;

use crate::devices::CapturedImage;
use crate::domain::{AnalysisRequest, AnalysisResult, SubmissionMetadata};
use crate::error::AdvisorError;
use crate::service::BoxedAnalyzer;

/// Submits one captured still. Its result is the whole result set.
pub async fn submit_single(
    analyzer: &BoxedAnalyzer,
    capture: &CapturedImage,
    metadata: SubmissionMetadata,
) -> Result<AnalysisResult, AdvisorError> {
    let request = AnalysisRequest::new(capture.payload().clone(), metadata);
    let response = analyzer
        .clone()
        .oneshot(request)
        .await
        .map_err(AdvisorError::from_service)?;
    info!(
        "Captured image analyzed: {}% free",
        response.recommended_free_area_percent
    );
    Ok(response.with_image(capture.data_url()))
}
