use futures::stream::{FuturesUnordered, StreamExt};
use tower::ServiceExt;
use tracing::{debug, info, warn};

use crate::domain::{AnalysisRequest, AnalysisResult, ResultSet, SubmissionMetadata};
use crate::error::AdvisorError;
use crate::intake::{PendingImage, UploadBatch};
use crate::render::{AggregateSummary, ResultCard};
use crate::service::BoxedAnalyzer;
use crate::ui::{Notice, View};

#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutcome {
    Analyzed { name: String },
    Failed { name: String, reason: String },
}

impl ImageOutcome {
    pub fn name(&self) -> &str {
        match self {
            ImageOutcome::Analyzed { name } | ImageOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ImageOutcome::Failed { .. })
    }
}

/// What one multi-image submission settled to, in completion order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub outcomes: Vec<ImageOutcome>,
    pub best: Option<AnalysisResult>,
    pub summary: Option<AggregateSummary>,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &ImageOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }
}

/// Fans a batch out to the analyzer and joins the outcomes.
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    analyzer: BoxedAnalyzer,
}

impl AnalysisOrchestrator {
    pub fn new(analyzer: BoxedAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Every image is read and analyzed independently. Successes are
    /// appended to `results` and carded as they arrive; a failure only
    /// costs its own image. The summary is drawn once all have settled.
    pub async fn run(
        &self,
        batch: UploadBatch,
        results: &mut ResultSet,
        view: &dyn View,
    ) -> BatchReport {
        let UploadBatch { images, metadata } = batch;
        info!("Analyzing {} image(s)", images.len());

        let mut pending: FuturesUnordered<_> = images
            .into_iter()
            .map(|image| {
                let analyzer = self.analyzer.clone();
                async move {
                    let outcome = analyze_image(analyzer, &image, metadata).await;
                    (image, outcome)
                }
            })
            .collect();

        let mut outcomes = Vec::with_capacity(pending.len());
        while let Some((image, outcome)) = pending.next().await {
            let name = image.name().to_string();
            match outcome {
                Ok(result) => {
                    debug!("{} analyzed: {}% free", name, result.free_area());
                    view.show_card(&ResultCard::from_result(&result));
                    results.push(result);
                    outcomes.push(ImageOutcome::Analyzed { name });
                }
                Err(err) => {
                    warn!("Failed to analyze {}: {}", name, err);
                    view.notify(&Notice::warning(format!("Failed to analyze {name}"), &err));
                    outcomes.push(ImageOutcome::Failed {
                        reason: err.to_string(),
                        name,
                    });
                }
            }
        }

        let best = results.best().cloned();
        let summary = best.as_ref().map(AggregateSummary::from_best);
        if let Some(summary) = &summary {
            view.show_summary(summary);
        }
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        info!(
            "Batch settled: {} analyzed, {} failed",
            outcomes.len() - failed,
            failed
        );

        BatchReport {
            outcomes,
            best,
            summary,
        }
    }
}

async fn analyze_image(
    analyzer: BoxedAnalyzer,
    image: &PendingImage,
    metadata: SubmissionMetadata,
) -> Result<AnalysisResult, AdvisorError> {
    let payload = image.load().await?;
    let data_url = payload.data_url();
    let response = analyzer
        .oneshot(AnalysisRequest::new(payload, metadata))
        .await
        .map_err(AdvisorError::from_service)?;
    Ok(response.with_image(data_url))
}
