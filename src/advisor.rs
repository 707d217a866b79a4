use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::config::Configuration;
use crate::devices::location::failure_status;
use crate::devices::{CameraDevice, CapturedImage, FixedLocation, LocationProvider, NoGeolocation};
use crate::domain::{AnalysisResult, Coordinates, ResultSet, SubmissionMetadata};
use crate::error::{AdvisorError, ValidationError};
use crate::intake::UploadCollector;
use crate::orchestration::{submit_single, AnalysisOrchestrator, BatchReport};
use crate::render::AggregateSummary;
use crate::service::{
    Analyzer, AnalyzerBuilder, Backend, BoxedAnalyzer, HttpAnalyzer, RecommendationClient,
    RecommendationRequest, ReportClient, ReportRequest,
};
use crate::session::Session;
use crate::ui::{Notice, TerminalView, View};

/// The page's event handlers, each working on an explicit [`Session`].
pub struct Advisor {
    orchestrator: AnalysisOrchestrator,
    analyzer: BoxedAnalyzer,
    recommender: RecommendationClient,
    reports: ReportClient,
    location: Arc<dyn LocationProvider>,
    view: Arc<dyn View>,
    report_path: PathBuf,
}

impl Advisor {
    pub fn builder(configuration: Configuration) -> AdvisorBuilder {
        AdvisorBuilder::new(configuration)
    }

    pub fn view(&self) -> &dyn View {
        self.view.as_ref()
    }

    pub fn report_path(&self) -> &PathBuf {
        &self.report_path
    }

    fn reject(&self, err: AdvisorError) -> AdvisorError {
        self.view.notify(&Notice::rejected(&err));
        err
    }

    /// Fills both forms from the location provider. On failure the
    /// fields are left for manual entry.
    #[instrument(skip_all, fields(session = %session.id()))]
    pub async fn locate(&self, session: &mut Session) -> Result<Coordinates, AdvisorError> {
        match self.location.current_position().await {
            Ok(coordinates) => {
                session.upload_form.coordinates.fill(coordinates);
                session.camera_form.coordinates.fill(coordinates);
                session.location_status = coordinates.status_text();
                self.view.set_location_status(&session.location_status);
                Ok(coordinates)
            }
            Err(err) => {
                warn!("Error getting location: {}", err);
                session.location_status = failure_status(&err).to_string();
                self.view.set_location_status(&session.location_status);
                Err(err)
            }
        }
    }

    /// Multi-image path. The previous result set is replaced.
    #[instrument(skip_all, fields(session = %session.id()))]
    pub async fn submit_upload(
        &self,
        session: &mut Session,
        collector: UploadCollector,
    ) -> Result<BatchReport, AdvisorError> {
        let form = &session.upload_form;
        let batch = collector
            .collect(&form.coordinates, &form.time)
            .map_err(|e| self.reject(e.into()))?;

        let _loading = session.overlay.show();
        session.results.clear();
        self.view.clear_cards();
        let report = self
            .orchestrator
            .run(batch, &mut session.results, self.view.as_ref())
            .await;
        Ok(report)
    }

    #[instrument(skip_all, fields(session = %session.id()))]
    pub async fn open_camera(
        &self,
        session: &mut Session,
        device: &dyn CameraDevice,
    ) -> Result<(), AdvisorError> {
        session.camera.open(device).await.map_err(|err| {
            self.view
                .notify(&Notice::error("Camera access denied or not available.", &err));
            err
        })
    }

    pub fn snap(&self, session: &mut Session) -> Result<CapturedImage, AdvisorError> {
        match session.camera.snap() {
            Ok(capture) => Ok(capture.clone()),
            Err(err) if err.is_validation() => Err(self.reject(err)),
            Err(err) => {
                self.view.notify(&Notice::error("Could not capture a frame.", &err));
                Err(err)
            }
        }
    }

    pub fn stop_camera(&self, session: &mut Session) {
        session.camera.stop();
    }

    /// Camera path: one still, one request. The analyze control stays
    /// disabled while it is in flight.
    #[instrument(skip_all, fields(session = %session.id()))]
    pub async fn submit_capture(
        &self,
        session: &mut Session,
    ) -> Result<AnalysisResult, AdvisorError> {
        let capture = session
            .camera
            .last_capture()
            .cloned()
            .ok_or_else(|| self.reject(ValidationError::NoCapturedImage.into()))?;
        let form = &session.camera_form;
        let metadata = SubmissionMetadata::from_form(&form.coordinates, &form.time)
            .map_err(|e| self.reject(e.into()))?;

        let outcome = {
            let _busy = session.camera_analyze.busy();
            let _loading = session.overlay.show();
            submit_single(&self.analyzer, &capture, metadata).await
        };

        match outcome {
            Ok(result) => {
                session.results = ResultSet::single(result.clone());
                self.view.show_summary(&AggregateSummary::from_best(&result));
                session.camera.stop();
                Ok(result)
            }
            Err(err) => {
                self.view
                    .notify(&Notice::error("Analysis failed. Please try again.", &err));
                Err(err)
            }
        }
    }

    /// Asks for advice on the current best result.
    #[instrument(skip_all, fields(session = %session.id()))]
    pub async fn recommend(&self, session: &mut Session) -> Result<String, AdvisorError> {
        let request = session
            .results
            .best()
            .map(RecommendationRequest::from)
            .ok_or_else(|| self.reject(ValidationError::NoAnalysisData.into()))?;

        let outcome = {
            let _busy = session.recommend.busy();
            let _loading = session.overlay.show();
            self.recommender.recommend(&request).await
        };

        match outcome {
            Ok(text) => {
                self.view.show_recommendation(&text);
                session.recommendation = Some(text.clone());
                Ok(text)
            }
            Err(err) => {
                self.view
                    .notify(&Notice::error("Failed to fetch AI recommendation.", &err));
                Err(err)
            }
        }
    }

    /// Downloads the PDF for every result in the session.
    #[instrument(skip_all, fields(session = %session.id()))]
    pub async fn download_report(&self, session: &mut Session) -> Result<PathBuf, AdvisorError> {
        let request = ReportRequest::new(&session.results, session.recommendation.as_deref());
        let _loading = session.overlay.show();
        match self.reports.download(&request, &self.report_path).await {
            Ok(path) => {
                info!("Report written for {} result(s)", request.results.len());
                self.view
                    .notify(&Notice::info(format!("Report saved to {}", path.display())));
                Ok(path)
            }
            Err(err) => {
                self.view.notify(&Notice::error("Failed to generate report.", &err));
                Err(err)
            }
        }
    }
}

pub struct AdvisorBuilder {
    configuration: Configuration,
    request_timeout: Option<Duration>,
    analyzer: Option<Arc<dyn Analyzer>>,
    location: Option<Arc<dyn LocationProvider>>,
    view: Option<Arc<dyn View>>,
}

impl AdvisorBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            request_timeout: None,
            analyzer: None,
            location: None,
            view: None,
        }
    }

    // Sets the backend URL, this will override the configuration.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.configuration.backend.base_url = base_url.into();
        self
    }

    // Sets where reports are saved, this will override the configuration.
    pub fn report_dir(mut self, report_dir: impl Into<PathBuf>) -> Self {
        self.configuration.report.output_dir = report_dir.into();
        self
    }

    // Bounds every backend request, this will override the configuration.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    // Replaces the HTTP analyzer, e.g. with an offline one.
    pub fn analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn location(mut self, location: Arc<dyn LocationProvider>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn view(mut self, view: Arc<dyn View>) -> Self {
        self.view = Some(view);
        self
    }

    pub fn build(self) -> Result<Advisor, AdvisorError> {
        self.configuration.validate()?;
        let timeout = self
            .request_timeout
            .or_else(|| self.configuration.backend.request_timeout());
        let backend = Backend::new(self.configuration.backend.base_url.clone(), timeout)?;

        let analyzer: Arc<dyn Analyzer> = match self.analyzer {
            Some(analyzer) => analyzer,
            None => Arc::new(HttpAnalyzer::new(backend.clone())),
        };
        let analyzer = AnalyzerBuilder::new(analyzer)
            .timeout(timeout)
            .build();

        let location: Arc<dyn LocationProvider> = match (self.location, self.configuration.location) {
            (Some(location), _) => location,
            (None, Some(fixed)) => Arc::new(FixedLocation::new(fixed.into())),
            (None, None) => Arc::new(NoGeolocation),
        };
        let view: Arc<dyn View> = match self.view {
            Some(view) => view,
            None => Arc::new(TerminalView),
        };

        Ok(Advisor {
            orchestrator: AnalysisOrchestrator::new(analyzer.clone()),
            analyzer,
            recommender: RecommendationClient::new(backend.clone()),
            reports: ReportClient::new(backend),
            location,
            view,
            report_path: self.configuration.report.output_path(),
        })
    }
}
