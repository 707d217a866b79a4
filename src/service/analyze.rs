use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tower::timeout::TimeoutLayer;
use tower::util::BoxCloneService;
use tower::{BoxError, Service, ServiceBuilder};
use tracing::debug;

use crate::domain::{AnalysisRequest, AnalysisResponse};
use crate::error::AdvisorError;
use crate::service::backend::Backend;

pub const ANALYZE_PATH: &str = "/analyze";

/// Anything that turns one image plus metadata into site metrics.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, AdvisorError>;
}

/// `POST /analyze` as a multipart form.
pub struct HttpAnalyzer {
    backend: Backend,
}

impl HttpAnalyzer {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    fn form(request: AnalysisRequest) -> Result<Form, AdvisorError> {
        let fields = request.form_fields();
        let (image, _) = request.into_parts();
        let file_name = image.file_name().to_string();
        let mime = image.mime().to_string();
        let part = Part::bytes(image.into_bytes())
            .file_name(file_name)
            .mime_str(&mime)?;
        Ok(fields
            .into_iter()
            .fold(Form::new().part("image", part), |form, (name, value)| {
                form.text(name, value)
            }))
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, AdvisorError> {
        debug!("Submitting {} for analysis", request.image().file_name());
        let response = self
            .backend
            .client()
            .post(self.backend.endpoint(ANALYZE_PATH))
            .multipart(Self::form(request)?)
            .send()
            .await?;
        let response = Backend::check(response).await?;
        Ok(response.json::<AnalysisResponse>().await?)
    }
}

/// Tower adapter so the analyzer can be layered.
#[derive(Clone)]
pub struct AnalyzerService {
    inner: Arc<dyn Analyzer>,
}

impl AnalyzerService {
    pub fn new(inner: Arc<dyn Analyzer>) -> Self {
        Self { inner }
    }
}

impl Service<AnalysisRequest> for AnalyzerService {
    type Response = AnalysisResponse;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: AnalysisRequest) -> Self::Future {
        let inner = self.inner.clone();
        Box::pin(async move { inner.analyze(request).await.map_err(Into::into) })
    }
}

pub type BoxedAnalyzer = BoxCloneService<AnalysisRequest, AnalysisResponse, BoxError>;

pub struct AnalyzerBuilder {
    analyzer: Arc<dyn Analyzer>,
    timeout: Option<Duration>,
}

impl AnalyzerBuilder {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            analyzer,
            timeout: None,
        }
    }

    // Without this the transport's own defaults apply.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> BoxedAnalyzer {
        let service = ServiceBuilder::new()
            .option_layer(self.timeout.map(TimeoutLayer::new))
            .service(AnalyzerService::new(self.analyzer));
        BoxCloneService::new(service)
    }
}
