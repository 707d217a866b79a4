use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::domain::{AnalysisResult, ResultSet, Weather};
use crate::error::AdvisorError;
use crate::service::backend::Backend;

pub const REPORT_PATH: &str = "/download-report";
pub const NO_SUMMARY: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub free_area: f64,
    pub tilt: f64,
    pub orientation_deg: f64,
    pub orientation_dir: String,
    pub image_base64: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
}

impl From<&AnalysisResult> for ReportEntry {
    fn from(result: &AnalysisResult) -> Self {
        let response = &result.response;
        Self {
            free_area: response.recommended_free_area_percent,
            tilt: response.suggested_tilt_angle,
            orientation_deg: response.suggested_orientation_deg,
            orientation_dir: response.suggested_orientation_dir.clone(),
            image_base64: result.image_data_url.clone(),
            latitude: response.latitude,
            longitude: response.longitude,
            weather: response.weather.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRequest {
    pub results: Vec<ReportEntry>,
    pub ai_summary: String,
}

impl ReportRequest {
    /// Every result of the session plus the last recommendation, if any.
    pub fn new(results: &ResultSet, recommendation: Option<&str>) -> Self {
        let ai_summary = recommendation
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_SUMMARY)
            .to_string();
        Self {
            results: results.iter().map(ReportEntry::from).collect(),
            ai_summary,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportClient {
    backend: Backend,
}

impl ReportClient {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn fetch(&self, request: &ReportRequest) -> Result<Vec<u8>, AdvisorError> {
        let response = self
            .backend
            .client()
            .post(self.backend.endpoint(REPORT_PATH))
            .json(request)
            .send()
            .await?;
        let bytes = Backend::check(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Fetches the PDF and writes it to `destination`.
    pub async fn download(
        &self,
        request: &ReportRequest,
        destination: &Path,
    ) -> Result<PathBuf, AdvisorError> {
        let pdf = self.fetch(request).await?;
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(destination, &pdf).await?;
        info!(
            "Saved {} byte report to {}",
            pdf.len(),
            destination.display()
        );
        Ok(destination.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::fixtures::result;

    #[test]
    fn summary_defaults_to_not_available() {
        let results: ResultSet = [result(40.0, "data:a")].into_iter().collect();
        assert_eq!(ReportRequest::new(&results, None).ai_summary, NO_SUMMARY);
        assert_eq!(ReportRequest::new(&results, Some("  ")).ai_summary, NO_SUMMARY);
        assert_eq!(
            ReportRequest::new(&results, Some("Clean panels")).ai_summary,
            "Clean panels"
        );
    }

    #[test]
    fn entries_follow_result_order_and_carry_images() {
        let results: ResultSet = [result(40.0, "data:a"), result(90.0, "data:b")]
            .into_iter()
            .collect();
        let body = serde_json::to_value(ReportRequest::new(&results, None)).unwrap();
        assert_eq!(body["results"][0]["free_area"], 40.0);
        assert_eq!(body["results"][1]["image_base64"], "data:b");
        assert_eq!(body["results"][1]["orientation_dir"], "South");
        assert_eq!(body["ai_summary"], "N/A");
    }
}
