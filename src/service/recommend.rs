use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AnalysisResult, Weather};
use crate::error::AdvisorError;
use crate::service::backend::Backend;

pub const RECOMMEND_PATH: &str = "/recommend";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRequest {
    pub free_area: f64,
    pub tilt: f64,
    pub orientation_deg: f64,
    pub orientation_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
}

impl From<&AnalysisResult> for RecommendationRequest {
    fn from(best: &AnalysisResult) -> Self {
        let response = &best.response;
        Self {
            free_area: response.recommended_free_area_percent,
            tilt: response.suggested_tilt_angle,
            orientation_deg: response.suggested_orientation_deg,
            orientation_dir: response.suggested_orientation_dir.clone(),
            latitude: response.latitude,
            longitude: response.longitude,
            weather: response.weather.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationResponse {
    recommendation: String,
}

#[derive(Debug, Clone)]
pub struct RecommendationClient {
    backend: Backend,
}

impl RecommendationClient {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Returns the cleaned recommendation text.
    pub async fn recommend(&self, request: &RecommendationRequest) -> Result<String, AdvisorError> {
        let response = self
            .backend
            .client()
            .post(self.backend.endpoint(RECOMMEND_PATH))
            .json(request)
            .send()
            .await?;
        let body: RecommendationResponse = Backend::check(response).await?.json().await?;
        debug!("Received {} bytes of recommendation", body.recommendation.len());
        Ok(clean_recommendation(&body.recommendation))
    }
}

static LINE_BULLETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^\*+\s?").expect("line bullet pattern"));
static INNER_BULLETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\*").expect("inner bullet pattern"));
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("blank line pattern"));

/// Drops leading `*` bullets, collapses blank lines and trims.
pub fn clean_recommendation(text: &str) -> String {
    let text = LINE_BULLETS.replace_all(text, "");
    let text = INNER_BULLETS.replace_all(&text, "\n");
    BLANK_LINES.replace_all(&text, "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::fixtures::result;

    #[test]
    fn strips_bullets_and_blank_lines() {
        let raw = "* Mount panels facing South.\n\n* Keep tilt near 30°.\n** Trim the tree.\n\n\n";
        assert_eq!(
            clean_recommendation(raw),
            "Mount panels facing South.\nKeep tilt near 30°.\nTrim the tree."
        );
    }

    #[test]
    fn keeps_inline_asterisks() {
        assert_eq!(
            clean_recommendation("Expect 5*30 kWh per month"),
            "Expect 5*30 kWh per month"
        );
    }

    #[test]
    fn second_bullet_after_space_is_removed_by_newline_rule() {
        assert_eq!(clean_recommendation("intro\n* *nested"), "intro\nnested");
    }

    #[test]
    fn bullets_after_carriage_returns_are_stripped() {
        assert_eq!(
            clean_recommendation("* Clean panels\r\n* Check wiring"),
            "Clean panels\r\nCheck wiring"
        );
    }

    #[test]
    fn bare_bullet_line_joins_next_line() {
        assert_eq!(clean_recommendation("*\nClean panels"), "Clean panels");
    }

    #[test]
    fn request_uses_best_result_fields() {
        let mut best = result(88.0, "img");
        best.response.latitude = Some(12.9);
        let request = RecommendationRequest::from(&best);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["free_area"], 88.0);
        assert_eq!(body["tilt"], 30.0);
        assert_eq!(body["orientation_deg"], 180.0);
        assert_eq!(body["orientation_dir"], "South");
        assert_eq!(body["latitude"], 12.9);
        assert!(body.get("longitude").is_none());
        assert!(body.get("weather").is_none());
    }
}
