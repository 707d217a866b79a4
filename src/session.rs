use uuid::Uuid;

use crate::devices::CameraSession;
use crate::domain::request::default_time_field;
use crate::domain::{CoordinateInput, ResultSet};
use crate::ui::{Control, LoadingOverlay};

/// Location and time fields of one submission form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub coordinates: CoordinateInput,
    pub time: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            coordinates: CoordinateInput::default(),
            time: default_time_field(),
        }
    }
}

/// Everything one user's page holds between handler calls.
pub struct Session {
    id: Uuid,
    pub results: ResultSet,
    pub recommendation: Option<String>,
    pub camera: CameraSession,
    pub upload_form: FormFields,
    pub camera_form: FormFields,
    pub location_status: String,
    pub camera_analyze: Control,
    pub recommend: Control,
    pub overlay: LoadingOverlay,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            results: ResultSet::new(),
            recommendation: None,
            camera: CameraSession::default(),
            upload_form: FormFields::default(),
            camera_form: FormFields::default(),
            location_status: String::new(),
            camera_analyze: Control::new("Analyze Captured Image", "Processing..."),
            recommend: Control::new("Get AI Recommendations", "Generating..."),
            overlay: LoadingOverlay::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::parse_time;

    #[test]
    fn fresh_session_is_idle_and_empty() {
        let session = Session::new();
        assert!(session.results.is_empty());
        assert!(session.recommendation.is_none());
        assert!(session.camera_analyze.is_enabled());
        assert_eq!(session.recommend.label(), "Get AI Recommendations");
        assert!(!session.overlay.is_visible());
        assert!(parse_time(&session.upload_form.time).is_ok());
        assert_ne!(session.id(), Session::new().id());
    }
}
