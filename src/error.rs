use thiserror::Error;
use tower::BoxError;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Validation Error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Transport Error: {0}")]
    Transport(#[from] TransportError),
    #[error("Device Error: {0}")]
    Device(#[from] DeviceError),
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AdvisorError {
    /// Recovers the typed error from a tower service failure.
    pub fn from_service(err: BoxError) -> Self {
        match err.downcast::<AdvisorError>() {
            Ok(err) => *err,
            Err(err) if err.is::<tower::timeout::error::Elapsed>() => {
                AdvisorError::Transport(TransportError::Timeout)
            }
            Err(err) => AdvisorError::Transport(TransportError::Service(err.to_string())),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AdvisorError::Validation(_))
    }
}

impl From<reqwest::Error> for AdvisorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return AdvisorError::Transport(TransportError::Timeout);
        }
        AdvisorError::Transport(TransportError::Request(err))
    }
}

// Input rejected before anything is dispatched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter location coordinates")]
    MissingCoordinates,
    #[error("Invalid {field} value: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
    #[error("Invalid time value: {0:?}")]
    InvalidTimestamp(String),
    #[error("Please select at least one image.")]
    NoFilesSelected,
    #[error("Please capture an image before analyzing.")]
    NoCapturedImage,
    #[error("Please open the camera first!")]
    CameraNotOpen,
    #[error("No analysis data found.")]
    NoAnalysisData,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(reqwest::Error),
    #[error("Backend responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Request timed out")]
    Timeout,
    #[error("Service failure: {0}")]
    Service(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeviceError {
    #[error("Location not available: {0}")]
    LocationUnavailable(String),
    #[error("Geolocation not supported")]
    GeolocationUnsupported,
    #[error("Camera access denied or not available: {0}")]
    CameraUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_round_trip_through_box_error() {
        let boxed: BoxError = Box::new(AdvisorError::from(ValidationError::NoFilesSelected));
        let err = AdvisorError::from_service(boxed);
        assert!(matches!(
            err,
            AdvisorError::Validation(ValidationError::NoFilesSelected)
        ));
    }

    #[test]
    fn elapsed_maps_to_timeout() {
        let boxed: BoxError = Box::new(tower::timeout::error::Elapsed::new());
        assert!(matches!(
            AdvisorError::from_service(boxed),
            AdvisorError::Transport(TransportError::Timeout)
        ));
    }

    #[test]
    fn foreign_errors_become_service_failures() {
        let boxed: BoxError = "connection reset".into();
        match AdvisorError::from_service(boxed) {
            AdvisorError::Transport(TransportError::Service(msg)) => {
                assert_eq!(msg, "connection reset")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
