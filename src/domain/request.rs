use chrono::{Local, NaiveDateTime, Timelike};

use crate::domain::image::ImagePayload;
use crate::domain::location::{CoordinateInput, Coordinates};
use crate::error::ValidationError;

/// Local datetime format of the `time` form field.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const TIME_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Location and time shared by every image of one submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmissionMetadata {
    pub coordinates: Coordinates,
    pub timestamp: NaiveDateTime,
}

impl SubmissionMetadata {
    pub fn new(coordinates: Coordinates, timestamp: NaiveDateTime) -> Self {
        Self {
            coordinates,
            timestamp,
        }
    }

    /// Validates the form fields. A blank time means "now".
    pub fn from_form(fields: &CoordinateInput, time: &str) -> Result<Self, ValidationError> {
        let coordinates = fields.parse()?;
        let timestamp = if time.trim().is_empty() {
            now()
        } else {
            parse_time(time)?
        };
        Ok(Self::new(coordinates, timestamp))
    }

    /// Minutes precision unless the entered time carried seconds.
    pub fn time_field(&self) -> String {
        let format = if self.timestamp.second() == 0 {
            TIME_FORMAT
        } else {
            TIME_FORMAT_SECONDS
        };
        self.timestamp.format(format).to_string()
    }
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn default_time_field() -> String {
    now().format(TIME_FORMAT).to_string()
}

pub fn parse_time(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIME_FORMAT_SECONDS))
        .map_err(|_| ValidationError::InvalidTimestamp(value.to_string()))
}

/// One image bound for `/analyze`. Immutable once built.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    image: ImagePayload,
    metadata: SubmissionMetadata,
}

impl AnalysisRequest {
    pub fn new(image: ImagePayload, metadata: SubmissionMetadata) -> Self {
        Self { image, metadata }
    }

    pub fn image(&self) -> &ImagePayload {
        &self.image
    }

    pub fn metadata(&self) -> &SubmissionMetadata {
        &self.metadata
    }

    /// The text fields sent alongside the image part.
    pub fn form_fields(&self) -> [(&'static str, String); 3] {
        [
            ("latitude", self.metadata.coordinates.latitude.to_string()),
            ("longitude", self.metadata.coordinates.longitude.to_string()),
            ("time", self.metadata.time_field()),
        ]
    }

    pub fn into_parts(self) -> (ImagePayload, SubmissionMetadata) {
        (self.image, self.metadata)
    }
}
