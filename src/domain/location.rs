use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn status_text(&self) -> String {
        format!("Location: {self}")
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}° N, {:.6}° W", self.latitude, self.longitude)
    }
}

/// The raw latitude/longitude text fields of a submission form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateInput {
    pub latitude: String,
    pub longitude: String,
}

impl CoordinateInput {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Fills both fields with six-decimal values.
    pub fn fill(&mut self, coordinates: Coordinates) {
        self.latitude = format!("{:.6}", coordinates.latitude);
        self.longitude = format!("{:.6}", coordinates.longitude);
    }

    pub fn is_blank(&self) -> bool {
        self.latitude.trim().is_empty() || self.longitude.trim().is_empty()
    }

    pub fn parse(&self) -> Result<Coordinates, ValidationError> {
        if self.is_blank() {
            return Err(ValidationError::MissingCoordinates);
        }
        Ok(Coordinates::new(
            parse_field("latitude", &self.latitude)?,
            parse_field("longitude", &self.longitude)?,
        ))
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_missing_coordinates() {
        assert_eq!(
            CoordinateInput::new("", "77.1").parse(),
            Err(ValidationError::MissingCoordinates)
        );
        assert_eq!(
            CoordinateInput::new("12.9", "   ").parse(),
            Err(ValidationError::MissingCoordinates)
        );
    }

    #[test]
    fn garbage_is_rejected_per_field() {
        let err = CoordinateInput::new("12.9", "east").parse().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCoordinate {
                field: "longitude",
                value: "east".to_string()
            }
        );
    }

    #[test]
    fn fill_uses_six_decimals() {
        let mut input = CoordinateInput::default();
        input.fill(Coordinates::new(12.97159, 77.5946));
        assert_eq!(input.latitude, "12.971590");
        assert_eq!(input.longitude, "77.594600");
        assert_eq!(input.parse().unwrap(), Coordinates::new(12.97159, 77.5946));
    }

    #[test]
    fn status_text_matches_location_card() {
        let status = Coordinates::new(1.5, 2.25).status_text();
        assert_eq!(status, "Location: 1.500000° N, 2.250000° W");
    }
}
