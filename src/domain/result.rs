use serde::{Deserialize, Serialize};

/// A detected obstruction, in image pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstruction {
    pub label: String,
    pub confidence: f64,
    pub bbox: [i64; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temp_c: Option<f64>,
    pub condition: Option<String>,
    pub wind_kph: Option<f64>,
    pub humidity: Option<f64>,
    pub uv: Option<f64>,
    pub cloud: Option<f64>,
    pub icon: Option<String>,
}

/// The analyzer's JSON body. It never includes the image itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub recommended_free_area_percent: f64,
    pub suggested_tilt_angle: f64,
    pub suggested_orientation_dir: String,
    pub suggested_orientation_deg: f64,
    pub sun_altitude: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun_azimuth: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub obstructions: Vec<Obstruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solar_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl AnalysisResponse {
    /// Attaches the data-URI of the image this response was computed from.
    pub fn with_image(self, image_data_url: impl Into<String>) -> AnalysisResult {
        AnalysisResult {
            response: self,
            image_data_url: image_data_url.into(),
        }
    }
}

/// A response decorated client-side with its source image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub response: AnalysisResponse,
    #[serde(rename = "imageDataUrl")]
    pub image_data_url: String,
}

impl AnalysisResult {
    pub fn free_area(&self) -> f64 {
        self.response.recommended_free_area_percent
    }
}

/// Results of one analysis session, in completion order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    results: Vec<AnalysisResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(result: AnalysisResult) -> Self {
        Self {
            results: vec![result],
        }
    }

    pub fn push(&mut self, result: AnalysisResult) {
        self.results.push(result);
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter()
    }

    pub fn first(&self) -> Option<&AnalysisResult> {
        self.results.first()
    }

    /// The entry with the largest free area. Ties keep the earliest entry.
    pub fn best(&self) -> Option<&AnalysisResult> {
        self.results.iter().fold(None, |best, current| match best {
            Some(best) if current.free_area() <= best.free_area() => Some(best),
            _ => Some(current),
        })
    }
}

impl FromIterator<AnalysisResult> for ResultSet {
    fn from_iter<T: IntoIterator<Item = AnalysisResult>>(iter: T) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a AnalysisResult;
    type IntoIter = std::slice::Iter<'a, AnalysisResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn response(free_area: f64) -> AnalysisResponse {
        AnalysisResponse {
            recommended_free_area_percent: free_area,
            suggested_tilt_angle: 30.0,
            suggested_orientation_dir: "South".to_string(),
            suggested_orientation_deg: 180.0,
            sun_altitude: 45.0,
            message: "Place panels in largest shadow-free zones facing South with tilt 30°!"
                .to_string(),
            sun_azimuth: None,
            obstructions: Vec::new(),
            weather: None,
            solar_index: None,
            exposure_hours: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn result(free_area: f64, image: &str) -> AnalysisResult {
        response(free_area).with_image(image)
    }
}
