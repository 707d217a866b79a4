use crate::domain::AnalysisResult;

pub const CARD_TITLE: &str = "Analysis Result";

/// Self-contained rendering of one analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub title: &'static str,
    pub image_data_url: String,
    pub lines: Vec<String>,
}

impl ResultCard {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let response = &result.response;
        let mut lines = vec![
            format!("Free Area: {}%", response.recommended_free_area_percent),
            format!("Tilt: {}°", response.suggested_tilt_angle),
            format!(
                "Orientation: {} ({}°)",
                response.suggested_orientation_dir, response.suggested_orientation_deg
            ),
            response.message.clone(),
        ];
        if !response.obstructions.is_empty() {
            lines.push(format!("Obstructions: {}", response.obstructions.len()));
        }
        if let Some(weather) = &response.weather {
            match (&weather.condition, weather.temp_c) {
                (Some(condition), Some(temp)) => {
                    lines.push(format!("Weather: {condition}, {temp}°C"))
                }
                (Some(condition), None) => lines.push(format!("Weather: {condition}")),
                _ => {}
            }
        }
        Self {
            title: CARD_TITLE,
            image_data_url: result.image_data_url.clone(),
            lines,
        }
    }

    /// Short form of the image reference for text output.
    pub fn image_label(&self) -> String {
        match self.image_data_url.split_once(',') {
            Some((header, data)) => format!("{header},… ({} base64 chars)", data.len()),
            None => self.image_data_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::fixtures::result;
    use crate::domain::{Obstruction, Weather};

    #[test]
    fn card_formats_core_metrics() {
        let card = ResultCard::from_result(&result(62.5, "data:image/png;base64,AAAA"));
        assert_eq!(card.title, "Analysis Result");
        assert_eq!(
            card.lines,
            [
                "Free Area: 62.5%",
                "Tilt: 30°",
                "Orientation: South (180°)",
                "Place panels in largest shadow-free zones facing South with tilt 30°!",
            ]
        );
        assert_eq!(card.image_label(), "data:image/png;base64,… (4 base64 chars)");
    }

    #[test]
    fn card_mentions_weather_and_obstructions_when_present() {
        let mut analysed = result(50.0, "x");
        analysed.response.obstructions.push(Obstruction {
            label: "tank".to_string(),
            confidence: 0.8,
            bbox: [0, 0, 10, 10],
        });
        analysed.response.weather = Some(Weather {
            temp_c: Some(24.0),
            condition: Some("Sunny".to_string()),
            wind_kph: None,
            humidity: None,
            uv: None,
            cloud: None,
            icon: None,
        });
        let card = ResultCard::from_result(&analysed);
        assert_eq!(card.lines[4], "Obstructions: 1");
        assert_eq!(card.lines[5], "Weather: Sunny, 24°C");
    }
}
