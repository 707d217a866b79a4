//! Aggregate figures derived from the best result of a submission.
//!
//! These are presentation heuristics, not a physical model. The constants
//! are fixed: 80% of free area becomes usable square metres, 150 W per m²,
//! five sun hours a day and 0.12 per kWh.

use std::fmt;

use serde::Serialize;

use crate::domain::AnalysisResult;
use crate::render::chart::MonthlyChart;
use crate::render::{round_half_up, round_tenths};

const USABLE_FRACTION: f64 = 0.8;
const KW_PER_M2: f64 = 0.15;
const ASSUMED_SUN_HOURS: f64 = 5.0;
const DAYS_PER_YEAR: f64 = 365.0;
const RATE_PER_KWH: f64 = 0.12;
const SUN_ALTITUDE_PER_HOUR: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShadowImpact {
    Low,
    Medium,
    High,
}

impl ShadowImpact {
    pub fn from_free_area(free_area: f64) -> Self {
        if free_area > 70.0 {
            ShadowImpact::Low
        } else if free_area > 40.0 {
            ShadowImpact::Medium
        } else {
            ShadowImpact::High
        }
    }
}

impl fmt::Display for ShadowImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShadowImpact::Low => "Low",
            ShadowImpact::Medium => "Medium",
            ShadowImpact::High => "High",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub exposure_percent: f64,
    pub tilt_angle: f64,
    pub orientation_dir: String,
    pub orientation_deg: f64,
    pub usable_area_m2: f64,
    pub shadow_impact: ShadowImpact,
    pub sun_hours_per_day: f64,
    pub potential_output_kw: f64,
    pub annual_savings: f64,
    pub monthly_output: MonthlyChart,
    pub image_data_url: String,
}

impl AggregateSummary {
    pub fn from_best(best: &AnalysisResult) -> Self {
        let response = &best.response;
        let free_area = response.recommended_free_area_percent;
        let usable_area_m2 = round_half_up(free_area * USABLE_FRACTION);
        let potential_output_kw = round_tenths(usable_area_m2 * KW_PER_M2);
        let annual_savings = round_half_up(
            potential_output_kw * ASSUMED_SUN_HOURS * DAYS_PER_YEAR * RATE_PER_KWH,
        );
        Self {
            exposure_percent: usable_area_m2.min(100.0),
            tilt_angle: response.suggested_tilt_angle,
            orientation_dir: response.suggested_orientation_dir.clone(),
            orientation_deg: response.suggested_orientation_deg,
            usable_area_m2,
            shadow_impact: ShadowImpact::from_free_area(free_area),
            sun_hours_per_day: round_tenths(response.sun_altitude / SUN_ALTITUDE_PER_HOUR),
            potential_output_kw,
            annual_savings,
            monthly_output: MonthlyChart::forecast(potential_output_kw),
            image_data_url: best.image_data_url.clone(),
        }
    }

    pub fn exposure_text(&self) -> String {
        format!("{}%", self.exposure_percent)
    }

    pub fn tilt_text(&self) -> String {
        format!("{}°", self.tilt_angle)
    }

    pub fn orientation_text(&self) -> String {
        format!("{} ({}°)", self.orientation_dir, self.orientation_deg)
    }

    pub fn area_text(&self) -> String {
        format!("{} m²", self.usable_area_m2)
    }

    pub fn sun_hours_text(&self) -> String {
        format!("{:.1} hours/day", self.sun_hours_per_day)
    }

    pub fn output_text(&self) -> String {
        format!("{:.1} kW", self.potential_output_kw)
    }

    pub fn savings_text(&self) -> String {
        format!("${}", self.annual_savings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::fixtures::result;

    #[test]
    fn sun_below_horizon_shows_negative_hours() {
        let mut best = result(80.0, "data:night");
        best.response.sun_altitude = -3.75;
        assert_eq!(
            AggregateSummary::from_best(&best).sun_hours_text(),
            "-0.3 hours/day"
        );
        best.response.sun_altitude = -0.6;
        assert_eq!(
            AggregateSummary::from_best(&best).sun_hours_text(),
            "-0.0 hours/day"
        );
    }

    #[test]
    fn derived_figures_for_eighty_percent() {
        let summary = AggregateSummary::from_best(&result(80.0, "data:best"));
        assert_eq!(summary.exposure_percent, 64.0);
        assert_eq!(summary.usable_area_m2, 64.0);
        assert_eq!(summary.shadow_impact, ShadowImpact::Low);
        assert_eq!(summary.sun_hours_per_day, 3.0);
        assert_eq!(summary.potential_output_kw, 9.6);
        assert_eq!(summary.annual_savings, 2102.0);

        assert_eq!(summary.exposure_text(), "64%");
        assert_eq!(summary.tilt_text(), "30°");
        assert_eq!(summary.orientation_text(), "South (180°)");
        assert_eq!(summary.area_text(), "64 m²");
        assert_eq!(summary.sun_hours_text(), "3.0 hours/day");
        assert_eq!(summary.output_text(), "9.6 kW");
        assert_eq!(summary.savings_text(), "$2102");
        assert_eq!(summary.image_data_url, "data:best");
    }

    #[test]
    fn shadow_impact_boundaries_are_strict() {
        assert_eq!(ShadowImpact::from_free_area(70.0), ShadowImpact::Medium);
        assert_eq!(ShadowImpact::from_free_area(70.01), ShadowImpact::Low);
        assert_eq!(ShadowImpact::from_free_area(40.0), ShadowImpact::High);
        assert_eq!(ShadowImpact::from_free_area(40.01), ShadowImpact::Medium);
        assert_eq!(ShadowImpact::High.to_string(), "High");
    }

    #[test]
    fn exposure_is_capped_at_one_hundred() {
        let mut best = result(100.0, "x");
        best.response.recommended_free_area_percent = 130.0;
        let summary = AggregateSummary::from_best(&best);
        assert_eq!(summary.usable_area_m2, 104.0);
        assert_eq!(summary.exposure_percent, 100.0);
    }

    #[test]
    fn usable_area_rounds_half_up() {
        // 0.8 * 56.875 = 45.5
        let summary = AggregateSummary::from_best(&result(56.875, "x"));
        assert_eq!(summary.usable_area_m2, 46.0);
        assert_eq!(summary.exposure_percent, 46.0);
    }
}
