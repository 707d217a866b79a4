use std::f64::consts::PI;

use serde::Serialize;

use crate::render::round_half_up;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
pub const DATASET_LABEL: &str = "Estimated Solar Generation (kWh)";
pub const CHART_TITLE: &str = "Monthly Energy Production Forecast";

const HOURS_PER_DAY: f64 = 5.0;
const DAYS_PER_MONTH: f64 = 30.0;
const BAR_WIDTH: usize = 40;

/// Twelve monthly kWh values on a synthetic seasonal curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyChart {
    pub values: [f64; 12],
}

impl MonthlyChart {
    pub fn forecast(potential_output_kw: f64) -> Self {
        let base_output = potential_output_kw * HOURS_PER_DAY * DAYS_PER_MONTH;
        let values = std::array::from_fn(|month| {
            round_half_up(base_output * seasonal_factor(month))
        });
        Self { values }
    }

    pub fn labels(&self) -> &'static [&'static str; 12] {
        &MONTHS
    }

    pub fn peak(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// One line per month: label, bar scaled to the peak, value.
    pub fn render_bars(&self) -> Vec<String> {
        let peak = self.peak();
        MONTHS
            .iter()
            .zip(self.values)
            .map(|(month, value)| {
                let bar = if peak > 0.0 {
                    ((value / peak) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                format!(
                    "{month} {:<width$} {value} kWh",
                    "#".repeat(bar),
                    width = BAR_WIDTH
                )
            })
            .collect()
    }
}

pub fn seasonal_factor(month: usize) -> f64 {
    (month as f64 * PI / 6.0).sin() * 0.3 + 0.8
}
