pub mod card;
pub mod chart;
pub mod summary;

pub use card::ResultCard;
pub use chart::{MonthlyChart, MONTHS};
pub use summary::{AggregateSummary, ShadowImpact};

/// Rounds halves up, as the page's arithmetic does.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds to one decimal place, halves away from zero. The sign is kept,
/// so small negatives come out as `-0.0`.
pub(crate) fn round_tenths(value: f64) -> f64 {
    (round_half_up(value.abs() * 10.0) / 10.0).copysign(value)
}
