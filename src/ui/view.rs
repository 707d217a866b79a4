use std::io::{self, Write};

use tracing::{error, info, warn};

use crate::render::chart::{CHART_TITLE, DATASET_LABEL};
use crate::render::{AggregateSummary, ResultCard};
use crate::ui::notice::{Notice, NoticeLevel};

/// The presentation surface the handlers draw on.
pub trait View: Send + Sync {
    /// Appends a card; earlier cards stay.
    fn show_card(&self, card: &ResultCard);
    fn clear_cards(&self);
    fn show_summary(&self, summary: &AggregateSummary);
    fn show_recommendation(&self, text: &str);
    fn set_location_status(&self, status: &str);
    fn notify(&self, notice: &Notice);
}

/// Writes cards and summaries to stdout, notices to stderr.
#[derive(Debug, Default)]
pub struct TerminalView;

impl TerminalView {
    fn print(lines: &[String]) {
        let mut out = io::stdout().lock();
        for line in lines {
            // A closed stdout is not worth failing a submission over.
            let _ = writeln!(out, "{line}");
        }
    }
}

impl View for TerminalView {
    fn show_card(&self, card: &ResultCard) {
        let mut lines = vec![format!("== {} ==", card.title), card.image_label()];
        lines.extend(card.lines.iter().map(|line| format!("  {line}")));
        Self::print(&lines);
    }

    fn clear_cards(&self) {}

    fn show_summary(&self, summary: &AggregateSummary) {
        let mut lines = vec![
            "== Solar Potential ==".to_string(),
            format!("  Sun exposure:      {}", summary.exposure_text()),
            format!("  Optimal tilt:      {}", summary.tilt_text()),
            format!("  Orientation:       {}", summary.orientation_text()),
            format!("  Usable area:       {}", summary.area_text()),
            format!("  Shadow impact:     {}", summary.shadow_impact),
            format!("  Estimated sun:     {}", summary.sun_hours_text()),
            format!("  Potential output:  {}", summary.output_text()),
            format!("  Annual savings:    {}", summary.savings_text()),
            format!("== {CHART_TITLE} ({DATASET_LABEL}) =="),
        ];
        lines.extend(
            summary
                .monthly_output
                .render_bars()
                .into_iter()
                .map(|line| format!("  {line}")),
        );
        Self::print(&lines);
    }

    fn show_recommendation(&self, text: &str) {
        let mut lines = vec!["== AI Recommendations ==".to_string()];
        lines.extend(text.lines().map(|line| format!("  {line}")));
        Self::print(&lines);
    }

    fn set_location_status(&self, status: &str) {
        Self::print(&[status.to_string()]);
    }

    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => info!("{notice}"),
            NoticeLevel::Warning => warn!("{notice}"),
            NoticeLevel::Error => error!("{notice}"),
        }
        let _ = writeln!(io::stderr().lock(), "{}", notice.message);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum ViewEvent {
        Card(ResultCard),
        Cleared,
        Summary(AggregateSummary),
        Recommendation(String),
        Location(String),
        Notice(Notice),
    }

    #[derive(Default)]
    pub struct RecordingView {
        pub events: Mutex<Vec<ViewEvent>>,
    }

    impl RecordingView {
        pub fn events(&self) -> Vec<ViewEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn notices(&self) -> Vec<Notice> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    ViewEvent::Notice(n) => Some(n),
                    _ => None,
                })
                .collect()
        }

        pub fn summaries(&self) -> Vec<AggregateSummary> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    ViewEvent::Summary(s) => Some(s),
                    _ => None,
                })
                .collect()
        }

        pub fn cards(&self) -> Vec<ResultCard> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    ViewEvent::Card(c) => Some(c),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, event: ViewEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl View for RecordingView {
        fn show_card(&self, card: &ResultCard) {
            self.record(ViewEvent::Card(card.clone()));
        }

        fn clear_cards(&self) {
            self.record(ViewEvent::Cleared);
        }

        fn show_summary(&self, summary: &AggregateSummary) {
            self.record(ViewEvent::Summary(summary.clone()));
        }

        fn show_recommendation(&self, text: &str) {
            self.record(ViewEvent::Recommendation(text.to_string()));
        }

        fn set_location_status(&self, status: &str) {
            self.record(ViewEvent::Location(status.to_string()));
        }

        fn notify(&self, notice: &Notice) {
            self.record(ViewEvent::Notice(notice.clone()));
        }
    }
}
