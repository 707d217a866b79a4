use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::Level;

use crate::domain::Coordinates;
use crate::error::AdvisorError;

pub const DEFAULT_CONFIG_FILE: &str = "solar-advisor.toml";
pub const ENV_PREFIX: &str = "SOLAR_ADVISOR";
pub const DEFAULT_REPORT_FILE: &str = "solar_full_report.pdf";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub backend: BackendConfig,
    pub report: ReportConfig,
    pub location: Option<LocationConfig>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// No timeout is applied unless this is set.
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_name: DEFAULT_REPORT_FILE.to_string(),
        }
    }
}

impl ReportConfig {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationConfig> for Coordinates {
    fn from(value: LocationConfig) -> Self {
        Coordinates::new(value.latitude, value.longitude)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Level {
        self.level.parse().unwrap_or(Level::INFO)
    }
}

impl Configuration {
    /// Layers the optional config file and `SOLAR_ADVISOR__*` environment
    /// variables over the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AdvisorError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let configuration: Configuration = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "backend.base_url must not be empty".to_string(),
            )
            .into());
        }
        if self.backend.request_timeout_secs == Some(0) {
            return Err(config::ConfigError::Message(
                "backend.request_timeout_secs must be at least 1".to_string(),
            )
            .into());
        }
        if self.report.file_name.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "report.file_name must not be empty".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_have_no_timeout() {
        let configuration = Configuration::default();
        assert_eq!(configuration.backend.request_timeout(), None);
        assert_eq!(
            configuration.report.output_path(),
            PathBuf::from(".").join("solar_full_report.pdf")
        );
        assert!(configuration.validate().is_ok());
    }

    #[test]
    fn loads_file_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[backend]\nbase_url = \"http://solar.local:8080\"\nrequest_timeout_secs = 30\n\n[location]\nlatitude = 12.5\nlongitude = 77.25\n"
        )
        .unwrap();

        let configuration = Configuration::load(Some(file.path())).unwrap();
        assert_eq!(configuration.backend.base_url, "http://solar.local:8080");
        assert_eq!(
            configuration.backend.request_timeout(),
            Some(Duration::from_secs(30))
        );
        let location = configuration.location.unwrap();
        assert_eq!(location.latitude, 12.5);
        assert_eq!(configuration.report.file_name, DEFAULT_REPORT_FILE);
    }

    #[test]
    fn rejects_empty_base_url() {
        let mut configuration = Configuration::default();
        configuration.backend.base_url = "  ".to_string();
        assert!(matches!(
            configuration.validate(),
            Err(AdvisorError::Config(_))
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut configuration = Configuration::default();
        configuration.backend.request_timeout_secs = Some(0);
        assert!(configuration.validate().is_err());
        configuration.backend.request_timeout_secs = Some(1);
        assert!(configuration.validate().is_ok());
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let logging = LoggingConfig {
            level: "chatty".to_string(),
        };
        assert_eq!(logging.max_level(), Level::INFO);
        let logging = LoggingConfig {
            level: "debug".to_string(),
        };
        assert_eq!(logging.max_level(), Level::DEBUG);
    }
}
