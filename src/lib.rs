pub mod advisor;
pub mod config;
pub mod devices;
pub mod domain;
pub mod error;
pub mod intake;
pub mod orchestration;
pub mod render;
pub mod service;
pub mod session;
pub mod ui;

pub use advisor::{Advisor, AdvisorBuilder};
pub use config::Configuration;
pub use error::{AdvisorError, DeviceError, TransportError, ValidationError};
pub use session::Session;
