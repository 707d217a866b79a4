pub mod capture;
pub mod location;

pub use capture::{CameraDevice, CameraSession, CapturedImage, FrameStream, StillImageCamera};
pub use location::{FixedLocation, LocationProvider, NoGeolocation};
