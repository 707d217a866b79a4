pub mod image;
pub mod location;
pub mod request;
pub mod result;

pub use image::ImagePayload;
pub use location::{CoordinateInput, Coordinates};
pub use request::{AnalysisRequest, SubmissionMetadata, TIME_FORMAT};
pub use result::{AnalysisResponse, AnalysisResult, Obstruction, ResultSet, Weather};
