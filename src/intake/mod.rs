pub mod collector;

pub use collector::{PendingImage, UploadBatch, UploadCollector};
