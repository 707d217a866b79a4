use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info};

use crate::domain::ImagePayload;
use crate::error::{AdvisorError, DeviceError, ValidationError};

pub const CAPTURE_FILE_NAME: &str = "capture.jpg";

/// A source of video streams, e.g. the rear-facing camera.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    async fn open(&self) -> Result<Box<dyn FrameStream>, AdvisorError>;
}

/// An acquired stream. Holding one holds the device.
pub trait FrameStream: Send {
    fn grab(&mut self) -> Result<DynamicImage, AdvisorError>;
    fn stop(&mut self);
}

/// A still captured from the stream, already encoded to JPEG.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    payload: ImagePayload,
    data_url: String,
}

impl CapturedImage {
    pub fn encode(frame: &DynamicImage) -> Result<Self, AdvisorError> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(frame.to_rgb8()).write_to(&mut buffer, ImageFormat::Jpeg)?;
        let payload = ImagePayload::jpeg(CAPTURE_FILE_NAME, buffer.into_inner());
        let data_url = payload.data_url();
        Ok(Self { payload, data_url })
    }

    pub fn payload(&self) -> &ImagePayload {
        &self.payload
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

/// Camera state owned by a session: the open stream and the last still.
#[derive(Default)]
pub struct CameraSession {
    stream: Option<Box<dyn FrameStream>>,
    last_capture: Option<CapturedImage>,
}

impl CameraSession {
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub fn last_capture(&self) -> Option<&CapturedImage> {
        self.last_capture.as_ref()
    }

    /// Acquires the device. An already open stream is released first.
    pub async fn open(&mut self, device: &dyn CameraDevice) -> Result<(), AdvisorError> {
        self.stop();
        let stream = device.open().await?;
        info!("Camera stream opened");
        self.stream = Some(stream);
        Ok(())
    }

    pub fn snap(&mut self) -> Result<&CapturedImage, AdvisorError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or(ValidationError::CameraNotOpen)?;
        let frame = stream.grab()?;
        debug!("Captured {}x{} frame", frame.width(), frame.height());
        Ok(&*self.last_capture.insert(CapturedImage::encode(&frame)?))
    }

    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            info!("Camera stream released");
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Serves a still image file as if it were a live camera feed.
pub struct StillImageCamera {
    path: PathBuf,
}

impl StillImageCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CameraDevice for StillImageCamera {
    async fn open(&self) -> Result<Box<dyn FrameStream>, AdvisorError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DeviceError::CameraUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let frame = image::load_from_memory(&bytes)
            .map_err(|e| DeviceError::CameraUnavailable(e.to_string()))?;
        Ok(Box::new(StillStream { frame: Some(frame) }))
    }
}

struct StillStream {
    frame: Option<DynamicImage>,
}

impl FrameStream for StillStream {
    fn grab(&mut self) -> Result<DynamicImage, AdvisorError> {
        self.frame
            .clone()
            .ok_or_else(|| DeviceError::CameraUnavailable("stream stopped".to_string()).into())
    }

    fn stop(&mut self) {
        self.frame = None;
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub fn frame() -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(
            16,
            12,
            Rgb([200, 180, 40]),
        ))
    }

    /// In-memory camera counting how many streams are live.
    #[derive(Clone, Default)]
    pub struct TestCamera {
        pub live: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CameraDevice for TestCamera {
        async fn open(&self) -> Result<Box<dyn FrameStream>, AdvisorError> {
            self.live.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(TestStream {
                live: self.live.clone(),
                stopped: false,
            }))
        }
    }

    struct TestStream {
        live: Arc<AtomicUsize>,
        stopped: bool,
    }

    impl FrameStream for TestStream {
        fn grab(&mut self) -> Result<DynamicImage, AdvisorError> {
            Ok(frame())
        }

        fn stop(&mut self) {
            if !self.stopped {
                self.stopped = true;
                self.live.fetch_sub(1, Ordering::SeqCst);
            }
        }
    }

    pub struct DeniedCamera;

    #[async_trait]
    impl CameraDevice for DeniedCamera {
        async fn open(&self) -> Result<Box<dyn FrameStream>, AdvisorError> {
            Err(DeviceError::CameraUnavailable("permission denied".to_string()).into())
        }
    }
}
