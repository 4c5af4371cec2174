use anyhow::{anyhow, Result};
use image::RgbImage;
use std::time::Duration;

/// One decoded frame, tightly packed RGB24 in native resolution.
#[derive(Clone)]
pub struct FrameData {
    pub buffer: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp: Duration,
}

impl FrameData {
    pub fn new(buffer: Vec<u8>, width: u32, height: u32, timestamp: Duration) -> Self {
        Self { buffer, width, height, timestamp }
    }

    pub fn into_image(self) -> Result<RgbImage> {
        let (width, height, len) = (self.width, self.height, self.buffer.len());
        RgbImage::from_raw(width, height, self.buffer).ok_or_else(|| {
            anyhow!("frame buffer of {} bytes does not fit {}x{} RGB", len, width, height)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_image_keeps_pixels() {
        let frame = FrameData::new(vec![10, 20, 30, 40, 50, 60], 2, 1, Duration::ZERO);
        let image = frame.into_image().unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(1, 0).0, [40, 50, 60]);
    }

    #[test]
    fn test_into_image_rejects_short_buffer() {
        let frame = FrameData::new(vec![0; 5], 2, 1, Duration::ZERO);
        assert!(frame.into_image().is_err());
    }
}
