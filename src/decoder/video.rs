use anyhow::{anyhow, bail, Context, Result};
use opencv::{
    core,
    imgproc,
    prelude::*,
    videoio,
};
use std::path::Path;
use std::time::Duration;

use super::frame_data::FrameData;
use super::FrameSource;

/// OpenCV-backed decoder yielding frames in native resolution.
pub struct VideoDecoder {
    capture: videoio::VideoCapture,
    width: u32,
    height: u32,
    fps: f64,
    frame_counter: u64,
}

impl VideoDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("video path is not valid UTF-8: {}", path.display()))?;

        // CAP_ANY lets OpenCV pick whatever backend it was built with
        let capture = videoio::VideoCapture::from_file(path_str, videoio::CAP_ANY)
            .with_context(|| format!("OpenCV could not open {}", path.display()))?;

        if !capture.is_opened()? {
            bail!("Failed to open video file: {}", path.display());
        }

        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;

        Ok(Self {
            capture,
            width,
            height,
            fps,
            frame_counter: 0,
        })
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Container-reported frame count. Only a hint: many containers get it
    /// wrong, so nothing downstream relies on it.
    pub fn reported_frame_count(&self) -> Option<u64> {
        let count = self.capture.get(videoio::CAP_PROP_FRAME_COUNT).ok()?;
        (count > 0.0).then_some(count as u64)
    }

    fn timestamp(&self) -> Duration {
        if self.fps > 0.0 {
            Duration::from_secs_f64(self.frame_counter as f64 / self.fps)
        } else {
            Duration::ZERO
        }
    }

    pub fn read_frame(&mut self) -> Result<Option<FrameData>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? {
            return Ok(None); // EOF
        }
        if frame.empty() {
            return Ok(None);
        }

        if frame.typ() != core::CV_8UC3 {
            bail!(
                "frame {} has unsupported pixel type {} (expected 8-bit BGR)",
                self.frame_counter,
                frame.typ()
            );
        }

        // OpenCV hands out BGR; frames are stored as RGB
        let mut rgb = Mat::default();
        imgproc::cvt_color_def(&frame, &mut rgb, imgproc::COLOR_BGR2RGB)?;

        if !rgb.is_continuous() {
            bail!("Frame is not continuous");
        }

        let width = rgb.cols() as u32;
        let height = rgb.rows() as u32;
        let buffer = rgb.data_bytes()?.to_vec();

        let data = FrameData::new(buffer, width, height, self.timestamp());
        self.frame_counter += 1;
        Ok(Some(data))
    }
}

impl FrameSource for VideoDecoder {
    fn next_frame(&mut self) -> Result<Option<FrameData>> {
        self.read_frame()
    }
}
