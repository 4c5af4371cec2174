use anyhow::{Context, Result};
use image::{GrayAlphaImage, RgbImage};

use super::error::PipelineError;
use super::naming::FrameNaming;
use super::workspace::Workspace;

/// Both frame sequences loaded back into memory, indexed like the files.
pub struct FrameCache {
    pub rgb: Vec<RgbImage>,
    pub gray: Vec<GrayAlphaImage>,
}

impl FrameCache {
    pub fn load(ws: &Workspace, naming: &FrameNaming, frame_count: usize) -> Result<Self> {
        let mut rgb = Vec::with_capacity(frame_count);
        let mut gray = Vec::with_capacity(frame_count);

        for idx in 0..frame_count {
            let rgb_path = ws.rgb_dir.join(naming.rgb_name(idx));
            let gray_path = ws.gray_dir.join(naming.gray_name(idx));

            rgb.push(
                image::open(&rgb_path)
                    .with_context(|| format!("failed to load {}", rgb_path.display()))?
                    .to_rgb8(),
            );
            gray.push(
                image::open(&gray_path)
                    .with_context(|| format!("failed to load {}", gray_path.display()))?
                    .to_luma_alpha8(),
            );
        }

        Ok(Self { rgb, gray })
    }

    pub fn len(&self) -> usize {
        self.rgb.len()
    }

    /// Check that index N of both sequences describes the same frame.
    pub fn verify(&self) -> Result<(), PipelineError> {
        if self.rgb.len() != self.gray.len() {
            return Err(PipelineError::SequenceMismatch {
                rgb: self.rgb.len(),
                gray: self.gray.len(),
            });
        }

        for (index, (rgb, gray)) in self.rgb.iter().zip(&self.gray).enumerate() {
            if rgb.dimensions() != gray.dimensions() {
                return Err(PipelineError::DimensionMismatch {
                    index,
                    rgb_size: rgb.dimensions(),
                    gray_size: gray.dimensions(),
                });
            }
        }

        Ok(())
    }
}
