use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source video not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("frame sequences disagree: {rgb} rgb frames vs {gray} grayscale frames")]
    SequenceMismatch { rgb: usize, gray: usize },

    #[error("frame {index}: rgb is {rgb_size:?} but grayscale is {gray_size:?}")]
    DimensionMismatch {
        index: usize,
        rgb_size: (u32, u32),
        gray_size: (u32, u32),
    },
}

impl PipelineError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::SourceMissing(_) => 2,
            _ => 1,
        }
    }
}
