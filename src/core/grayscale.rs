use anyhow::{Context, Result};
use image::ImageFormat;
use std::path::Path;

use super::naming::FrameNaming;
use super::stage::{StageOutcome, StageStatus};
use super::workspace::Workspace;
use crate::utils::file_utils;
use crate::utils::logger::RunLogger;
use crate::utils::time_utils::Timer;

/// Convert one RGB frame to 8-bit luminance plus alpha and save it as PNG.
pub fn convert_frame(rgb_path: &Path, gray_path: &Path) -> Result<()> {
    let img = image::open(rgb_path)
        .with_context(|| format!("failed to read {}", rgb_path.display()))?;

    img.to_luma_alpha8()
        .save_with_format(gray_path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", gray_path.display()))
}

pub fn gray_frames_on_disk(ws: &Workspace, naming: &FrameNaming) -> Result<usize> {
    file_utils::count_files(&ws.gray_dir, |name| naming.is_gray_frame(name))
}

/// Grayscale stage over frames `0..frame_count`.
///
/// Skipped as a whole if `grayframe_<0>` already exists. A sequence shorter
/// than `frame_count` is reported as partial but still left untouched.
pub fn run(
    ws: &Workspace,
    naming: &FrameNaming,
    frame_count: usize,
    logger: &RunLogger,
) -> Result<StageOutcome> {
    let first = ws.gray_dir.join(naming.gray_name(0));
    let present = gray_frames_on_disk(ws, naming)?;
    let status = StageStatus::of_sequence(&first, present, frame_count);

    match status {
        StageStatus::NotStarted => {}
        StageStatus::Complete => {
            logger.warning(&format!(
                "Gray frames already stored in {}, skipping conversion",
                ws.gray_dir.display()
            ));
            println!("Gray frames already present in {}", ws.gray_dir.display());
            return Ok(StageOutcome::Skipped { status });
        }
        StageStatus::Partial { present, expected } => {
            logger.warning(&format!(
                "Gray frames in {} look incomplete ({} of {}, {} missing), skipping conversion",
                ws.gray_dir.display(),
                present,
                expected,
                expected - present
            ));
            println!(
                "Gray frames in {} are incomplete ({} of {}); leaving them as they are",
                ws.gray_dir.display(),
                present,
                expected
            );
            return Ok(StageOutcome::Skipped { status });
        }
    }

    println!("Converting {} RGB frames to grayscale", frame_count);
    let timer = Timer::new();

    for idx in 0..frame_count {
        convert_frame(
            &ws.rgb_dir.join(naming.rgb_name(idx)),
            &ws.gray_dir.join(naming.gray_name(idx)),
        )
        .with_context(|| format!("grayscale conversion stopped at frame {}", idx))?;
    }

    logger.info(&format!(
        "Converted {} frames into {} in {} ms",
        frame_count,
        ws.gray_dir.display(),
        timer.elapsed_ms()
    ));
    println!("{} grayscale frames now stored in {}", frame_count, ws.gray_dir.display());

    Ok(StageOutcome::Done { written: frame_count })
}
