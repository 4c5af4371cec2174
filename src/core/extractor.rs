use anyhow::{Context, Result};
use image::ImageFormat;
use std::path::Path;

use super::naming::FrameNaming;
use super::stage::{StageOutcome, StageStatus};
use super::workspace::Workspace;
use crate::decoder::FrameSource;
use crate::utils::file_utils;
use crate::utils::logger::RunLogger;
use crate::utils::time_utils::Timer;

/// Drain `source`, writing each frame to `rgb_dir` as a PNG named by its
/// zero-based position in the stream. Returns how many frames were written.
pub fn extract_frames<S: FrameSource>(
    source: &mut S,
    rgb_dir: &Path,
    naming: &FrameNaming,
) -> Result<usize> {
    let mut count = 0;

    while let Some(frame) = source
        .next_frame()
        .with_context(|| format!("failed to decode frame {}", count))?
    {
        let path = rgb_dir.join(naming.rgb_name(count));
        let timestamp = frame.timestamp;
        frame
            .into_image()
            .with_context(|| format!("frame {} at {:?}", count, timestamp))?
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("failed to write {}", path.display()))?;
        count += 1;
    }

    Ok(count)
}

/// Number of RGB frame files currently in the workspace.
pub fn frames_on_disk(ws: &Workspace, naming: &FrameNaming) -> Result<usize> {
    file_utils::count_files(&ws.rgb_dir, |name| naming.is_rgb_frame(name))
}

/// Extraction stage. `open` is only called when extraction actually runs.
///
/// The returned frame count is what is on disk afterwards, which is what the
/// grayscale pass iterates over, whether or not this run decoded anything.
pub fn run<S, F>(
    ws: &Workspace,
    video: &Path,
    naming: &FrameNaming,
    logger: &RunLogger,
    open: F,
) -> Result<(StageOutcome, usize)>
where
    S: FrameSource,
    F: FnOnce(&Path) -> Result<S>,
{
    let first = ws.rgb_dir.join(naming.rgb_name(0));
    let status = StageStatus::of_first_output(&first);

    let outcome = if status.is_started() {
        logger.error(&format!(
            "Frames already exist in {}, skipping extraction",
            ws.rgb_dir.display()
        ));
        println!("Frames already present in {}", ws.rgb_dir.display());
        StageOutcome::Skipped { status }
    } else {
        println!("Splitting frames from {}", video.display());
        let timer = Timer::new();
        let mut source = open(video)?;
        let written = extract_frames(&mut source, &ws.rgb_dir, naming)?;
        logger.info(&format!(
            "Extracted {} frames into {} in {} ms",
            written,
            ws.rgb_dir.display(),
            timer.elapsed_ms()
        ));
        println!("Frames are now ready!");
        StageOutcome::Done { written }
    };

    let on_disk = frames_on_disk(ws, naming)?;
    logger.info(&format!("Total number of frames split: {}", on_disk));
    println!("Total number of frames split: {}", on_disk);

    Ok((outcome, on_disk))
}
