use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::cache::FrameCache;
use super::error::PipelineError;
use super::naming::FrameNaming;
use super::stage::StageOutcome;
use super::workspace::Workspace;
use super::{extractor, grayscale, source};
use crate::decoder::{FrameSource, VideoDecoder};
use crate::shared::settings::Settings;
use crate::utils::logger::RunLogger;
use crate::utils::time_utils::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    WorkspaceReady,
    SourceReady,
    SourceMissing,
    FramesReady,
    GrayscaleReady,
    Done,
}

impl RunState {
    pub fn as_str(self) -> &'static str {
        match self {
            RunState::Start => "START",
            RunState::WorkspaceReady => "WORKSPACE_READY",
            RunState::SourceReady => "SOURCE_READY",
            RunState::SourceMissing => "SOURCE_MISSING",
            RunState::FramesReady => "FRAMES_READY",
            RunState::GrayscaleReady => "GRAYSCALE_READY",
            RunState::Done => "DONE",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub workspace: PathBuf,
    pub frame_count: usize,
    pub extraction: StageOutcome,
    pub conversion: StageOutcome,
    pub verified: bool,
    pub elapsed_ms: u64,
}

fn enter(state: RunState, logger: &RunLogger) {
    logger.info(&format!("state -> {}", state.as_str()));
}

pub fn run(settings: &Settings, logger: &RunLogger) -> Result<RunSummary> {
    run_with(settings, logger, |path: &Path| {
        let decoder = VideoDecoder::open(path)?;
        log_decoder(&decoder, logger);
        Ok(decoder)
    })
}

fn log_decoder(decoder: &VideoDecoder, logger: &RunLogger) {
    let (width, height) = decoder.dimensions();
    let reported = decoder
        .reported_frame_count()
        .map_or_else(|| "unknown".to_string(), |n| n.to_string());
    logger.info(&format!(
        "Opened video: {}x{} @ {:.2} fps, container reports {} frames",
        width,
        height,
        decoder.fps(),
        reported
    ));
}

/// Run every stage in order against the workspace described by `settings`.
///
/// `open` turns the copied video into a frame source; it is only invoked when
/// extraction actually has to run. A missing source ends the run with
/// [`PipelineError::SourceMissing`] before any frame is written.
pub fn run_with<S, F>(settings: &Settings, logger: &RunLogger, open: F) -> Result<RunSummary>
where
    S: FrameSource,
    F: FnOnce(&Path) -> Result<S>,
{
    let timer = Timer::new();
    let naming = FrameNaming::new(settings.pad_width);
    enter(RunState::Start, logger);

    let ws = Workspace::new(&settings.root);
    ws.init(logger)?;
    enter(RunState::WorkspaceReady, logger);

    let video = ws.video_path(&settings.video_name);
    if let Err(err) = source::acquire(&settings.source, &video, logger) {
        if matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::SourceMissing(_))) {
            enter(RunState::SourceMissing, logger);
        }
        return Err(err);
    }
    println!("Video file copied to {} successfully!", ws.data_dir.display());
    enter(RunState::SourceReady, logger);

    println!("****** Preparing to split frames ******");
    let (extraction, frame_count) = extractor::run(&ws, &video, &naming, logger, open)?;
    enter(RunState::FramesReady, logger);

    let conversion = grayscale::run(&ws, &naming, frame_count, logger)?;
    enter(RunState::GrayscaleReady, logger);

    if settings.verify {
        let cache = FrameCache::load(&ws, &naming, frame_count)?;
        cache.verify()?;
        logger.info(&format!(
            "Images stored in memory ({} frame pairs, pad width {})! Program run successful!",
            cache.len(),
            naming.pad_width()
        ));
    }

    enter(RunState::Done, logger);
    logger.info("Program run successful!");
    println!("DONE! Program run success!");

    Ok(RunSummary {
        workspace: ws.lesson_dir,
        frame_count,
        extraction,
        conversion,
        verified: settings.verify,
        elapsed_ms: timer.elapsed_ms(),
    })
}
