use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::error::PipelineError;
use crate::utils::file_utils;
use crate::utils::logger::RunLogger;

/// Copy the source video into the workspace.
///
/// A missing source is the one fatal input condition: it is logged at
/// CRITICAL here and surfaced as [`PipelineError::SourceMissing`] so the
/// caller can stop before any frame is written.
pub fn acquire(source: &Path, dest: &Path, logger: &RunLogger) -> Result<u64> {
    if !source.is_file() {
        logger.critical(&format!(
            "Video not found at {}! Exiting program!",
            source.display()
        ));
        eprintln!(
            "***** Video not found at {}! Put the video file there (or pass --source) and rerun! *****",
            source.display()
        );
        return Err(PipelineError::SourceMissing(source.to_path_buf()).into());
    }

    // copying a file onto itself would truncate it to nothing
    if file_utils::same_file(source, dest) {
        let bytes = fs::metadata(dest)
            .with_context(|| format!("failed to stat {}", dest.display()))?
            .len();
        logger.info(&format!(
            "Source {} is already in place ({} bytes), not copying",
            source.display(),
            bytes
        ));
        return Ok(bytes);
    }

    println!("Copying video file to {}", dest.display());
    let bytes = file_utils::copy_file(source, dest)?;
    logger.info(&format!(
        "Copied {} ({} bytes) to {}",
        source.display(),
        bytes,
        dest.display()
    ));

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_is_byte_exact() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RunLogger::open(dir.path().join("events.log")).unwrap();
        let src = dir.path().join("clip.mp4");
        let dst = dir.path().join("video_sample.mp4");
        let payload: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &payload).unwrap();

        let copied = acquire(&src, &dst, &logger).unwrap();

        assert_eq!(copied, payload.len() as u64);
        assert_eq!(fs::read(&dst).unwrap(), payload);
        assert!(fs::read_to_string(logger.path()).unwrap().contains("\tINFO\tCopied"));
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RunLogger::open(dir.path().join("events.log")).unwrap();
        let dst = dir.path().join("video_sample.mp4");

        let err = acquire(&dir.path().join("absent.mp4"), &dst, &logger).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::SourceMissing(_))
        ));
        assert!(!dst.exists());
        assert!(fs::read_to_string(logger.path()).unwrap().contains("\tCRITICAL\t"));
    }

    #[test]
    fn test_source_already_at_destination_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RunLogger::open(dir.path().join("events.log")).unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        let dst = dir.path().join("data/video_sample.mp4");
        fs::write(&dst, b"precious video bytes").unwrap();

        let same = dir.path().join("data/../data/video_sample.mp4");
        let bytes = acquire(&same, &dst, &logger).unwrap();

        assert_eq!(bytes, 20);
        assert_eq!(fs::read(&dst).unwrap(), b"precious video bytes");
        assert!(fs::read_to_string(logger.path()).unwrap().contains("already in place"));
    }

    #[test]
    fn test_directory_is_not_a_source() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RunLogger::open(dir.path().join("events.log")).unwrap();

        let err = acquire(dir.path(), &dir.path().join("out.mp4"), &logger).unwrap_err();
        assert!(err.downcast_ref::<PipelineError>().is_some());
    }
}
