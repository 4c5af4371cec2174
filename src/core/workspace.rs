use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants;
use crate::utils::logger::RunLogger;

/// The `Lesson_1` directory tree every other stage writes into.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub lesson_dir: PathBuf,
    pub data_dir: PathBuf,
    pub rgb_dir: PathBuf,
    pub gray_dir: PathBuf,
}

impl Workspace {
    pub fn new(root: &Path) -> Self {
        let lesson_dir = root.join(constants::LESSON_DIR);
        Self {
            data_dir: lesson_dir.join(constants::DATA_DIR),
            rgb_dir: lesson_dir.join(constants::RGB_DIR),
            gray_dir: lesson_dir.join(constants::GRAY_DIR),
            lesson_dir,
        }
    }

    pub fn video_path(&self, video_name: &str) -> PathBuf {
        self.data_dir.join(video_name)
    }

    /// Create the tree. Directories that already exist are logged and left
    /// alone; anything else that stops creation aborts the run.
    pub fn init(&self, logger: &RunLogger) -> Result<()> {
        logger.info(&format!("Creating {} directory tree", self.lesson_dir.display()));

        for dir in [&self.data_dir, &self.rgb_dir, &self.gray_dir] {
            if dir.is_dir() {
                logger.error(&format!("{} already exists!", dir.display()));
                continue;
            }

            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
            logger.info(&format!("Created {}", dir.display()));
            println!("Created {}", dir.display());
        }

        Ok(())
    }
}
