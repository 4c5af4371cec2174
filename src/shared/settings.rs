use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants;

/// Everything a run needs to know, resolved from defaults, the optional
/// config file and the command line, in that order.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the `Lesson_1` tree is created under.
    pub root: PathBuf,
    pub source: PathBuf,
    /// File name of the copied video inside `Lesson_1/data`.
    pub video_name: String,
    pub pad_width: usize,
    pub log_file: PathBuf,
    pub verify: bool,
    pub summary: bool,
}

impl Settings {
    pub fn defaults_in(cwd: &Path) -> Self {
        Self {
            root: cwd.to_path_buf(),
            source: cwd.join(constants::DEFAULT_SOURCE_FILE),
            video_name: constants::DEFAULT_VIDEO_NAME.to_string(),
            pad_width: constants::DEFAULT_PAD_WIDTH,
            log_file: cwd.join(constants::EVENT_LOG_FILE),
            verify: false,
            summary: false,
        }
    }

    /// Defaults overlaid with the config file, if there is one.
    ///
    /// An explicitly named config file must exist; the default one is optional.
    /// Returns the settings plus warnings meant for the event log, which is not
    /// open yet at this point.
    pub fn load(cwd: &Path, explicit_config: Option<&Path>) -> Result<(Self, Vec<String>)> {
        let mut settings = Self::defaults_in(cwd);

        let config_path = match explicit_config {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = cwd.join(constants::CONFIG_FILE);
                if !default_path.is_file() {
                    return Ok((settings, Vec::new()));
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let warnings = settings
            .apply_config(&content)
            .with_context(|| format!("invalid config file {}", config_path.display()))?;

        Ok((settings, warnings))
    }

    /// Apply `key = value` lines. Blank lines and `#` comments are skipped.
    fn apply_config(&mut self, content: &str) -> Result<Vec<String>> {
        let mut warnings = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                bail!("line {}: expected `key = value`, got `{}`", line_no + 1, trimmed);
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "root" => self.root = PathBuf::from(value),
                "source" => self.source = PathBuf::from(value),
                "video-name" => self.video_name = value.to_string(),
                "pad-width" => {
                    self.pad_width = value
                        .parse()
                        .with_context(|| format!("line {}: bad pad-width `{}`", line_no + 1, value))?
                }
                "log-file" => self.log_file = PathBuf::from(value),
                _ => warnings.push(format!(
                    "ignoring unknown config key `{}` on line {}",
                    key,
                    line_no + 1
                )),
            }
        }

        Ok(warnings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=constants::MAX_PAD_WIDTH).contains(&self.pad_width) {
            bail!(
                "pad width must be between 1 and {}, got {}",
                constants::MAX_PAD_WIDTH,
                self.pad_width
            );
        }

        let name_is_plain = Path::new(&self.video_name)
            .file_name()
            .map_or(false, |name| name == self.video_name.as_str());
        if self.video_name.is_empty() || !name_is_plain {
            bail!("video name must be a plain file name, got `{}`", self.video_name);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cwd = Path::new("/work");
        let settings = Settings::defaults_in(cwd);
        assert_eq!(settings.root, PathBuf::from("/work"));
        assert_eq!(settings.source, PathBuf::from("/work/source.mp4"));
        assert_eq!(settings.video_name, "video_sample.mp4");
        assert_eq!(settings.pad_width, 3);
        assert_eq!(settings.log_file, PathBuf::from("/work/events.log"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_config_overrides_defaults() {
        let mut settings = Settings::defaults_in(Path::new("/work"));
        let warnings = settings
            .apply_config("# lesson setup\nsource = /videos/clip.mp4\n\npad-width = 5\nvideo-name=clip.avi\n")
            .unwrap();

        assert!(warnings.is_empty());
        assert_eq!(settings.source, PathBuf::from("/videos/clip.mp4"));
        assert_eq!(settings.pad_width, 5);
        assert_eq!(settings.video_name, "clip.avi");
    }

    #[test]
    fn test_unknown_key_is_warning() {
        let mut settings = Settings::defaults_in(Path::new("/work"));
        let warnings = settings.apply_config("font-size = 2.5\n").unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("font-size"));
    }

    #[test]
    fn test_bad_lines_are_errors() {
        let mut settings = Settings::defaults_in(Path::new("/work"));
        assert!(settings.apply_config("pad-width = three\n").is_err());
        assert!(settings.apply_config("just some words\n").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::defaults_in(Path::new("/work"));
        settings.pad_width = 0;
        assert!(settings.validate().is_err());
        settings.pad_width = 10;
        assert!(settings.validate().is_err());

        settings.pad_width = 3;
        settings.video_name = "../escape.mp4".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_reads_default_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(constants::CONFIG_FILE), "pad-width = 4\n").unwrap();

        let (settings, warnings) = Settings::load(dir.path(), None).unwrap();
        assert_eq!(settings.pad_width, 4);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, _) = Settings::load(dir.path(), None).unwrap();
        assert_eq!(settings.pad_width, constants::DEFAULT_PAD_WIDTH);
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(dir.path(), Some(&dir.path().join("missing.config"))).is_err());
    }
}
