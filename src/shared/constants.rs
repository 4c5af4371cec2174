
pub const CONFIG_FILE: &str = "frame_splitter.config";
pub const EVENT_LOG_FILE: &str = "events.log";

pub const DEFAULT_SOURCE_FILE: &str = "source.mp4";
pub const DEFAULT_VIDEO_NAME: &str = "video_sample.mp4";

pub const LESSON_DIR: &str = "Lesson_1";
pub const DATA_DIR: &str = "data";
pub const RGB_DIR: &str = "split_frames/rgb";
pub const GRAY_DIR: &str = "split_frames/gs";

pub const RGB_FRAME_PREFIX: &str = "frame_";
pub const GRAY_FRAME_PREFIX: &str = "grayframe_";
pub const FRAME_EXTENSION: &str = "png";

pub const DEFAULT_PAD_WIDTH: usize = 3;
pub const MAX_PAD_WIDTH: usize = 9;
