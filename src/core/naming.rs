use crate::shared::constants::{FRAME_EXTENSION, GRAY_FRAME_PREFIX, RGB_FRAME_PREFIX};

/// File naming for the two frame sequences.
///
/// Indices are zero-padded to `pad_width` digits. An index that needs more
/// digits than that (frame 1000 at width 3) is written with all of its digits,
/// so names never collide; only the lexical sort order stops matching the
/// numeric order past that point. Every lookup goes through the index, never
/// through a directory sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameNaming {
    pad_width: usize,
}

impl FrameNaming {
    pub fn new(pad_width: usize) -> Self {
        Self { pad_width }
    }

    pub fn pad_width(&self) -> usize {
        self.pad_width
    }

    pub fn index(&self, idx: usize) -> String {
        format!("{:0width$}", idx, width = self.pad_width)
    }

    pub fn rgb_name(&self, idx: usize) -> String {
        format!("{}{}.{}", RGB_FRAME_PREFIX, self.index(idx), FRAME_EXTENSION)
    }

    pub fn gray_name(&self, idx: usize) -> String {
        format!("{}{}.{}", GRAY_FRAME_PREFIX, self.index(idx), FRAME_EXTENSION)
    }

    /// Only names this naming would produce count, so sequences written with
    /// another pad width are not mixed in.
    pub fn is_rgb_frame(&self, name: &str) -> bool {
        parse_index(RGB_FRAME_PREFIX, name).map_or(false, |idx| name == self.rgb_name(idx))
    }

    pub fn is_gray_frame(&self, name: &str) -> bool {
        parse_index(GRAY_FRAME_PREFIX, name).map_or(false, |idx| name == self.gray_name(idx))
    }
}

/// `frame_042.png` -> `Some(42)` for prefix `frame_`.
pub fn parse_index(prefix: &str, name: &str) -> Option<usize> {
    let digits = name
        .strip_prefix(prefix)?
        .strip_suffix(FRAME_EXTENSION)?
        .strip_suffix('.')?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_zero_padded() {
        let naming = FrameNaming::new(3);
        assert_eq!(naming.rgb_name(0), "frame_000.png");
        assert_eq!(naming.rgb_name(42), "frame_042.png");
        assert_eq!(naming.gray_name(7), "grayframe_007.png");
    }

    #[test]
    fn test_index_past_width_keeps_all_digits() {
        let naming = FrameNaming::new(3);
        assert_eq!(naming.rgb_name(999), "frame_999.png");
        assert_eq!(naming.rgb_name(1000), "frame_1000.png");
        assert_ne!(naming.rgb_name(1000), naming.rgb_name(100));
    }

    #[test]
    fn test_custom_width() {
        let naming = FrameNaming::new(5);
        assert_eq!(naming.gray_name(12), "grayframe_00012.png");
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("frame_", "frame_012.png"), Some(12));
        assert_eq!(parse_index("frame_", "frame_1000.png"), Some(1000));
        assert_eq!(parse_index("frame_", "grayframe_012.png"), None);
        assert_eq!(parse_index("frame_", "frame_.png"), None);
        assert_eq!(parse_index("frame_", "frame_01a.png"), None);
        assert_eq!(parse_index("frame_", "frame_012.jpg"), None);
        assert_eq!(parse_index("frame_", "frame_012png"), None);
    }

    #[test]
    fn test_frame_predicates() {
        let naming = FrameNaming::new(3);
        assert!(naming.is_rgb_frame("frame_000.png"));
        assert!(!naming.is_rgb_frame("grayframe_000.png"));
        assert!(naming.is_gray_frame("grayframe_000.png"));
        assert!(!naming.is_gray_frame("events.log"));
    }

    #[test]
    fn test_predicates_reject_other_widths() {
        let naming = FrameNaming::new(3);
        assert!(naming.is_rgb_frame("frame_1000.png"));
        assert!(!naming.is_rgb_frame("frame_0000.png"));
        assert!(!naming.is_rgb_frame("frame_00.png"));
        assert!(!naming.is_gray_frame("grayframe_0001.png"));

        let wide = FrameNaming::new(4);
        assert!(wide.is_rgb_frame("frame_0000.png"));
        assert!(!wide.is_rgb_frame("frame_000.png"));
    }
}
