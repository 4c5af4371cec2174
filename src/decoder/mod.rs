pub mod frame_data;
pub mod video;

use anyhow::Result;

pub use frame_data::FrameData;
pub use video::VideoDecoder;

/// Sequential frame producer. `Ok(None)` is end-of-stream, not an error.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<FrameData>>;
}
