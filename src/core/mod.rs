pub mod cache;
pub mod error;
pub mod extractor;
pub mod grayscale;
pub mod naming;
pub mod pipeline;
pub mod source;
pub mod stage;
pub mod workspace;
