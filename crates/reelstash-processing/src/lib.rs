//! Reelstash processing library
//!
//! Subprocess-backed media capabilities for the upload pipeline: geometry
//! probing (`MediaInspector`), fast-start remuxing (`MediaRemuxer`), and
//! request-scoped staging of temporary artifacts. The traits decouple the
//! orchestrator from any specific external binary so tests can swap in fakes.

pub mod probe;
pub mod remux;
pub mod staging;

pub use probe::{FfprobeInspector, MediaInspector, ProbeError, VideoDimensions};
pub use remux::{FfmpegRemuxer, MediaRemuxer, RemuxError};
pub use staging::UploadStaging;
