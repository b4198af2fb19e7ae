//! Core library for vidplan: turns a short video brief into a complete,
//! deterministic content plan for a Hindi short-form video.
//!
//! - [`brief`]: input model and validation.
//! - [`templates`]: the embedded phrasing library.
//! - [`plan`]: output model, generation, and text rendering.

pub mod brief;
pub mod plan;
pub mod templates;

pub use brief::{Brief, BriefError, BriefInput, DurationBucket, Tone};
pub use plan::{ContentPlan, generate, render_text};
