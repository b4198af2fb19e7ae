//! Content plan: output types, generation, and text rendering.

pub mod generate;
pub mod render;

use serde::{Deserialize, Serialize};

pub use generate::{ON_SCREEN_MAX_CHARS, generate, generate_with, normalize_hashtag};
pub use render::render_text;

/// One segment of the spoken script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptSegment {
    pub heading: String,
    pub body: String,
}

/// One visual beat of the video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    /// Display name, e.g. `शॉट 2: समस्या`.
    pub shot: String,
    /// Seconds.
    pub length: u32,
    /// What the camera shows.
    pub detail: String,
    pub voice_over: String,
}

/// A production checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub label: String,
    pub tip: String,
}

/// The complete plan derived from a brief.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPlan {
    pub title: String,
    pub hook: String,
    pub hindi_script: Vec<ScriptSegment>,
    pub shot_plan: Vec<Shot>,
    pub on_screen_text: Vec<String>,
    pub captions: String,
    pub hashtags: Vec<String>,
    pub call_to_action_hindi: String,
    pub call_to_action_english: String,
    pub production_schedule: Vec<ScheduleItem>,
    pub facebook_upload_steps: Vec<String>,
    pub english_support: Vec<String>,
}

impl ContentPlan {
    /// Sum of all shot lengths, in seconds.
    pub fn total_shot_seconds(&self) -> u32 {
        self.shot_plan.iter().map(|s| s.length).sum()
    }
}
