//! The storyboard record returned by the generation service.
//!
//! Field names match the JSON contract exactly so that a validated record
//! serializes back to the same data the service produced. Fields the
//! contract does not name are kept in `extra` rather than dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod render;
pub mod schema;

pub use render::{export, format_report, format_shots, StoryboardExport, BEAT_LABELS};
pub use schema::validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryboardResult {
    pub project_title: String,
    pub scene_breakdown: SceneBreakdown,
    pub story_arc: StoryArc,
    pub cinematic_approach: CinematicApproach,
    pub keyframes: Vec<Keyframe>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBreakdown {
    pub subjects: String,
    pub environment_lighting: String,
    pub visual_anchors: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryArc {
    pub theme: String,
    pub logline: String,
    /// Setup, build, turn and payoff, in that order.
    pub beats: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CinematicApproach {
    pub camera_logic: String,
    pub lens_choice: String,
    pub color_grade: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One shot of the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub id: u64,
    pub duration: String,
    pub shot_type: String,
    pub composition: String,
    pub action: String,
    pub camera_movement: String,
    /// Generation-ready English prompt; carries the visual anchors.
    pub runway_prompt_en: String,
    pub prompt_kr: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoryboardResult {
    pub fn keyframe_ids(&self) -> Vec<u64> {
        self.keyframes.iter().map(|k| k.id).collect()
    }
}
