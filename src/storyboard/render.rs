//! Presentation of a validated storyboard: the report, the shot list and the
//! JSON export.
//!
//! Report and shots are Telegram HTML; every string coming from the service
//! is escaped before it is interpolated.

use teloxide::utils::html::escape;

use super::{Keyframe, StoryboardResult};
use crate::error::StoryboardError;

/// Labels for the four story beats, English name and Korean gloss.
pub const BEAT_LABELS: [(&str, &str); 4] = [
    ("Setup", "설정"),
    ("Build", "상승"),
    ("Turn", "반전/절정"),
    ("Payoff", "결말"),
];

pub const EXPORT_FILE_NAME: &str = "underwood_cinematic_storyboard.json";
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// A storyboard serialized for download.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryboardExport {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub body: String,
}

/// Serialize the record as indented JSON with non-ASCII text kept as is.
pub fn export(result: &StoryboardResult) -> Result<StoryboardExport, StoryboardError> {
    let body = serde_json::to_string_pretty(result).map_err(StoryboardError::Parse)?;
    Ok(StoryboardExport {
        file_name: EXPORT_FILE_NAME,
        mime_type: EXPORT_MIME_TYPE,
        body,
    })
}

pub fn format_report(result: &StoryboardResult) -> String {
    let scene = &result.scene_breakdown;
    let arc = &result.story_arc;
    let approach = &result.cinematic_approach;

    let mut text = format!("🎬 <b>{}</b>\n\n", escape(&result.project_title));

    text.push_str("<b>1. Scene Breakdown</b>\n");
    text.push_str(&format!("👥 <b>Subjects:</b> {}\n", escape(&scene.subjects)));
    text.push_str(&format!(
        "🏠 <b>Environment &amp; lighting:</b> {}\n",
        escape(&scene.environment_lighting)
    ));
    text.push_str("⚓ <b>Visual anchors:</b>\n");
    for anchor in &scene.visual_anchors {
        text.push_str(&format!("• {}\n", escape(anchor)));
    }

    text.push_str("\n<b>2. Story Arc</b>\n");
    text.push_str(&format!("💬 <b>Theme:</b> {}\n", escape(&arc.theme)));
    text.push_str(&format!("📜 <b>Logline:</b> {}\n", escape(&arc.logline)));
    text.push_str("🌊 <b>Beats:</b>\n");
    for ((label, gloss), beat) in BEAT_LABELS.iter().zip(&arc.beats) {
        text.push_str(&format!("<b>{label} ({gloss}):</b> {}\n", escape(beat)));
    }

    text.push_str("\n<b>3. Cinematic Approach</b>\n");
    text.push_str(&format!(
        "🎥 <b>Camera logic:</b> {}\n",
        escape(&approach.camera_logic)
    ));
    text.push_str(&format!(
        "🔍 <b>Lens &amp; DoF:</b> {}\n",
        escape(&approach.lens_choice)
    ));
    text.push_str(&format!(
        "🎨 <b>Color grade:</b> {}",
        escape(&approach.color_grade)
    ));
    text
}

/// One block per keyframe, in sequence order.
pub fn format_shots(result: &StoryboardResult) -> Vec<String> {
    result.keyframes.iter().map(format_shot).collect()
}

fn format_shot(keyframe: &Keyframe) -> String {
    format!(
        "🎞️ <b>Shot #{} - {} ({})</b>\n\
         <b>Action:</b> {}\n\
         <b>Composition:</b> {}\n\
         <b>Camera:</b> {}\n\
         📋 <b>Prompt (EN):</b>\n<pre>{}</pre>\n\
         🇰🇷 <b>Prompt (KR):</b> <i>{}</i>",
        keyframe.id,
        escape(&keyframe.shot_type),
        escape(&keyframe.duration),
        escape(&keyframe.action),
        escape(&keyframe.composition),
        escape(&keyframe.camera_movement),
        escape(&keyframe.runway_prompt_en),
        escape(&keyframe.prompt_kr),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::util::sample_storyboard;

    #[test]
    fn shot_header_has_id_type_and_duration() {
        let result = sample_storyboard(5);
        let shots = format_shots(&result);
        assert_eq!(shots.len(), 5);
        assert!(shots[0].starts_with("🎞️ <b>Shot #1 - Wide (2s)</b>"));
    }

    #[test]
    fn service_text_is_escaped() {
        let mut result = sample_storyboard(5);
        result.project_title = "<Tom & Jerry>".into();
        let report = format_report(&result);
        assert!(report.contains("&lt;Tom &amp; Jerry&gt;"));
        assert!(!report.contains("<Tom"));
    }
}
