use std::ops::RangeInclusive;

use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use super::StoryboardResult;
use crate::error::{SchemaViolation, StoryboardError};

pub const KEYFRAME_COUNT: RangeInclusive<usize> = 5..=8;
pub const VISUAL_ANCHOR_COUNT: RangeInclusive<usize> = 3..=5;
pub const BEAT_COUNT: usize = 4;

const ROOT: &str = "$";

type Field = (&'static str, Kind);

enum Kind {
    Text,
    Integer,
    TextList,
    Object(&'static [Field]),
    ObjectList(&'static [Field]),
}

const SCENE_BREAKDOWN: &[Field] = &[
    ("subjects", Kind::Text),
    ("environment_lighting", Kind::Text),
    ("visual_anchors", Kind::TextList),
];

const STORY_ARC: &[Field] = &[
    ("theme", Kind::Text),
    ("logline", Kind::Text),
    ("beats", Kind::TextList),
];

const CINEMATIC_APPROACH: &[Field] = &[
    ("camera_logic", Kind::Text),
    ("lens_choice", Kind::Text),
    ("color_grade", Kind::Text),
];

const KEYFRAME: &[Field] = &[
    ("id", Kind::Integer),
    ("duration", Kind::Text),
    ("shot_type", Kind::Text),
    ("composition", Kind::Text),
    ("action", Kind::Text),
    ("camera_movement", Kind::Text),
    ("runway_prompt_en", Kind::Text),
    ("prompt_kr", Kind::Text),
];

const STORYBOARD: &[Field] = &[
    ("project_title", Kind::Text),
    ("scene_breakdown", Kind::Object(SCENE_BREAKDOWN)),
    ("story_arc", Kind::Object(STORY_ARC)),
    ("cinematic_approach", Kind::Object(CINEMATIC_APPROACH)),
    ("keyframes", Kind::ObjectList(KEYFRAME)),
];

/// Parse and check a raw service response against the storyboard contract.
///
/// The first problem found is reported: malformed JSON as
/// [`StoryboardError::Parse`], then the first missing or mistyped field in
/// declaration order, then the cardinality of `keyframes`,
/// `scene_breakdown.visual_anchors` and `story_arc.beats`, then keyframe
/// numbering and empty English prompts. Nothing is defaulted or coerced.
#[instrument(level = "trace", skip(raw), fields(len = raw.len()))]
pub fn validate(raw: &str) -> Result<StoryboardResult, StoryboardError> {
    let value: Value = serde_json::from_str(raw).map_err(|err| {
        debug!(error = %err, "response is not well-formed JSON");
        StoryboardError::Parse(err)
    })?;

    let Some(root) = value.as_object() else {
        return Err(SchemaViolation::WrongType {
            path: ROOT.to_string(),
            expected: "an object",
        }
        .into());
    };
    check_fields(root, "", STORYBOARD)?;

    // Every field has already been type checked, so this cannot fail on shape.
    let result: StoryboardResult = serde_json::from_value(value).map_err(StoryboardError::Parse)?;

    check_cardinality(&result)?;
    check_keyframes(&result)?;

    trace!(
        title = %result.project_title,
        keyframes = result.keyframes.len(),
        "storyboard validated"
    );
    Ok(result)
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn wrong_type(path: String, expected: &'static str) -> SchemaViolation {
    SchemaViolation::WrongType { path, expected }
}

fn check_fields(
    object: &Map<String, Value>,
    prefix: &str,
    fields: &[Field],
) -> Result<(), SchemaViolation> {
    for (name, kind) in fields {
        let path = join(prefix, name);
        let Some(value) = object.get(*name) else {
            return Err(SchemaViolation::MissingField { path });
        };
        check_kind(value, path, kind)?;
    }
    Ok(())
}

fn check_kind(value: &Value, path: String, kind: &Kind) -> Result<(), SchemaViolation> {
    match kind {
        Kind::Text if value.is_string() => Ok(()),
        Kind::Text => Err(wrong_type(path, "a string")),
        Kind::Integer if value.is_u64() => Ok(()),
        Kind::Integer => Err(wrong_type(path, "a non-negative integer")),
        Kind::TextList => {
            let items = value
                .as_array()
                .ok_or_else(|| wrong_type(path.clone(), "an array of strings"))?;
            match items.iter().position(|item| !item.is_string()) {
                Some(i) => Err(wrong_type(format!("{path}[{i}]"), "a string")),
                None => Ok(()),
            }
        }
        Kind::Object(fields) => {
            let object = value
                .as_object()
                .ok_or_else(|| wrong_type(path.clone(), "an object"))?;
            check_fields(object, &path, fields)
        }
        Kind::ObjectList(fields) => {
            let items = value
                .as_array()
                .ok_or_else(|| wrong_type(path.clone(), "an array of objects"))?;
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{i}]");
                let object = item
                    .as_object()
                    .ok_or_else(|| wrong_type(item_path.clone(), "an object"))?;
                check_fields(object, &item_path, fields)?;
            }
            Ok(())
        }
    }
}

fn check_count(
    path: &str,
    actual: usize,
    allowed: RangeInclusive<usize>,
    expected: &'static str,
) -> Result<(), SchemaViolation> {
    if allowed.contains(&actual) {
        Ok(())
    } else {
        Err(SchemaViolation::Cardinality {
            path: path.to_string(),
            expected,
            actual,
        })
    }
}

fn check_cardinality(result: &StoryboardResult) -> Result<(), SchemaViolation> {
    check_count(
        "keyframes",
        result.keyframes.len(),
        KEYFRAME_COUNT,
        "between 5 and 8",
    )?;
    check_count(
        "scene_breakdown.visual_anchors",
        result.scene_breakdown.visual_anchors.len(),
        VISUAL_ANCHOR_COUNT,
        "between 3 and 5",
    )?;
    check_count(
        "story_arc.beats",
        result.story_arc.beats.len(),
        BEAT_COUNT..=BEAT_COUNT,
        "exactly 4",
    )
}

fn check_keyframes(result: &StoryboardResult) -> Result<(), SchemaViolation> {
    let mut previous = 0;
    for (i, keyframe) in result.keyframes.iter().enumerate() {
        let out_of_order = if i == 0 {
            keyframe.id != 1
        } else {
            keyframe.id <= previous
        };
        if out_of_order {
            return Err(SchemaViolation::KeyframeOrder {
                path: format!("keyframes[{i}].id"),
                id: keyframe.id,
                previous,
            });
        }
        if keyframe.runway_prompt_en.trim().is_empty() {
            return Err(SchemaViolation::EmptyPrompt {
                path: format!("keyframes[{i}].runway_prompt_en"),
            });
        }
        previous = keyframe.id;
    }
    Ok(())
}
