mod common;

use proptest::prelude::*;
use serde_json::{json, Value};
use underwood::{validate, SchemaViolation, StoryboardError};

use common::sample_storyboard_json;

fn schema_error(value: &Value) -> SchemaViolation {
    match validate(&value.to_string()) {
        Err(StoryboardError::Schema(violation)) => violation,
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn valid_storyboard_with_six_keyframes() {
    let raw = sample_storyboard_json(6).to_string();
    let result = validate(&raw).unwrap();
    assert_eq!(result.project_title, "Test");
    assert_eq!(result.scene_breakdown.visual_anchors.len(), 3);
    assert_eq!(result.story_arc.beats.len(), 4);
    assert_eq!(result.keyframes.len(), 6);
    assert_eq!(result.keyframe_ids(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn validated_record_serializes_back_to_the_same_data() {
    let mut value = sample_storyboard_json(5);
    value["music_cue"] = json!({ "bpm": 92, "mood": "wistful" });
    value["keyframes"][0]["transition"] = json!("match cut");
    value["story_arc"]["tagline"] = json!("기다림의 끝");

    let pretty = serde_json::to_string_pretty(&value).unwrap();
    let result = validate(&pretty).unwrap();
    let back = serde_json::to_value(&result).unwrap();
    assert_eq!(back, value);
}

#[test]
fn surrounding_whitespace_is_accepted() {
    let raw = format!("\n  {}\n", sample_storyboard_json(5));
    assert!(validate(&raw).is_ok());
}

#[test]
fn missing_theme_names_the_path() {
    let mut value = sample_storyboard_json(5);
    value["story_arc"].as_object_mut().unwrap().remove("theme");
    assert_eq!(
        schema_error(&value),
        SchemaViolation::MissingField {
            path: "story_arc.theme".into()
        }
    );
}

#[test]
fn missing_keyframe_field_names_its_index() {
    let mut value = sample_storyboard_json(6);
    value["keyframes"][2]
        .as_object_mut()
        .unwrap()
        .remove("prompt_kr");
    assert_eq!(schema_error(&value).path(), "keyframes[2].prompt_kr");
}

#[test]
fn first_missing_field_in_declaration_order_wins() {
    let mut value = sample_storyboard_json(5);
    value["cinematic_approach"]
        .as_object_mut()
        .unwrap()
        .remove("lens_choice");
    value.as_object_mut().unwrap().remove("project_title");
    assert_eq!(schema_error(&value).path(), "project_title");
}

#[test]
fn missing_section_is_reported_before_cardinality() {
    let mut value = sample_storyboard_json(4);
    value.as_object_mut().unwrap().remove("scene_breakdown");
    assert_eq!(
        schema_error(&value),
        SchemaViolation::MissingField {
            path: "scene_breakdown".into()
        }
    );
}

#[test]
fn null_field_is_not_treated_as_default() {
    let mut value = sample_storyboard_json(5);
    value["cinematic_approach"]["color_grade"] = Value::Null;
    assert_eq!(
        schema_error(&value),
        SchemaViolation::WrongType {
            path: "cinematic_approach.color_grade".into(),
            expected: "a string",
        }
    );
}

#[test]
fn string_id_is_wrong_type() {
    let mut value = sample_storyboard_json(5);
    value["keyframes"][0]["id"] = json!("1");
    assert_eq!(schema_error(&value).path(), "keyframes[0].id");
}

#[test]
fn non_object_root_is_schema_error() {
    let err = validate("[1, 2, 3]").unwrap_err();
    assert!(matches!(
        err,
        StoryboardError::Schema(SchemaViolation::WrongType { .. })
    ));
}

#[test]
fn keyframe_counts_at_the_edges() {
    for n in [4, 9] {
        assert_eq!(
            schema_error(&sample_storyboard_json(n)),
            SchemaViolation::Cardinality {
                path: "keyframes".into(),
                expected: "between 5 and 8",
                actual: n,
            }
        );
    }
    for n in 5..=8 {
        assert!(validate(&sample_storyboard_json(n).to_string()).is_ok());
    }
}

#[test]
fn empty_keyframes_fail() {
    let err = schema_error(&sample_storyboard_json(0));
    assert!(matches!(err, SchemaViolation::Cardinality { actual: 0, .. }));
}

#[test]
fn too_few_visual_anchors_fail() {
    let mut value = sample_storyboard_json(5);
    value["scene_breakdown"]["visual_anchors"] = json!(["red coat", "hairpin"]);
    assert_eq!(
        schema_error(&value).path(),
        "scene_breakdown.visual_anchors"
    );
}

#[test]
fn duplicate_ids_fail() {
    let mut value = sample_storyboard_json(5);
    value["keyframes"][3]["id"] = json!(3);
    assert_eq!(
        schema_error(&value),
        SchemaViolation::KeyframeOrder {
            path: "keyframes[3].id".into(),
            id: 3,
            previous: 3,
        }
    );
}

#[test]
fn ids_must_start_at_one() {
    let mut value = sample_storyboard_json(5);
    for (i, keyframe) in value["keyframes"]
        .as_array_mut()
        .unwrap()
        .iter_mut()
        .enumerate()
    {
        keyframe["id"] = json!(i);
    }
    assert_eq!(schema_error(&value).path(), "keyframes[0].id");
}

#[test]
fn blank_english_prompt_fails() {
    let mut value = sample_storyboard_json(5);
    value["keyframes"][4]["runway_prompt_en"] = json!("   ");
    assert_eq!(
        schema_error(&value),
        SchemaViolation::EmptyPrompt {
            path: "keyframes[4].runway_prompt_en".into()
        }
    );
}

#[test]
fn unparseable_text_is_parse_error() {
    let full = sample_storyboard_json(5).to_string();
    let truncated: String = full.chars().take(full.chars().count() / 2).collect();
    let cases = [
        truncated,
        format!("Here is your storyboard: {full}"),
        format!("```json\n{full}\n```"),
        format!("{full} Hope this helps!"),
        String::new(),
    ];
    for raw in cases {
        let err = validate(&raw).unwrap_err();
        assert!(
            matches!(err, StoryboardError::Parse(_)),
            "expected parse error for {raw:?}, got {err:?}"
        );
    }
}

proptest! {
    #[test]
    fn prop_keyframe_count_bounds(n in 0usize..12) {
        let ok = validate(&sample_storyboard_json(n).to_string()).is_ok();
        prop_assert_eq!(ok, (5..=8).contains(&n));
    }

    #[test]
    fn prop_beats_must_be_exactly_four(n in 0usize..9) {
        let mut value = sample_storyboard_json(6);
        value["story_arc"]["beats"] = json!(vec!["beat"; n]);
        match validate(&value.to_string()) {
            Ok(_) => prop_assert_eq!(n, 4),
            Err(StoryboardError::Schema(SchemaViolation::Cardinality { path, actual, .. })) => {
                prop_assert_ne!(n, 4);
                prop_assert_eq!(path, "story_arc.beats");
                prop_assert_eq!(actual, n);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn prop_valid_records_round_trip(n in 5usize..=8) {
        let value = sample_storyboard_json(n);
        let result = validate(&value.to_string()).unwrap();
        prop_assert_eq!(serde_json::to_value(&result).unwrap(), value);
    }
}
