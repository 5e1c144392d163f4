#![allow(dead_code)]

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use underwood::{validate, StoryboardResult};

/// A storyboard response satisfying the contract, with `keyframes`
/// numbered `1..=keyframes`.
pub fn sample_storyboard_json(keyframes: usize) -> Value {
    let shots: Vec<Value> = (1..=keyframes)
        .map(|id| {
            json!({
                "id": id,
                "duration": "2s",
                "shot_type": "Wide",
                "composition": "Subject left third, gaze toward the window.",
                "action": "She lifts the cup slowly.",
                "camera_movement": "Push in",
                "runway_prompt_en": "A woman in a red wool coat with a silver hairpin lifts a cup in a dim cafe, slow push in, warm tungsten light.",
                "prompt_kr": "빨간 울 코트와 은색 머리핀을 한 여성이 어두운 카페에서 컵을 든다."
            })
        })
        .collect();

    json!({
        "project_title": "Test",
        "scene_breakdown": {
            "subjects": "A: woman in a red wool coat, silver hairpin.",
            "environment_lighting": "Interior cafe, evening, warm tungsten practicals.",
            "visual_anchors": ["red wool coat", "silver hairpin", "steam from the cup"]
        },
        "story_arc": {
            "theme": "Waiting changes shape.",
            "logline": "One cup of coffee. One last chance.",
            "beats": ["She waits.", "The door opens.", "It is not him.", "She smiles anyway."]
        },
        "cinematic_approach": {
            "camera_logic": "Slow pushes mirror her focus.",
            "lens_choice": "50mm, shallow depth of field.",
            "color_grade": "Warm mids, crushed blacks, light grain."
        },
        "keyframes": shots
    })
}

pub fn sample_storyboard(keyframes: usize) -> StoryboardResult {
    validate(&sample_storyboard_json(keyframes).to_string()).unwrap()
}

/// A tiny PNG suitable as a reference image.
pub fn sample_png() -> Vec<u8> {
    let img = RgbImage::from_pixel(4, 3, Rgb([200, 40, 40]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}
