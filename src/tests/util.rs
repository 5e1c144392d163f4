use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use reqwest::Client;
use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::MockServer;

use crate::storyboard::{validate, StoryboardResult};

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
    validate(&sample_storyboard_json(keyframes).to_string()).expect("sample storyboard is valid")
}

/// A tiny PNG suitable as a reference image.
pub fn sample_png() -> Vec<u8> {
    let img = RgbImage::from_pixel(4, 3, Rgb([200, 40, 40]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .expect("failed to encode sample png");
    bytes.into_inner()
}

/// Reply body for a successful `sendMessage`/`sendDocument` call.
pub const SENT_MESSAGE: &str =
    r#"{"ok":true,"result":{"message_id":1,"date":0,"chat":{"id":1,"type":"private"}}}"#;

/// A bot talking to the mock server, ignoring any proxy from the environment.
pub fn test_bot(server: &MockServer) -> Bot {
    let client = Client::builder().no_proxy().build().unwrap();
    Bot::with_client("TEST", client).set_api_url(reqwest::Url::parse(&server.uri()).unwrap())
}
