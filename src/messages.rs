//! Shared text sent by the bot.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update or translate.

use teloxide::utils::html::escape;

use crate::error::StoryboardError;

pub const HELP_TEXT: &str =
    "🎬 <b>Underwood Director</b>\n\
     Send me one reference image and I will expand it into a 10-20 second \
     cinematic storyboard: scene breakdown, a four-beat story arc and 5-8 \
     keyframes with prompts ready for Runway, Luma or Pika.\n\n\
     The rules: strict continuity (subjects, wardrobe and lighting never \
     change), truthfulness (only what is visible) and a setup, build, turn, \
     payoff arc.\n\n\
     <b>Commands:</b>\n\
     /key &lt;API key&gt; - Use your Google Gemini API key in this chat.\n\
     /forget - Remove your API key from this chat.\n\
     /export - Download the last storyboard as JSON.\n\
     /info - Show system information.";

pub const SEND_IMAGE_HINT: &str = "👈 Send a reference image (JPG or PNG) to start.";

pub const KEY_USAGE: &str =
    "Usage: /key YOUR_GEMINI_API_KEY\nGet one at aistudio.google.com.";
pub const KEY_SAVED: &str =
    "🔑 API key saved for this chat. It is kept in memory only. Send an image to start.";
pub const KEY_FORGOTTEN: &str = "API key removed from this chat.";
pub const NO_KEY_TO_FORGET: &str = "No API key was set for this chat.";

pub const ANALYSIS_STARTED: &str =
    "🚀 Analysing the mise-en-scène and designing the cinematic sequence...";
pub const ANALYSIS_PENDING: &str =
    "An analysis is already running for this chat. Please wait for it to finish.";
pub const ANALYSIS_DONE: &str = "✅ Analysis complete!";
pub const SHOT_LIST_HEADER: &str =
    "🎞️ <b>Keyframes</b>\nUse the English prompts in the image + text input of Runway, Pika or Luma.";
pub const DOWNLOAD_JSON_LABEL: &str = "📥 Download JSON";
pub const DOWNLOAD_JSON_CALLBACK: &str = "export_json";
pub const EXPORT_CAPTION: &str =
    "💾 Storyboard JSON, ready for automation workflows such as Make.com.";
pub const NOTHING_TO_EXPORT: &str =
    "There is no storyboard to export yet. Send an image first.";
pub const DOWNLOAD_FAILED: &str =
    "⚠️ I could not download that image from Telegram. Bots cannot fetch files over 20 MB, so please send a smaller image.";
pub const NOT_AN_IMAGE: &str = "That file is not an image. Please send a JPG or PNG.";

/// Explain a failed analysis to the user, one message per error kind.
pub fn analysis_failed_text(err: &StoryboardError) -> String {
    match err {
        StoryboardError::MissingCredential => {
            "⚠️ Please set your Gemini API key first with /key YOUR_KEY.".to_string()
        }
        StoryboardError::InvalidImage(reason) => format!(
            "⚠️ I could not read that image: {}",
            escape(reason)
        ),
        StoryboardError::Service(reason) => format!(
            "❌ The AI service failed: {}\nCheck that your API key is valid and try again.",
            escape(reason)
        ),
        StoryboardError::Parse(reason) => format!(
            "❌ The AI returned something that is not valid JSON ({}).\nTry again, perhaps with a simpler image.",
            escape(&reason.to_string())
        ),
        StoryboardError::Schema(violation) => format!(
            "❌ The AI response did not match the storyboard format: {}\nTry again, perhaps with a simpler image.",
            escape(&violation.to_string())
        ),
    }
}
