pub mod composer;
pub mod config;
pub mod gemini;
pub mod prompts;

pub use composer::{PromptComposer, ReferenceImage, StoryboardRequest};
pub use config::AiConfig;
pub use gemini::GeminiClient;
