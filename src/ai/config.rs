use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings for the generation service.
///
/// There is deliberately no API key here: each chat supplies its own.
#[derive(Clone, Debug)]
pub struct AiConfig {
    pub model: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AiConfig {
    pub fn from_env() -> Self {
        let timeout_secs = match env::var("GEMINI_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_TIMEOUT_SECS,
                        "Invalid GEMINI_TIMEOUT_SECS, using default"
                    );
                    DEFAULT_TIMEOUT_SECS
                }
            },
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
