use std::env;

use crate::ai::config::AiConfig;

pub const DEFAULT_TELEGRAM_MAX_LENGTH: usize = 4000;
/// Hard limit Telegram puts on a single message.
const TELEGRAM_LIMIT: usize = 4096;

#[derive(Clone, Debug)]
pub struct Config {
    pub ai: AiConfig,
    pub telegram_max_length: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let telegram_max_length = env::var("TELEGRAM_MAX_LENGTH")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&len| len > 0)
            .unwrap_or(DEFAULT_TELEGRAM_MAX_LENGTH)
            .min(TELEGRAM_LIMIT);
        let ai = AiConfig::from_env();
        Self {
            ai,
            telegram_max_length,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            telegram_max_length: DEFAULT_TELEGRAM_MAX_LENGTH,
        }
    }
}
