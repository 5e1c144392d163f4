use anyhow::Result;
use teloxide::{prelude::*, utils::command::BotCommands};

pub mod ai;
pub mod commands;
pub mod config;
pub mod director;
pub mod error;
pub mod handlers;
mod messages;
pub mod session;
pub mod storyboard;
mod system_info;
mod text_utils;
mod utils;

pub use commands::Command;
pub use config::Config;
pub use director::Director;
pub use error::{SchemaViolation, StoryboardError};
pub use handlers::{analyze_upload, callback_handler, image_file};
pub use session::{AnalysisState, Sessions};
pub use storyboard::{validate, StoryboardResult};
pub use system_info::get_system_info;
pub use text_utils::pack_messages;

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Load .env file if it exists (for local development)
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();

    tracing::info!(
        model = %config.ai.model,
        timeout_secs = config.ai.timeout.as_secs(),
        "Starting Underwood Director bot..."
    );

    let bot = Bot::from_env();
    bot.set_my_commands(Command::bot_commands()).await?;

    let director = Director::from_config(&config.ai)?;
    let sessions = Sessions::new();

    // --- Handler Setup ---
    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(
            Update::filter_message()
                .branch(dptree::entry().filter_command::<Command>().endpoint(
                    |bot: Bot, msg: Message, cmd: Command, sessions: Sessions, config: Config| {
                        cmd.dispatch(bot, msg, sessions, config)
                    },
                ))
                .branch(
                    dptree::entry()
                        .filter(|msg: Message| msg.photo().is_some() || msg.document().is_some())
                        .endpoint(analyze_upload),
                )
                .branch(dptree::endpoint(handlers::send_image_hint)),
        );

    // --- Dispatcher ---
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![director, sessions, config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
