use anyhow::Result;
use teloxide::prelude::*;

use crate::config::Config;
use crate::system_info::get_system_info;

pub async fn show_system_info(bot: Bot, msg: Message, config: Config) -> Result<()> {
    tracing::debug!(chat_id = msg.chat.id.0, "Showing system info");
    bot.send_message(msg.chat.id, get_system_info(&config.ai.model))
        .await?;
    Ok(())
}
