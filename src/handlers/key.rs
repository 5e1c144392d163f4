use anyhow::Result;
use teloxide::prelude::*;

use crate::messages::{KEY_FORGOTTEN, KEY_SAVED, KEY_USAGE, NO_KEY_TO_FORGET};
use crate::session::Sessions;
use crate::utils::try_delete_message;

/// Store the chat's Gemini API key in memory.
///
/// The command message itself is deleted so the key does not linger in the
/// chat history.
pub async fn set_key(bot: Bot, msg: Message, sessions: Sessions, key: String) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        bot.send_message(msg.chat.id, KEY_USAGE).await?;
        return Ok(());
    }

    sessions.set_api_key(msg.chat.id, key);
    try_delete_message(&bot, msg.chat.id, msg.id).await;
    tracing::info!(chat_id = msg.chat.id.0, "API key set");
    bot.send_message(msg.chat.id, KEY_SAVED).await?;
    Ok(())
}

pub async fn forget_key(bot: Bot, msg: Message, sessions: Sessions) -> Result<()> {
    let text = if sessions.forget_api_key(msg.chat.id) {
        tracing::info!(chat_id = msg.chat.id.0, "API key removed");
        KEY_FORGOTTEN
    } else {
        NO_KEY_TO_FORGET
    };
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}
