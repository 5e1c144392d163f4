use anyhow::Result;
use teloxide::{prelude::*, types::ParseMode};

use crate::messages::{HELP_TEXT, SEND_IMAGE_HINT};

pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HELP_TEXT)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Anything that is neither a command nor an upload gets a nudge.
pub async fn send_image_hint(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, SEND_IMAGE_HINT).await?;
    Ok(())
}
