use anyhow::{bail, Result};
use futures_util::StreamExt;
use teloxide::{
    net::Download,
    prelude::*,
    types::{ChatId, FileMeta, MessageId, ParseMode},
};

use crate::text_utils::pack_messages;

/// Attempt to delete a message and log a warning on failure.
pub async fn try_delete_message(bot: &Bot, chat_id: ChatId, message_id: MessageId) {
    if let Err(err) = bot.delete_message(chat_id, message_id).await {
        tracing::warn!(
            error = %err,
            chat_id = chat_id.0,
            message_id = message_id.0,
            "Failed to delete message",
        );
    }
}

/// Send HTML blocks, packed into as few messages as the length limit allows.
pub async fn send_html_blocks<S: AsRef<str>>(
    bot: &Bot,
    chat_id: ChatId,
    blocks: &[S],
    max_len: usize,
) -> Result<()> {
    for text in pack_messages(blocks, max_len) {
        bot.send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
    }
    Ok(())
}

/// Fetch an uploaded file from Telegram.
///
/// The buffer is sized from the upload's metadata; an empty download is an
/// error since there is nothing to analyse.
pub async fn download_telegram_file(bot: &Bot, meta: &FileMeta) -> Result<Vec<u8>> {
    let file = bot.get_file(&meta.id).await?;
    tracing::debug!(path = %file.path, expected = meta.size, "Downloading Telegram file");

    let mut data = Vec::with_capacity(meta.size as usize);
    let mut stream = bot.download_file_stream(&file.path);
    while let Some(chunk) = stream.next().await {
        data.extend_from_slice(&chunk?);
    }
    if data.is_empty() {
        bail!("Telegram returned an empty file for {}", file.path);
    }

    tracing::debug!(path = %file.path, size = data.len(), "Finished download");
    Ok(data)
}
