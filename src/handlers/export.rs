use anyhow::Result;
use teloxide::{prelude::*, types::InputFile};

use crate::messages::{DOWNLOAD_JSON_CALLBACK, EXPORT_CAPTION, NOTHING_TO_EXPORT};
use crate::session::Sessions;
use crate::storyboard::export;

/// Send the chat's last storyboard as a JSON document.
pub async fn send_export(bot: &Bot, chat_id: ChatId, sessions: &Sessions) -> Result<()> {
    let Some(result) = sessions.last_result(chat_id) else {
        bot.send_message(chat_id, NOTHING_TO_EXPORT).await?;
        return Ok(());
    };

    let file = export(&result)?;
    tracing::debug!(
        chat_id = chat_id.0,
        file_name = file.file_name,
        mime_type = file.mime_type,
        size = file.body.len(),
        "Sending storyboard export"
    );
    bot.send_document(
        chat_id,
        InputFile::memory(file.body.into_bytes()).file_name(file.file_name),
    )
    .caption(EXPORT_CAPTION)
    .await?;
    Ok(())
}

pub async fn export_storyboard(bot: Bot, msg: Message, sessions: Sessions) -> Result<()> {
    send_export(&bot, msg.chat.id, &sessions).await
}

pub async fn callback_handler(bot: Bot, q: CallbackQuery, sessions: Sessions) -> Result<()> {
    if let (Some(data), Some(msg)) = (q.data, q.message) {
        if data == DOWNLOAD_JSON_CALLBACK {
            send_export(&bot, msg.chat().id, &sessions).await?;
        } else {
            tracing::debug!(%data, "Ignoring unknown callback data");
        }
    }
    bot.answer_callback_query(q.id).await?;
    Ok(())
}
