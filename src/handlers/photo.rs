use anyhow::Result;
use teloxide::{
    prelude::*,
    types::{FileMeta, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};

use crate::config::Config;
use crate::director::Director;
use crate::error::StoryboardError;
use crate::messages::{
    analysis_failed_text, ANALYSIS_DONE, ANALYSIS_PENDING, ANALYSIS_STARTED, DOWNLOAD_FAILED,
    DOWNLOAD_JSON_CALLBACK, DOWNLOAD_JSON_LABEL, EXPORT_CAPTION, NOT_AN_IMAGE, SHOT_LIST_HEADER,
};
use crate::session::Sessions;
use crate::storyboard::{format_report, format_shots, StoryboardResult};
use crate::utils::{download_telegram_file, send_html_blocks, try_delete_message};

/// The uploaded image of a message: the largest photo size, or a document
/// with an `image/*` MIME type.
pub fn image_file(msg: &Message) -> Option<&FileMeta> {
    if let Some(sizes) = msg.photo() {
        return sizes.iter().max_by_key(|p| p.file.size).map(|p| &p.file);
    }
    msg.document()
        .filter(|doc| {
            doc.mime_type
                .as_ref()
                .is_some_and(|m| m.essence_str().starts_with("image/"))
        })
        .map(|doc| &doc.file)
}

/// Analyse an uploaded reference image and show the storyboard.
pub async fn analyze_upload(
    bot: Bot,
    msg: Message,
    director: Director,
    sessions: Sessions,
    config: Config,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let Some(file) = image_file(&msg) else {
        tracing::debug!(chat_id = chat_id.0, "upload is not an image");
        bot.send_message(chat_id, NOT_AN_IMAGE).await?;
        return Ok(());
    };

    let Some(api_key) = sessions.api_key(chat_id) else {
        bot.send_message(
            chat_id,
            analysis_failed_text(&StoryboardError::MissingCredential),
        )
        .parse_mode(ParseMode::Html)
        .await?;
        return Ok(());
    };

    let Some(invocation) = sessions.begin(chat_id) else {
        bot.send_message(chat_id, ANALYSIS_PENDING).await?;
        return Ok(());
    };

    let notice = bot.send_message(chat_id, ANALYSIS_STARTED).await?;
    let bytes = match download_telegram_file(&bot, file).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, chat_id = chat_id.0, "Failed to download reference image");
            drop(invocation);
            try_delete_message(&bot, chat_id, notice.id).await;
            bot.send_message(chat_id, DOWNLOAD_FAILED).await?;
            return Ok(());
        }
    };

    let outcome = director.analyze(Some(&api_key), &bytes).await;
    invocation.finish(&outcome);
    try_delete_message(&bot, chat_id, notice.id).await;

    match outcome {
        Ok(result) => {
            tracing::info!(
                chat_id = chat_id.0,
                keyframes = result.keyframes.len(),
                "Storyboard ready"
            );
            present_storyboard(&bot, chat_id, &result, config.telegram_max_length).await?;
        }
        Err(err) => {
            tracing::warn!(error = %err, chat_id = chat_id.0, "Storyboard analysis failed");
            bot.send_message(chat_id, analysis_failed_text(&err))
                .parse_mode(ParseMode::Html)
                .await?;
        }
    }
    Ok(())
}

/// Send the report, the shot list and the export button.
pub async fn present_storyboard(
    bot: &Bot,
    chat_id: ChatId,
    result: &StoryboardResult,
    max_len: usize,
) -> Result<()> {
    bot.send_message(chat_id, ANALYSIS_DONE).await?;
    send_html_blocks(bot, chat_id, &[format_report(result)], max_len).await?;

    let mut shots = vec![SHOT_LIST_HEADER.to_string()];
    shots.extend(format_shots(result));
    send_html_blocks(bot, chat_id, &shots, max_len).await?;

    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        DOWNLOAD_JSON_LABEL,
        DOWNLOAD_JSON_CALLBACK,
    )]]);
    bot.send_message(chat_id, EXPORT_CAPTION)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}
