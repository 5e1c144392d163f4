use anyhow::Result;
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::config::Config;
use crate::handlers::{export_storyboard, forget_key, help, set_key, show_system_info};
use crate::session::Sessions;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "display this text.")]
    Start,
    #[command(description = "display this text.")]
    Help,
    #[command(description = "use your Gemini API key in this chat.")]
    Key(String),
    #[command(description = "remove your API key from this chat.")]
    Forget,
    #[command(description = "download the last storyboard as JSON.")]
    Export,
    #[command(description = "show system information.")]
    Info,
}

impl Command {
    pub async fn dispatch(
        self,
        bot: Bot,
        msg: Message,
        sessions: Sessions,
        config: Config,
    ) -> Result<()> {
        match self {
            Command::Start | Command::Help => help(bot, msg).await?,
            Command::Key(key) => set_key(bot, msg, sessions, key).await?,
            Command::Forget => forget_key(bot, msg, sessions).await?,
            Command::Export => export_storyboard(bot, msg, sessions).await?,
            Command::Info => show_system_info(bot, msg, config).await?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_command_takes_argument() {
        let cmd = Command::parse("/key abc123", "underwood_bot").unwrap();
        assert_eq!(cmd, Command::Key("abc123".into()));
    }

    #[test]
    fn bare_key_command_has_empty_argument() {
        let cmd = Command::parse("/key", "underwood_bot").unwrap();
        assert_eq!(cmd, Command::Key(String::new()));
    }

    #[test]
    fn export_command_parses() {
        assert_eq!(
            Command::parse("/export", "underwood_bot").unwrap(),
            Command::Export
        );
    }
}
