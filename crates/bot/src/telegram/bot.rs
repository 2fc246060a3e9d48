//! Bot initialization and command registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use muqarrar_core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "الأوامر المتاحة:")]
pub enum Command {
    #[command(description = "القائمة الرئيسية")]
    Start,
    #[command(description = "المساعدة")]
    Help,
    #[command(description = "تسجيل ملف واحد")]
    Register,
    #[command(description = "إلغاء العملية الحالية")]
    Cancel,
    #[command(description = "بدء جلسة رفع ملفات (للمشرف)")]
    Upload,
    #[command(description = "إنهاء جلسة الرفع وحفظ الملفات (للمشرف)")]
    Done,
    #[command(description = "إضافة ملف مباشرة (للمشرف)")]
    Addfile,
}

/// Creates a Bot instance with a bounded-timeout HTTP client
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Missing token or client build failure
pub fn create_bot() -> anyhow::Result<Bot> {
    let token = config::BOT_TOKEN.clone();
    if token.is_empty() {
        return Err(anyhow::anyhow!("BOT_TOKEN environment variable not set"));
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    Ok(Bot::with_client(token, client))
}

/// Sets up bot commands in the Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptions() {
        let commands = Command::descriptions();
        let command_list = format!("{}", commands);

        assert!(command_list.contains("الأوامر المتاحة"));
        assert!(command_list.contains("start"));
        assert!(command_list.contains("register"));
        assert!(command_list.contains("upload"));
    }

    #[test]
    fn test_registered_command_count() {
        assert_eq!(Command::bot_commands().len(), 7);
    }
}
