//! Teloxide-backed implementation of the core transport contract.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, KeyboardButton, KeyboardMarkup};

use muqarrar_core::error::{AppError, AppResult};
use muqarrar_core::event::Transport;
use muqarrar_core::keyboard::Keyboard;
use muqarrar_core::taxonomy::MediaKind;

pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Renders the abstract keyboard into a Telegram reply keyboard.
pub fn render_reply_keyboard(keyboard: &Keyboard) -> KeyboardMarkup {
    let rows = keyboard
        .rows
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone())).collect::<Vec<_>>());
    KeyboardMarkup::new(rows).resize_keyboard()
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(&self, chat_id: i64, text: &str, keyboard: Option<Keyboard>) -> AppResult<()> {
        let request = self.bot.send_message(ChatId(chat_id), text);
        let result = match keyboard {
            Some(kb) => request.reply_markup(render_reply_keyboard(&kb)).await,
            None => request.await,
        };
        result.map_err(|e| AppError::DeliveryFailed(e.to_string()))?;
        Ok(())
    }

    async fn send_file(&self, chat_id: i64, file_ref: &str, kind: MediaKind, caption: Option<&str>) -> AppResult<()> {
        let chat = ChatId(chat_id);
        let input = InputFile::file_id(FileId(file_ref.to_string()));

        let result = match kind {
            MediaKind::Video => match caption {
                Some(c) => self.bot.send_video(chat, input).caption(c.to_string()).await,
                None => self.bot.send_video(chat, input).await,
            },
            MediaKind::Photo => match caption {
                Some(c) => self.bot.send_photo(chat, input).caption(c.to_string()).await,
                None => self.bot.send_photo(chat, input).await,
            },
            MediaKind::Audio => match caption {
                Some(c) => self.bot.send_audio(chat, input).caption(c.to_string()).await,
                None => self.bot.send_audio(chat, input).await,
            },
            MediaKind::Document => match caption {
                Some(c) => self.bot.send_document(chat, input).caption(c.to_string()).await,
                None => self.bot.send_document(chat, input).await,
            },
        };
        result.map_err(|e| AppError::DeliveryFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_keeps_row_layout() {
        let kb = Keyboard::new(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ]);
        let markup = render_reply_keyboard(&kb);

        let labels: Vec<Vec<String>> = markup
            .keyboard
            .iter()
            .map(|row| row.iter().map(|btn| btn.text.clone()).collect())
            .collect();
        assert_eq!(labels, vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]);
    }

    #[test]
    fn test_render_sets_resize() {
        let markup = render_reply_keyboard(&Keyboard::start());
        assert!(markup.resize_keyboard);
    }

    #[test]
    fn test_semester_keyboard_renders_all_buttons() {
        let markup = render_reply_keyboard(&Keyboard::semesters());
        let total: usize = markup.keyboard.iter().map(|row| row.len()).sum();
        assert_eq!(total, 11);
    }
}
