//! Conversion from Telegram updates to the core inbound event shape.

use teloxide::types::Message;

use muqarrar_core::event::{Attachment, InboundEvent, SenderIdentity};
use muqarrar_core::taxonomy::MediaKind;

/// Builds the core event for a message. Text and caption are equivalent;
/// the first supported attachment wins (photo, video, document, audio).
pub fn inbound_event(msg: &Message) -> InboundEvent {
    let sender = SenderIdentity {
        user_id: msg
            .from
            .as_ref()
            .and_then(|u| i64::try_from(u.id.0).ok())
            .unwrap_or(msg.chat.id.0),
        handle: msg.from.as_ref().and_then(|u| u.username.clone()),
    };

    InboundEvent {
        chat_id: msg.chat.id.0,
        sender,
        text: msg.text().or_else(|| msg.caption()).map(str::to_string),
        attachment: extract_attachment(msg),
        button_payload: None,
    }
}

/// True when the message carries anything the controller can act on.
pub fn has_dispatchable_content(msg: &Message) -> bool {
    msg.text().is_some() || msg.caption().is_some() || extract_attachment(msg).is_some()
}

fn extract_attachment(msg: &Message) -> Option<Attachment> {
    if let Some(doc) = msg.document() {
        return Some(Attachment {
            file_ref: doc.file.id.0.clone(),
            kind: MediaKind::Document,
        });
    }
    if let Some(video) = msg.video() {
        return Some(Attachment {
            file_ref: video.file.id.0.clone(),
            kind: MediaKind::Video,
        });
    }
    if let Some(photos) = msg.photo() {
        // Telegram sends several sizes; keep the largest.
        let photo = photos.iter().max_by_key(|p| p.width * p.height)?;
        return Some(Attachment {
            file_ref: photo.file.id.0.clone(),
            kind: MediaKind::Photo,
        });
    }
    if let Some(audio) = msg.audio() {
        return Some(Attachment {
            file_ref: audio.file.id.0.clone(),
            kind: MediaKind::Audio,
        });
    }
    None
}
