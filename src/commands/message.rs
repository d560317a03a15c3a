use regex::Regex;
use std::sync::LazyLock;

use crate::models::MessagingApp;
use crate::utils::normalize_whitespace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub app: MessagingApp,
    pub recipient: String,
    pub body: String,
}

/// Parses a messaging command without the classifier.
///
/// Returns `None` when no supported platform is mentioned. Without an ` on `
/// separator only the platform is known and recipient and body stay empty.
pub fn parse_message_command(command: &str) -> Option<ParsedMessage> {
    let lower = command.to_lowercase();
    let app = [MessagingApp::Whatsapp, MessagingApp::Discord]
        .into_iter()
        .find(|app| lower.contains(app.keyword()))?;

    let Some((before, after)) = lower.split_once(" on ") else {
        return Some(ParsedMessage {
            app,
            recipient: String::new(),
            body: String::new(),
        });
    };

    Some(ParsedMessage {
        app,
        recipient: remove_word(before, &MESSAGE_WORD),
        body: remove_word(after, platform_word(app)),
    })
}

static MESSAGE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bmessage\b").unwrap());
static WHATSAPP_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bwhatsapp\b").unwrap());
static DISCORD_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bdiscord\b").unwrap());

fn platform_word(app: MessagingApp) -> &'static Regex {
    match app {
        MessagingApp::Whatsapp => &WHATSAPP_WORD,
        MessagingApp::Discord => &DISCORD_WORD,
    }
}

fn remove_word(text: &str, word: &Regex) -> String {
    normalize_whitespace(&word.replace_all(text, " "))
}
