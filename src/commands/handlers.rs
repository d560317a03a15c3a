//! Action handlers. Each one checks its arguments, performs one automation
//! call and reports a short message for the operator.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::HandlerError;
use crate::models::{MessagingApp, SessionMemory};
use crate::services::automation::{encode_query, Automation, Filesystem};

pub type HandlerResult = Result<String, HandlerError>;

fn required<'a>(value: &'a str, what: &'static str) -> Result<&'a str, HandlerError> {
    let value = value.trim();
    if value.is_empty() {
        Err(HandlerError::MissingArgument(what))
    } else {
        Ok(value)
    }
}

pub fn open_app(automation: &dyn Automation, target: &str) -> HandlerResult {
    let name = required(target, "app name")?;
    automation.launch_app(name)?;
    Ok(format!("Opening {}", name))
}

pub fn open_website(automation: &dyn Automation, url: &str) -> HandlerResult {
    let url = required(url, "website")?;
    automation.open_url(url)?;
    Ok(format!("Opening {}", url))
}

pub fn play_song(automation: &dyn Automation, target: &str) -> HandlerResult {
    let song = required(target, "song name")?;
    automation.play_song(song)?;
    Ok(format!("Playing {} on Spotify", song))
}

pub fn play_media(automation: &dyn Automation, target: &str) -> HandlerResult {
    let query = required(target, "video to search for")?;
    automation.play_media(query)?;
    Ok(format!("Searching videos for {}", query))
}

/// `requested` is the platform name as given, used when `app` is unsupported.
pub fn send_message(
    automation: &dyn Automation,
    app: Option<MessagingApp>,
    requested: &str,
    recipient: &str,
    body: &str,
) -> HandlerResult {
    let app = app.ok_or_else(|| {
        let requested = requested.trim();
        HandlerError::UnknownMessagingApp(if requested.is_empty() {
            "none given".to_string()
        } else {
            requested.to_string()
        })
    })?;
    let recipient = required(recipient, "recipient")?;
    let body = required(body, "message")?;
    automation.send_message(app, recipient, body)?;
    Ok(format!(
        "Message for {} copied. Opening {}, paste it into the chat and press Enter.",
        recipient,
        app.display_name()
    ))
}

pub fn open_folder(
    filesystem: &dyn Filesystem,
    folders: &BTreeMap<String, PathBuf>,
    session: &mut SessionMemory,
    name: &str,
) -> HandlerResult {
    let name = required(name, "folder name")?;
    let path = resolve_folder(folders, session.last_folder(), name)
        .ok_or_else(|| HandlerError::FolderNotFound(name.to_string()))?;

    if !filesystem.folder_exists(&path) {
        return Err(HandlerError::FolderNotFound(path.display().to_string()));
    }
    filesystem.open(&path)?;
    let message = format!("Opened {}", path.display());
    session.remember_folder(path);
    Ok(message)
}

fn resolve_folder(
    folders: &BTreeMap<String, PathBuf>,
    last_folder: Option<&Path>,
    name: &str,
) -> Option<PathBuf> {
    folders
        .get(&name.to_lowercase())
        .cloned()
        .or_else(|| last_folder.map(|base| base.join(name)))
}

pub fn web_search(automation: &dyn Automation, search_url: &str, query: &str) -> HandlerResult {
    let query = required(query, "search query")?;
    automation.open_url(&format!("{}{}", search_url, encode_query(query)))?;
    Ok(format!("Searching the web for {}", query))
}
