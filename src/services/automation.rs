//! Desktop automation: launching apps, URLs, media searches and messaging apps.
//!
//! Everything here is best-effort. A call that returns `Ok` means the launch
//! request was handed to the OS, not that the target visibly did anything.

use std::path::Path;

use crate::error::HandlerError;
use crate::models::{BrowserSettings, MessagingApp};

pub trait Automation: Send + Sync {
    fn launch_app(&self, name: &str) -> Result<(), HandlerError>;
    fn open_url(&self, url: &str) -> Result<(), HandlerError>;
    fn play_song(&self, query: &str) -> Result<(), HandlerError>;
    fn play_media(&self, query: &str) -> Result<(), HandlerError>;
    fn send_message(&self, app: MessagingApp, recipient: &str, body: &str) -> Result<(), HandlerError>;
}

pub trait Filesystem: Send + Sync {
    fn folder_exists(&self, path: &Path) -> bool;
    fn open(&self, path: &Path) -> Result<(), HandlerError>;
}

pub struct DesktopAutomation {
    browser: BrowserSettings,
}

impl DesktopAutomation {
    pub fn new(browser: BrowserSettings) -> Self {
        Self { browser }
    }
}

/// Percent-encodes a query string component (spaces become `+`).
pub fn encode_query(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.as_bytes()).collect()
}

impl Automation for DesktopAutomation {
    fn launch_app(&self, name: &str) -> Result<(), HandlerError> {
        let mut command = if cfg!(target_os = "windows") {
            let mut c = std::process::Command::new("cmd");
            c.args(["/C", "start", "", name]);
            c
        } else if cfg!(target_os = "macos") {
            let mut c = std::process::Command::new("open");
            c.args(["-a", name]);
            c
        } else {
            std::process::Command::new(name.trim().to_lowercase().replace(' ', "-"))
        };
        command
            .spawn()
            .map(|_| ())
            .map_err(|e| HandlerError::launch(name, e))
    }

    fn open_url(&self, url: &str) -> Result<(), HandlerError> {
        let result = match self.browser.app.as_deref() {
            Some(app) => open::with(url, app),
            None => open::that(url),
        };
        result.map_err(|e| HandlerError::launch(url, e))
    }

    fn play_song(&self, query: &str) -> Result<(), HandlerError> {
        // Spotify's URI scheme does not accept `+` for spaces.
        let uri = format!("{}{}", self.browser.music_search_uri, encode_query(query).replace('+', "%20"));
        open::that(&uri).map_err(|e| HandlerError::launch(uri, e))
    }

    fn play_media(&self, query: &str) -> Result<(), HandlerError> {
        self.open_url(&format!("{}{}", self.browser.media_search_url, encode_query(query)))
    }

    fn send_message(&self, app: MessagingApp, recipient: &str, body: &str) -> Result<(), HandlerError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| HandlerError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(body.to_string())
            .map_err(|e| HandlerError::Clipboard(e.to_string()))?;
        log::info!("message for {} on {} placed on clipboard", recipient, app.display_name());

        let link = format!("{}://", app.keyword());
        if let Err(err) = open::that(&link) {
            log::warn!("{} deep link failed ({}), launching the app instead", link, err);
            return self.launch_app(app.display_name());
        }
        Ok(())
    }
}

pub struct DesktopFilesystem;

impl Filesystem for DesktopFilesystem {
    fn folder_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn open(&self, path: &Path) -> Result<(), HandlerError> {
        open::that(path).map_err(|e| HandlerError::launch(path.display().to_string(), e))
    }
}
