/// Structured result of classifying one command.
///
/// Every text field is always present; "not provided" is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    pub action: ActionType,
    pub target: String,
    pub messaging_app: Option<MessagingApp>,
    /// Platform name as the model gave it, kept for error reporting.
    pub requested_app: String,
    pub recipient: String,
    pub message_body: String,
}

impl Intent {
    pub fn unknown() -> Self {
        Self::default()
    }

    /// True when any of the three fields `send_message` needs is empty.
    pub fn message_incomplete(&self) -> bool {
        self.messaging_app.is_none() || self.recipient.is_empty() || self.message_body.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionType {
    OpenApp,
    PlaySong,
    OpenWebsite,
    OpenFolder,
    PlayMedia,
    SendMessage,
    Exit,
    #[default]
    Unknown,
}

impl ActionType {
    /// Maps a label returned by the model. Unrecognised labels are `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "open_app" => ActionType::OpenApp,
            "play_song" => ActionType::PlaySong,
            "open_website" => ActionType::OpenWebsite,
            "open_folder" => ActionType::OpenFolder,
            "play_media" | "play_youtube" => ActionType::PlayMedia,
            "send_message" => ActionType::SendMessage,
            "exit" => ActionType::Exit,
            _ => ActionType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::OpenApp => "open_app",
            ActionType::PlaySong => "play_song",
            ActionType::OpenWebsite => "open_website",
            ActionType::OpenFolder => "open_folder",
            ActionType::PlayMedia => "play_media",
            ActionType::SendMessage => "send_message",
            ActionType::Exit => "exit",
            ActionType::Unknown => "unknown",
        }
    }

    /// Actions whose target can never be confused between an app and a site.
    pub fn is_unambiguous(&self) -> bool {
        matches!(
            self,
            ActionType::PlaySong
                | ActionType::PlayMedia
                | ActionType::SendMessage
                | ActionType::OpenFolder
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagingApp {
    Whatsapp,
    Discord,
}

impl MessagingApp {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "whatsapp" => Some(MessagingApp::Whatsapp),
            "discord" => Some(MessagingApp::Discord),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            MessagingApp::Whatsapp => "whatsapp",
            MessagingApp::Discord => "discord",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MessagingApp::Whatsapp => "WhatsApp",
            MessagingApp::Discord => "Discord",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityOutcome {
    App,
    Website,
    NotDetermined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed { action: ActionType, message: String },
    Failed { message: String },
    FellBack { query: String, message: String },
    Exit,
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Completed { message, .. }
            | Outcome::Failed { message }
            | Outcome::FellBack { message, .. } => message,
            Outcome::Exit => "Goodbye!",
        }
    }
}
