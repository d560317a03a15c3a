use thiserror::Error;

#[derive(Error, Debug)]
pub enum FridayError {
    #[error("API key is missing: set {0} or add it to the settings file")]
    MissingApiKey(&'static str),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Recorder error: {0}")]
    Recorder(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FridayError>;

/// Failures reported by an automation handler.
///
/// These never stop the command loop; the router turns them into a message
/// for the operator.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("I need a {0} for that")]
    MissingArgument(&'static str),

    #[error("Unknown messaging app: {0}")]
    UnknownMessagingApp(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Could not open {target}: {reason}")]
    Launch { target: String, reason: String },

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl HandlerError {
    pub fn launch(target: impl Into<String>, reason: impl ToString) -> Self {
        Self::Launch {
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}
