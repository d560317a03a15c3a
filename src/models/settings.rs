use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: String,
    pub ai: AISettings,
    pub voice: VoiceSettings,
    pub speech: SpeechSettings,
    pub browser: BrowserSettings,
    pub folders: BTreeMap<String, PathBuf>,
    pub startup: StartupSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            ai: AISettings::default(),
            voice: VoiceSettings::default(),
            speech: SpeechSettings::default(),
            browser: BrowserSettings::default(),
            folders: default_folders(),
            startup: StartupSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AISettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AISettings {
    fn default() -> Self {
        Self {
            endpoint: "https://integrate.api.nvidia.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "moonshotai/kimi-k2-instruct-0905".to_string(),
            temperature: 0.0,
            max_tokens: 256,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub wake_word: String,
    pub command_window_secs: u64,
    pub answer_window_secs: u64,
    pub max_retries: u32,
    /// Pause after a failed capture before the next attempt.
    pub retry_delay_ms: u64,
    pub silence_rms_threshold: f32,
    pub transcription_url: String,
    pub transcription_model: String,
    pub transcription_api_key: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            wake_word: "friday".to_string(),
            command_window_secs: 6,
            answer_window_secs: 5,
            max_retries: 3,
            retry_delay_ms: 1000,
            silence_rms_threshold: 150.0,
            transcription_url: "https://api.groq.com/openai/v1/audio/transcriptions".to_string(),
            transcription_model: "whisper-large-v3-turbo".to_string(),
            transcription_api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub enabled: bool,
    /// Overrides the platform speech program. The text is passed as the last argument.
    pub command: Option<Vec<String>>,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Browser application to open URLs with; system default when unset.
    pub app: Option<String>,
    pub search_url: String,
    pub media_search_url: String,
    pub music_search_uri: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            app: None,
            search_url: "https://www.google.com/search?q=".to_string(),
            media_search_url: "https://www.youtube.com/results?search_query=".to_string(),
            music_search_uri: "spotify:search:".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupSettings {
    pub apps: Vec<String>,
    pub playlist: Option<String>,
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            apps: ["Brave", "Discord", "Visual Studio Code", "WhatsApp"]
                .iter()
                .map(|app| app.to_string())
                .collect(),
            playlist: None,
        }
    }
}

/// Well-known user folders, keyed by the lowercase name an operator says.
pub fn default_folders() -> BTreeMap<String, PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let known = [
        ("downloads", dirs::download_dir(), "Downloads"),
        ("documents", dirs::document_dir(), "Documents"),
        ("desktop", dirs::desktop_dir(), "Desktop"),
        ("pictures", dirs::picture_dir(), "Pictures"),
        ("videos", dirs::video_dir(), "Videos"),
        ("music", dirs::audio_dir(), "Music"),
    ];
    known
        .into_iter()
        .map(|(key, dir, fallback)| (key.to_string(), dir.unwrap_or_else(|| home.join(fallback))))
        .collect()
}
