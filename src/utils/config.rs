use crate::error::{FridayError, Result};
use crate::models::Settings;
use std::path::{Path, PathBuf};

pub const ENV_API_KEY: &str = "NVIDIA_API_KEY";
pub const ENV_TRANSCRIPTION_KEY: &str = "GROQ_API_KEY";

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn key_from_env(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn api_key_from_env() -> Option<String> {
    key_from_env(ENV_API_KEY)
}

pub fn apply_env_defaults(settings: &mut Settings) {
    if settings.ai.api_key.trim().is_empty() {
        settings.ai.api_key = api_key_from_env().unwrap_or_default();
    }
    if settings.voice.transcription_api_key.trim().is_empty() {
        settings.voice.transcription_api_key = key_from_env(ENV_TRANSCRIPTION_KEY)
            .unwrap_or_else(|| settings.ai.api_key.clone());
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("friday").join("settings.json"))
}

/// Reads settings from `path`, falling back to defaults when the file is absent.
///
/// Environment defaults are applied either way. A file that exists but does
/// not parse is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = path.map(Path::to_path_buf).or_else(default_settings_path);
    let mut settings = match path {
        Some(ref p) if p.exists() => {
            let content = std::fs::read_to_string(p)?;
            serde_json::from_str::<Settings>(&content)
                .map_err(|e| FridayError::Settings(format!("{}: {}", p.display(), e)))?
        }
        _ => Settings::default(),
    };
    apply_env_defaults(&mut settings);
    Ok(settings)
}

/// Fails when no classification credential is available.
pub fn require_api_key(settings: &Settings) -> Result<()> {
    if settings.ai.api_key.trim().is_empty() {
        return Err(FridayError::MissingApiKey(ENV_API_KEY));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Tests that touch process environment variables run one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], body: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(name, _)| (name.to_string(), std::env::var(name).ok()))
            .collect();
        for (name, value) in vars {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
        body();
        for (name, value) in saved {
            match value {
                Some(value) => std::env::set_var(&name, value),
                None => std::env::remove_var(&name),
            }
        }
    }

    #[test]
    fn empty_keys_are_filled_from_env() {
        with_env(
            &[(ENV_API_KEY, Some(" nv-key ")), (ENV_TRANSCRIPTION_KEY, Some("groq-key"))],
            || {
                let mut settings = Settings::default();
                apply_env_defaults(&mut settings);
                assert_eq!(settings.ai.api_key, "nv-key");
                assert_eq!(settings.voice.transcription_api_key, "groq-key");
            },
        );
    }

    #[test]
    fn transcription_key_falls_back_to_ai_key() {
        with_env(
            &[(ENV_API_KEY, Some("nv-key")), (ENV_TRANSCRIPTION_KEY, None)],
            || {
                let mut settings = Settings::default();
                apply_env_defaults(&mut settings);
                assert_eq!(settings.voice.transcription_api_key, "nv-key");
            },
        );
    }

    #[test]
    fn no_env_and_no_file_key_is_fatal() {
        with_env(&[(ENV_API_KEY, None), (ENV_TRANSCRIPTION_KEY, Some("  "))], || {
            let mut settings = Settings::default();
            apply_env_defaults(&mut settings);
            assert!(settings.ai.api_key.is_empty());
            assert!(settings.voice.transcription_api_key.is_empty());
            assert!(matches!(
                require_api_key(&settings),
                Err(FridayError::MissingApiKey(ENV_API_KEY))
            ));
        });
    }

    #[test]
    fn explicit_keys_are_kept() {
        with_env(&[(ENV_API_KEY, Some("env-key")), (ENV_TRANSCRIPTION_KEY, Some("env-groq"))], || {
            let mut settings = Settings::default();
            settings.ai.api_key = "from-file".to_string();
            settings.voice.transcription_api_key = "voice-file".to_string();
            apply_env_defaults(&mut settings);
            assert_eq!(settings.ai.api_key, "from-file");
            assert_eq!(settings.voice.transcription_api_key, "voice-file");
        });
    }

    #[test]
    fn settings_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"ai": {{"api_key": "k-123", "model": "m"}}, "browser": {{"app": "Brave"}}}}"#
        )
        .unwrap();
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.ai.api_key, "k-123");
        assert_eq!(settings.browser.app.as_deref(), Some("Brave"));
        assert!(require_api_key(&settings).is_ok());
    }

    #[test]
    fn malformed_settings_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            load_settings(Some(file.path())),
            Err(FridayError::Settings(_))
        ));
    }

    #[test]
    fn missing_key_is_reported() {
        let mut settings = Settings::default();
        settings.ai.api_key = "   ".to_string();
        assert!(matches!(
            require_api_key(&settings),
            Err(FridayError::MissingApiKey(ENV_API_KEY))
        ));
    }
}
