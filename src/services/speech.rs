use async_trait::async_trait;

use crate::models::SpeechSettings;

/// Speech synthesis collaborator. Failures are logged, never returned.
#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str);
}

/// Prints every utterance and, when enabled, voices it with the platform speech program.
#[derive(Debug, Clone)]
pub struct Speech {
    settings: SpeechSettings,
}

impl Speech {
    pub fn new(settings: SpeechSettings) -> Self {
        Self { settings }
    }

    async fn run_say(&self, text: &str) -> std::io::Result<()> {
        let argv = speech_command(self.settings.command.as_deref(), text).unwrap_or_default();
        let Some((program, args)) = argv.split_first() else {
            return Ok(());
        };
        // Dropping the future (Ctrl-C) stops the utterance.
        let output = tokio::process::Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;
        if !output.status.success() {
            log::warn!("{} exited with {}", program, output.status);
        }
        Ok(())
    }
}

#[async_trait]
impl Speaker for Speech {
    async fn speak(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        println!("🤖 {}", text);
        if !self.settings.enabled {
            return;
        }
        if let Err(err) = self.run_say(text).await {
            log::warn!("TTS error: {}", err);
        }
    }
}

fn speech_command(custom: Option<&[String]>, text: &str) -> Option<Vec<String>> {
    if let Some(custom) = custom.filter(|c| !c.is_empty()) {
        let mut argv = custom.to_vec();
        argv.push(text.to_string());
        return Some(argv);
    }
    if cfg!(target_os = "macos") {
        Some(vec!["say".to_string(), text.to_string()])
    } else if cfg!(target_os = "windows") {
        let script = format!(
            "Add-Type -AssemblyName System.Speech; \
             (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{}')",
            text.replace('\'', "''")
        );
        Some(vec![
            "powershell".to_string(),
            "-NoProfile".to_string(),
            "-Command".to_string(),
            script,
        ])
    } else if cfg!(target_os = "linux") {
        Some(vec!["espeak".to_string(), text.to_string()])
    } else {
        None
    }
}
