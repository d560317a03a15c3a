use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::models::VoiceSettings;
use crate::services::speech::Speaker;
use crate::services::voice::VoiceListener;
use crate::utils::stdin::StdinLines;

/// Result of one attempt to hear from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listen {
    Heard(String),
    /// Nothing was said within the listen window.
    Timeout,
    Unintelligible,
    /// The operator backed out of this attempt.
    Cancelled,
    /// The input source is gone (stdin closed).
    Closed,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputMode {
    Typing,
    PushToTalk,
    WakeWord,
}

impl InputMode {
    /// Menu choice: 1 = continuous voice, 2 = push-to-talk, anything else = typing.
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim() {
            "1" => InputMode::WakeWord,
            "2" => InputMode::PushToTalk,
            _ => InputMode::Typing,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            InputMode::Typing => "typing",
            InputMode::PushToTalk => "push to talk voice",
            InputMode::WakeWord => "continuous voice",
        }
    }

    pub fn is_voice(&self) -> bool {
        !matches!(self, InputMode::Typing)
    }
}

#[async_trait]
pub trait InputChannel: Send {
    fn mode(&self) -> InputMode;

    async fn next_command(&mut self) -> Listen;

    async fn ask(&mut self, question: &str) -> Listen;
}

/// Something that can record and transcribe one bounded window of speech.
#[async_trait]
pub trait Listener: Send + Sync {
    async fn listen(&self, window_secs: u64) -> Listen;
}

#[async_trait]
impl Listener for VoiceListener {
    async fn listen(&self, window_secs: u64) -> Listen {
        VoiceListener::listen(self, window_secs).await
    }
}

pub struct TypedInput {
    lines: StdinLines,
}

impl TypedInput {
    pub fn new(lines: StdinLines) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl InputChannel for TypedInput {
    fn mode(&self) -> InputMode {
        InputMode::Typing
    }

    async fn next_command(&mut self) -> Listen {
        match self.lines.prompt("Command: ").await {
            Some(line) => Listen::Heard(line.trim().to_string()),
            None => Listen::Closed,
        }
    }

    async fn ask(&mut self, question: &str) -> Listen {
        match self.lines.prompt(&format!("{} ", question)).await {
            Some(line) => Listen::Heard(line.trim().to_string()),
            None => Listen::Closed,
        }
    }
}

pub struct VoiceInput<L: Listener> {
    mode: InputMode,
    listener: L,
    lines: StdinLines,
    speaker: Arc<dyn Speaker>,
    settings: VoiceSettings,
    announced: bool,
    last_failed: bool,
}

impl<L: Listener> VoiceInput<L> {
    pub fn new(
        mode: InputMode,
        listener: L,
        lines: StdinLines,
        speaker: Arc<dyn Speaker>,
        settings: VoiceSettings,
    ) -> Self {
        Self {
            mode,
            listener,
            lines,
            speaker,
            settings,
            announced: false,
            last_failed: false,
        }
    }

    async fn push_to_talk(&mut self) -> Listen {
        let attempts = self.settings.max_retries.max(1);
        for _ in 0..attempts {
            self.speaker.speak("Press Enter and speak... (type q to cancel)").await;
            match self.lines.prompt("").await {
                None => return Listen::Closed,
                Some(line) if line.trim().eq_ignore_ascii_case("q") => {
                    self.speaker.speak("Cancelled.").await;
                    return Listen::Cancelled;
                }
                Some(_) => {}
            }
            match self.listener.listen(self.settings.command_window_secs).await {
                Listen::Heard(text) => {
                    self.speaker.speak(&format!("You said: {}", text)).await;
                    return Listen::Heard(text);
                }
                Listen::Timeout => self.speaker.speak("No speech detected.").await,
                Listen::Unintelligible => self.speaker.speak("Could not understand. Try again.").await,
                other => return other,
            }
        }
        self.speaker.speak(&format!("Failed after {} attempts.", attempts)).await;
        Listen::Timeout
    }

    async fn wake_word(&mut self) -> Listen {
        if !self.announced {
            let greeting = format!(
                "Listening continuously! Say '{}' to give a command. Press Ctrl-C to stop.",
                self.settings.wake_word
            );
            self.speaker.speak(&greeting).await;
            self.announced = true;
        }
        loop {
            match self.listener.listen(self.settings.command_window_secs).await {
                Listen::Heard(text) => {
                    let Some(command) = strip_wake_word(&text, &self.settings.wake_word) else {
                        log::debug!("ignored speech without wake word: {}", text);
                        continue;
                    };
                    if !command.is_empty() {
                        return Listen::Heard(command);
                    }
                    self.speaker.speak("Yes? What should I do?").await;
                    return self.listener.listen(self.settings.command_window_secs).await;
                }
                Listen::Timeout | Listen::Unintelligible => continue,
                other => return other,
            }
        }
    }
}

#[async_trait]
impl<L: Listener> InputChannel for VoiceInput<L> {
    fn mode(&self) -> InputMode {
        self.mode
    }

    async fn next_command(&mut self) -> Listen {
        // A broken microphone fails instantly; don't spin on it.
        if self.last_failed {
            tokio::time::sleep(Duration::from_millis(self.settings.retry_delay_ms)).await;
        }
        let heard = match self.mode {
            InputMode::WakeWord => self.wake_word().await,
            _ => self.push_to_talk().await,
        };
        self.last_failed = matches!(heard, Listen::Failed(_));
        heard
    }

    async fn ask(&mut self, question: &str) -> Listen {
        self.speaker.speak(question).await;
        self.listener.listen(self.settings.answer_window_secs).await
    }
}

/// Returns the command following the wake word, or `None` if the transcript
/// does not start with it. An empty string means only the wake word was said.
pub fn strip_wake_word(transcript: &str, wake_word: &str) -> Option<String> {
    let lower = transcript.trim().to_lowercase();
    let rest = lower.strip_prefix(&wake_word.to_lowercase())?;
    if rest.starts_with(char::is_alphanumeric) {
        return None;
    }
    let command = rest
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches(['.', '!', '?'])
        .trim();
    Some(command.to_string())
}
