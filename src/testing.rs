use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{FridayError, HandlerError, Result};
use crate::models::MessagingApp;
use crate::services::automation::{Automation, Filesystem};
use crate::services::input::{InputChannel, InputMode, Listen, Listener};
use crate::services::llm::Classifier;
use crate::services::speech::Speaker;

/// Replies to prompts in order; `None` entries simulate service failures.
pub struct MockClassifier {
    replies: Mutex<VecDeque<Option<String>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl MockClassifier {
    pub fn new(replies: Vec<Option<&str>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(str::to_string)).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::new(vec![])
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front().flatten() {
            Some(reply) => Ok(reply),
            None => Err(FridayError::Llm("service unavailable".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LaunchApp(String),
    OpenUrl(String),
    PlaySong(String),
    PlayMedia(String),
    SendMessage(MessagingApp, String, String),
}

#[derive(Default)]
pub struct MockAutomation {
    pub calls: Mutex<Vec<Call>>,
    unlaunchable: HashSet<String>,
}

impl MockAutomation {
    pub fn failing_on(apps: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            unlaunchable: apps.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> std::result::Result<(), HandlerError> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl Automation for MockAutomation {
    fn launch_app(&self, name: &str) -> std::result::Result<(), HandlerError> {
        if self.unlaunchable.contains(name) {
            return Err(HandlerError::launch(name, "not installed"));
        }
        self.record(Call::LaunchApp(name.to_string()))
    }

    fn open_url(&self, url: &str) -> std::result::Result<(), HandlerError> {
        self.record(Call::OpenUrl(url.to_string()))
    }

    fn play_song(&self, query: &str) -> std::result::Result<(), HandlerError> {
        self.record(Call::PlaySong(query.to_string()))
    }

    fn play_media(&self, query: &str) -> std::result::Result<(), HandlerError> {
        self.record(Call::PlayMedia(query.to_string()))
    }

    fn send_message(
        &self,
        app: MessagingApp,
        recipient: &str,
        body: &str,
    ) -> std::result::Result<(), HandlerError> {
        self.record(Call::SendMessage(app, recipient.to_string(), body.to_string()))
    }
}

#[derive(Default)]
pub struct MockFilesystem {
    existing: HashSet<PathBuf>,
    pub opened: Mutex<Vec<PathBuf>>,
}

impl MockFilesystem {
    pub fn with_dirs<P: AsRef<Path>>(dirs: &[P]) -> Self {
        Self {
            existing: dirs.iter().map(|d| d.as_ref().to_path_buf()).collect(),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

impl Filesystem for MockFilesystem {
    fn folder_exists(&self, path: &Path) -> bool {
        self.existing.contains(path)
    }

    fn open(&self, path: &Path) -> std::result::Result<(), HandlerError> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

pub struct ScriptedInput {
    mode: InputMode,
    commands: VecDeque<Listen>,
    answers: VecDeque<Listen>,
    pub questions: Vec<String>,
}

impl ScriptedInput {
    pub fn new(mode: InputMode, commands: Vec<Listen>, answers: Vec<Listen>) -> Self {
        Self {
            mode,
            commands: commands.into(),
            answers: answers.into(),
            questions: Vec::new(),
        }
    }

    pub fn answering(answers: Vec<Listen>) -> Self {
        Self::new(InputMode::Typing, vec![], answers)
    }
}

#[async_trait]
impl InputChannel for ScriptedInput {
    fn mode(&self) -> InputMode {
        self.mode
    }

    async fn next_command(&mut self) -> Listen {
        self.commands.pop_front().unwrap_or(Listen::Closed)
    }

    async fn ask(&mut self, question: &str) -> Listen {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or(Listen::Timeout)
    }
}

#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: Mutex<Vec<String>>,
}

impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl Speaker for RecordingSpeaker {
    async fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

pub struct Silent;

#[async_trait]
impl Speaker for Silent {
    async fn speak(&self, _text: &str) {}
}

/// Listener that replays canned capture results, then reports `Closed`.
pub struct ScriptedListener {
    replies: Mutex<VecDeque<Listen>>,
}

impl ScriptedListener {
    pub fn new(replies: Vec<Listen>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl Listener for ScriptedListener {
    async fn listen(&self, _window_secs: u64) -> Listen {
        self.replies.lock().unwrap().pop_front().unwrap_or(Listen::Closed)
    }
}
