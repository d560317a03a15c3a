use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::commands::ambiguity::resolve_ambiguity;
use crate::commands::handlers::{self, HandlerResult};
use crate::commands::intent::classify_intent;
use crate::commands::message::parse_message_command;
use crate::commands::url::resolve_url;
use crate::models::{ActionType, AmbiguityOutcome, Intent, Outcome, SessionMemory, Settings};
use crate::services::automation::{Automation, Filesystem};
use crate::services::input::InputChannel;
use crate::services::llm::Classifier;

/// Turns one command into exactly one handler call, a web-search fallback or an exit.
pub struct Router {
    classifier: Arc<dyn Classifier>,
    automation: Arc<dyn Automation>,
    filesystem: Arc<dyn Filesystem>,
    folders: BTreeMap<String, PathBuf>,
    search_url: String,
}

impl Router {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        automation: Arc<dyn Automation>,
        filesystem: Arc<dyn Filesystem>,
        settings: &Settings,
    ) -> Self {
        Self {
            classifier,
            automation,
            filesystem,
            folders: settings.folders.clone(),
            search_url: settings.browser.search_url.clone(),
        }
    }

    /// Classifies and carries out `command`. Never fails: every problem is
    /// reported through the returned outcome.
    pub async fn dispatch(
        &self,
        command: &str,
        input: &mut dyn InputChannel,
        session: &mut SessionMemory,
    ) -> Outcome {
        if command.trim().is_empty() {
            return Outcome::Failed {
                message: "I didn't catch that, please try again.".to_string(),
            };
        }

        let mut intent = classify_intent(self.classifier.as_ref(), command).await;
        if intent.action == ActionType::SendMessage && intent.message_incomplete() {
            fill_message_fields(&mut intent, command);
        }
        log::info!(
            "command '{}' classified as {} (target: '{}')",
            command,
            intent.action.as_str(),
            intent.target
        );

        let automation = self.automation.as_ref();
        let result = match intent.action {
            ActionType::Exit => return Outcome::Exit,
            ActionType::PlaySong => Some(handlers::play_song(automation, &intent.target)),
            ActionType::PlayMedia => Some(handlers::play_media(automation, &intent.target)),
            ActionType::OpenFolder => Some(handlers::open_folder(
                self.filesystem.as_ref(),
                &self.folders,
                session,
                &intent.target,
            )),
            ActionType::SendMessage => Some(handlers::send_message(
                automation,
                intent.messaging_app,
                &intent.requested_app,
                &intent.recipient,
                &intent.message_body,
            )),
            ActionType::OpenApp | ActionType::OpenWebsite | ActionType::Unknown => {
                self.open_app_or_website(command, &intent, input).await
            }
        };

        match result {
            Some(Ok(message)) => Outcome::Completed {
                action: intent.action,
                message,
            },
            Some(Err(e)) => {
                log::warn!("{} failed: {}", intent.action.as_str(), e);
                Outcome::Failed { message: e.to_string() }
            }
            None => self.fall_back(command),
        }
    }

    async fn open_app_or_website(
        &self,
        command: &str,
        intent: &Intent,
        input: &mut dyn InputChannel,
    ) -> Option<HandlerResult> {
        let target = intent.target.trim();
        if target.is_empty() {
            return None;
        }

        match resolve_ambiguity(command, intent.action, input).await {
            AmbiguityOutcome::App => Some(handlers::open_app(self.automation.as_ref(), target)),
            AmbiguityOutcome::Website => {
                let url = resolve_url(self.classifier.as_ref(), target).await;
                let url = if url.is_empty() { target.to_string() } else { url };
                Some(handlers::open_website(self.automation.as_ref(), &url))
            }
            AmbiguityOutcome::NotDetermined => None,
        }
    }

    fn fall_back(&self, command: &str) -> Outcome {
        match handlers::web_search(self.automation.as_ref(), &self.search_url, command) {
            Ok(message) => Outcome::FellBack {
                query: command.to_string(),
                message,
            },
            Err(e) => Outcome::Failed { message: e.to_string() },
        }
    }
}

fn fill_message_fields(intent: &mut Intent, command: &str) {
    let Some(parsed) = parse_message_command(command) else {
        return;
    };
    if intent.messaging_app.is_none() {
        intent.messaging_app = Some(parsed.app);
    }
    if intent.recipient.is_empty() {
        intent.recipient = parsed.recipient;
    }
    if intent.message_body.is_empty() {
        intent.message_body = parsed.body;
    }
}
