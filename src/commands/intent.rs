use serde::Deserialize;

use crate::models::{ActionType, Intent, MessagingApp};
use crate::services::llm::Classifier;
use crate::utils::extract_json_object;

const INTENT_PROMPT: &str = r#"You are a desktop assistant. Analyze this command and return JSON with:
{ "action": "<open_app/play_song/open_website/open_folder/play_media/send_message/exit/unknown>",
  "target": "<app/song/URL/folder/video>",
  "messaging_app": "<whatsapp/discord>",
  "recipient": "<name>",
  "message_body": "<text>" }
Use an empty string for any field that does not apply.
User command: "#;

/// Shape the model is asked to produce. Older prompts used `message_app` and `message`.
#[derive(Deserialize)]
struct AiIntentResponse {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default, alias = "message_app")]
    messaging_app: Option<String>,
    #[serde(default)]
    recipient: Option<String>,
    #[serde(default, alias = "message")]
    message_body: Option<String>,
}

/// Classifies a raw command. Any failure yields `Intent::unknown()`.
pub async fn classify_intent(classifier: &dyn Classifier, command: &str) -> Intent {
    let prompt = format!("{}{}", INTENT_PROMPT, command);
    match classifier.classify(&prompt).await {
        Ok(response) => parse_intent(&response),
        Err(e) => {
            log::warn!("AI intent parsing failed: {}", e);
            Intent::unknown()
        }
    }
}

/// Parses the first JSON object in a model response into a fully defaulted intent.
pub fn parse_intent(response: &str) -> Intent {
    let Some(json) = extract_json_object(response) else {
        log::warn!("No JSON object in AI response: {}", response);
        return Intent::unknown();
    };

    let ai_response: AiIntentResponse = match serde_json::from_str(json) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("Failed to parse AI JSON: {} (raw: {})", e, json);
            return Intent::unknown();
        }
    };

    Intent {
        action: ActionType::from_label(ai_response.action.as_deref().unwrap_or_default()),
        target: cleaned(ai_response.target),
        messaging_app: ai_response
            .messaging_app
            .as_deref()
            .and_then(MessagingApp::from_label),
        requested_app: cleaned(ai_response.messaging_app),
        recipient: cleaned(ai_response.recipient),
        message_body: cleaned(ai_response.message_body),
    }
}

fn cleaned(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
