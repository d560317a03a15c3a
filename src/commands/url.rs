use serde::Deserialize;

use crate::services::llm::Classifier;
use crate::utils::extract_json_object;

#[derive(Deserialize)]
struct UrlResponse {
    #[serde(default)]
    url: Option<String>,
}

/// Resolves a site name to a full URL. An empty string means nothing usable was found.
pub async fn resolve_url(classifier: &dyn Classifier, target: &str) -> String {
    let target = target.trim();
    if target.starts_with("http") {
        return clean_url(target);
    }

    if let Some(url) = ask_for_url(classifier, target).await {
        let cleaned = clean_url(&url);
        if !cleaned.is_empty() {
            return cleaned;
        }
    }

    clean_url(target)
}

async fn ask_for_url(classifier: &dyn Classifier, target: &str) -> Option<String> {
    let prompt = format!(
        "Extract official website URL from: {}. Respond only with JSON: {{\"url\": \"<full URL>\"}}",
        target
    );
    let response = match classifier.classify(&prompt).await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("URL resolution failed for '{}': {}", target, e);
            return None;
        }
    };

    let parsed = extract_json_object(&response)
        .and_then(|json| serde_json::from_str::<UrlResponse>(json).ok());
    match parsed.and_then(|r| r.url) {
        Some(url) => Some(url),
        None => {
            log::warn!("No URL in resolver response: {}", response);
            None
        }
    }
}

fn clean_url(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let stripped = stripped
        .trim_start_matches(['"', '\''])
        .trim_end_matches(['"', '\'', '.']);
    if stripped.is_empty() {
        return String::new();
    }
    if stripped.starts_with("http") {
        stripped.to_string()
    } else {
        format!("https://{}", stripped)
    }
}
