use crate::models::{ActionType, AmbiguityOutcome};
use crate::services::input::{InputChannel, Listen};
use crate::utils::has_word;

pub const APP_OR_WEBSITE: &str = "Do you want the app or the website?";

/// Decides whether `command` refers to a desktop app or a website, asking the
/// operator only when the wording does not say.
pub async fn resolve_ambiguity(
    command: &str,
    action: ActionType,
    input: &mut dyn InputChannel,
) -> AmbiguityOutcome {
    if let Some(outcome) = keyword_choice(command) {
        return outcome;
    }
    if action.is_unambiguous() {
        return AmbiguityOutcome::NotDetermined;
    }

    match input.ask(APP_OR_WEBSITE).await {
        Listen::Heard(answer) => keyword_choice(&answer).unwrap_or(AmbiguityOutcome::NotDetermined),
        other => {
            log::debug!("no app/website answer: {:?}", other);
            AmbiguityOutcome::NotDetermined
        }
    }
}

fn keyword_choice(text: &str) -> Option<AmbiguityOutcome> {
    if has_word(text, "website") {
        Some(AmbiguityOutcome::Website)
    } else if has_word(text, "app") {
        Some(AmbiguityOutcome::App)
    } else {
        None
    }
}
