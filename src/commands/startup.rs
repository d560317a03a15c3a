use crate::commands::handlers;
use crate::models::StartupSettings;
use crate::services::automation::Automation;

/// Launches the daily apps in order, then the playlist. A failed launch is
/// reported and the rest still run.
pub fn start_my_day(automation: &dyn Automation, startup: &StartupSettings) -> Vec<String> {
    let mut report = Vec::new();
    for app in startup.apps.iter().filter(|app| !app.trim().is_empty()) {
        report.push(reported(handlers::open_app(automation, app)));
    }
    if let Some(playlist) = startup.playlist.as_deref().filter(|p| !p.trim().is_empty()) {
        report.push(reported(handlers::play_song(automation, playlist)));
    }
    report
}

fn reported(result: handlers::HandlerResult) -> String {
    result.unwrap_or_else(|e| {
        log::warn!("startup step failed: {}", e);
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, MockAutomation};

    #[test]
    fn apps_launch_in_order_then_playlist() {
        let automation = MockAutomation::default();
        let startup = StartupSettings {
            apps: vec!["Brave".into(), " ".into(), "Discord".into()],
            playlist: Some("seedhe maut".into()),
        };

        let report = start_my_day(&automation, &startup);

        assert_eq!(
            automation.calls(),
            vec![
                Call::LaunchApp("Brave".into()),
                Call::LaunchApp("Discord".into()),
                Call::PlaySong("seedhe maut".into()),
            ]
        );
        assert_eq!(report, vec!["Opening Brave", "Opening Discord", "Playing seedhe maut on Spotify"]);
    }

    #[test]
    fn failed_launch_does_not_stop_the_rest() {
        let automation = MockAutomation::failing_on(&["Discord"]);
        let startup = StartupSettings {
            apps: vec!["Discord".into(), "WhatsApp".into()],
            playlist: None,
        };

        let report = start_my_day(&automation, &startup);

        assert!(report[0].starts_with("Could not open Discord"));
        assert_eq!(report[1], "Opening WhatsApp");
        assert_eq!(automation.calls(), vec![Call::LaunchApp("WhatsApp".into())]);
    }
}
