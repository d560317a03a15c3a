mod commands;
mod error;
mod models;
mod services;
#[cfg(test)]
mod testing;
mod utils;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use commands::router::Router;
use models::{Outcome, SessionMemory, Settings};
use services::automation::{Automation, DesktopAutomation, DesktopFilesystem};
use services::input::{InputChannel, InputMode, Listen, TypedInput, VoiceInput};
use services::llm::LlmClient;
use services::speech::{Speaker, Speech};
use services::voice::VoiceListener;
use utils::stdin::StdinLines;

const DIDNT_CATCH: &str = "I didn't catch that, please try again.";

#[derive(Parser, Debug)]
#[command(name = "friday", version, about = "Voice and text desktop assistant")]
struct Cli {
    /// Input mode; asked interactively when omitted.
    #[arg(long, value_enum)]
    mode: Option<InputMode>,

    /// Settings file (defaults to <config dir>/friday/settings.json).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Launch the daily apps and playlist before taking commands.
    #[arg(long)]
    startup: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings =
        utils::config::load_settings(cli.settings.as_deref()).context("Failed to load settings")?;
    utils::config::require_api_key(&settings)?;

    tokio::select! {
        result = run(cli.mode, cli.startup, settings) => result,
        _ = interrupted() => {
            println!("\nInterrupted. Exiting.");
            std::process::exit(130);
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn run(mode: Option<InputMode>, startup: bool, settings: Settings) -> anyhow::Result<()> {
    let speaker: Arc<dyn Speaker> = Arc::new(Speech::new(settings.speech.clone()));
    let automation: Arc<dyn Automation> = Arc::new(DesktopAutomation::new(settings.browser.clone()));

    if startup {
        speaker.speak("Starting your day.").await;
        for line in commands::startup::start_my_day(automation.as_ref(), &settings.startup) {
            println!("  {}", line);
        }
        speaker.speak("All daily apps launched.").await;
    }
    speaker.speak("Friday assistant ready!").await;

    let mut lines = StdinLines::spawn();
    let mode = match mode {
        Some(mode) => mode,
        None => choose_mode(&mut lines).await,
    };
    speaker.speak(&format!("Using {} mode.", mode.describe())).await;

    let router = Router::new(
        Arc::new(LlmClient::new(&settings.ai)),
        automation,
        Arc::new(DesktopFilesystem),
        &settings,
    );

    let mut input: Box<dyn InputChannel> = if mode.is_voice() {
        Box::new(VoiceInput::new(
            mode,
            VoiceListener::new(&settings.voice),
            lines,
            speaker.clone(),
            settings.voice.clone(),
        ))
    } else {
        Box::new(TypedInput::new(lines))
    };

    command_loop(&router, input.as_mut(), speaker.as_ref()).await;
    Ok(())
}

async fn choose_mode(lines: &mut StdinLines) -> InputMode {
    println!("Choose input mode:");
    println!("  1. Continuous voice (say the wake word)");
    println!("  2. Push to talk");
    println!("  3. Typing");
    match lines.prompt("Enter 1, 2 or 3: ").await {
        Some(choice) => InputMode::from_choice(&choice),
        None => InputMode::Typing,
    }
}

async fn command_loop(router: &Router, input: &mut dyn InputChannel, speaker: &dyn Speaker) {
    let mut session = SessionMemory::new();
    loop {
        let command = match input.next_command().await {
            Listen::Heard(text) if !text.trim().is_empty() => text,
            Listen::Closed => break,
            Listen::Cancelled if !input.mode().is_voice() => break,
            Listen::Cancelled => continue,
            Listen::Failed(reason) => {
                log::warn!("input failed: {}", reason);
                speaker.speak(&format!("Sorry, something went wrong: {}", reason)).await;
                continue;
            }
            Listen::Heard(_) | Listen::Timeout | Listen::Unintelligible => {
                speaker.speak(DIDNT_CATCH).await;
                continue;
            }
        };

        let outcome = router.dispatch(&command, input, &mut session).await;
        speaker.speak(outcome.message()).await;
        if outcome == Outcome::Exit {
            break;
        }
    }
}
