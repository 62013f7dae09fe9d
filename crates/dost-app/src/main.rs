//! DBT Dost application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Apply flag / environment overrides
//! 3. Build the chat orchestrator (knowledge base, picker, remote client)
//! 4. Run the requested command: HTTP service, one-shot answer or REPL

mod cli;

use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

use dost_api::routes;
use dost_api::state::AppState;
use dost_chat::{ChatOrchestrator, Reply};
use dost_core::config::DostConfig;
use dost_core::{ChatMode, Language};

use cli::{CliArgs, Command};

/// Run the HTTP service until it fails or the process is stopped.
async fn serve(config: &DostConfig, orchestrator: &ChatOrchestrator) -> dost_core::Result<()> {
    let state = AppState::new(orchestrator.local_resolver().clone(), config.api.clone());
    tracing::info!(
        host = %config.api.host,
        port = config.api.port,
        origins = config.api.allowed_origins.len(),
        "API server starting"
    );
    routes::start_server(config, state).await
}

/// Answer one utterance and print it.
async fn ask(orchestrator: &ChatOrchestrator, text: &str, language: Option<Language>) {
    if let Some(answer) = orchestrator.submit(text, language).await.into_text() {
        println!("{}", answer);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ReplAction {
    Skip,
    Quit,
    Submit,
}

/// Classify one input line. The line itself is submitted untrimmed.
fn repl_action(line: &str) -> ReplAction {
    let command = line.trim();
    if command.is_empty() {
        ReplAction::Skip
    } else if command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit") {
        ReplAction::Quit
    } else {
        ReplAction::Submit
    }
}

/// Interactive loop: welcome line, then one answer per input line.
async fn chat(
    orchestrator: &ChatOrchestrator,
    language: Option<Language>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", orchestrator.welcome(language));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match repl_action(&line) {
            ReplAction::Skip => continue,
            ReplAction::Quit => break,
            ReplAction::Submit => {}
        }

        match orchestrator.submit(&line, language).await {
            Reply::Answered(answer) => println!("{}", answer.text),
            Reply::Superseded { turn } => tracing::debug!(turn, "Turn superseded"),
        }
    }

    tracing::info!(turns = orchestrator.current_turn(), "Chat session ended");
    Ok(())
}

/// Filter installed before the config file is read, and whether it must be
/// kept once the file's level is known.
fn startup_filter(from_env: Option<EnvFilter>, flag: Option<&str>) -> (EnvFilter, bool) {
    match (from_env, flag) {
        (Some(filter), _) => (filter, true),
        (None, Some(level)) => (EnvFilter::new(level), true),
        (None, None) => (EnvFilter::new("info"), false),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing first so config loading is logged. RUST_LOG wins, then
    // --log-level; otherwise the config file's level is applied once loaded.
    let (initial, fixed_level) = startup_filter(
        EnvFilter::try_from_default_env().ok(),
        args.log_level.as_deref(),
    );
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting DBT Dost v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = DostConfig::load_or_default(&config_file);
    config.general.log_level = args.resolve_log_level(&config.general.log_level);
    config.api.port = args.resolve_port(config.api.port);
    config.remote.endpoint = args.resolve_endpoint(&config.remote.endpoint);

    if !fixed_level {
        if let Err(e) = filter_handle.reload(EnvFilter::new(&config.general.log_level)) {
            tracing::warn!(error = %e, "Could not apply configured log level");
        }
    }
    tracing::info!(
        path = %config_file.display(),
        log_level = %config.general.log_level,
        endpoint = %config.remote.endpoint,
        "Configuration loaded"
    );

    match args.command {
        Command::Serve => {
            let orchestrator = ChatOrchestrator::from_config(&config)?;
            serve(&config, &orchestrator).await?;
        }
        Command::Ask {
            text,
            language,
            remote,
        } => {
            if remote {
                config.chat.mode = ChatMode::Remote;
            }
            let orchestrator = ChatOrchestrator::from_config(&config)?;
            ask(&orchestrator, &text, language).await;
        }
        Command::Chat { language, remote } => {
            if remote {
                config.chat.mode = ChatMode::Remote;
            }
            let orchestrator = ChatOrchestrator::from_config(&config)?;
            chat(&orchestrator, language).await?;
        }
    }

    Ok(())
}
