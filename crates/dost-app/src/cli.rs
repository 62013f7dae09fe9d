//! CLI argument definitions for the `dost` binary.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dost_core::config::{DEFAULT_PORT, DEFAULT_REMOTE_ENDPOINT};
use dost_core::Language;

/// DBT Dost - bilingual assistant for DBT, Aadhaar seeding and scholarship questions.
#[derive(Parser, Debug)]
#[command(name = "dost", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// API server port.
    #[arg(short = 'p', long = "port", global = true)]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Remote answering service URL.
    #[arg(short = 'e', long = "endpoint", global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP service.
    Serve,
    /// Answer a single question and exit.
    Ask {
        /// The question to answer.
        text: String,
        /// Answer language (hi or en).
        #[arg(long)]
        language: Option<Language>,
        /// Ask the remote service instead of the local knowledge base.
        #[arg(long)]
        remote: bool,
    },
    /// Interactive chat over stdin.
    Chat {
        /// Answer language (hi or en).
        #[arg(long)]
        language: Option<Language>,
        /// Ask the remote service instead of the local knowledge base.
        #[arg(long)]
        remote: bool,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > DOST_CONFIG env var > ~/.dost/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("DOST_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > DOST_PORT env var > config file value > 8000.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        pick_port(self.port, std::env::var("DOST_PORT").ok(), config_port)
    }

    /// Resolve the remote answering service endpoint.
    ///
    /// Priority: --endpoint flag > DOST_CHAT_ENDPOINT env var > config file
    /// value > local development default.
    pub fn resolve_endpoint(&self, config_endpoint: &str) -> String {
        pick_endpoint(
            self.endpoint.as_deref(),
            std::env::var("DOST_CHAT_ENDPOINT").ok(),
            config_endpoint,
        )
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

fn pick_port(flag: Option<u16>, env: Option<String>, config_port: u16) -> u16 {
    if let Some(p) = flag {
        return p;
    }
    if let Some(p) = env.and_then(|v| v.trim().parse::<u16>().ok()) {
        return p;
    }
    if config_port != 0 {
        return config_port;
    }
    DEFAULT_PORT
}

fn pick_endpoint(flag: Option<&str>, env: Option<String>, config_endpoint: &str) -> String {
    let non_blank = |s: &str| !s.trim().is_empty();

    if let Some(e) = flag.filter(|e| non_blank(e)) {
        return e.to_string();
    }
    if let Some(e) = env.filter(|e| non_blank(e)) {
        return e;
    }
    if non_blank(config_endpoint) {
        return config_endpoint.to_string();
    }
    DEFAULT_REMOTE_ENDPOINT.to_string()
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".dost").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".dost").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_flags() {
        let args = CliArgs::try_parse_from([
            "dost", "ask", "DBT क्या है", "--language", "en", "--remote", "--endpoint",
            "http://example.test/chat",
        ])
        .unwrap();

        assert_eq!(args.endpoint.as_deref(), Some("http://example.test/chat"));
        match args.command {
            Command::Ask { text, language, remote } => {
                assert_eq!(text, "DBT क्या है");
                assert_eq!(language, Some(Language::English));
                assert!(remote);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_chat_defaults() {
        let args = CliArgs::try_parse_from(["dost", "chat"]).unwrap();
        match args.command {
            Command::Chat { language, remote } => {
                assert_eq!(language, None);
                assert!(!remote);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_before_subcommand() {
        let args =
            CliArgs::try_parse_from(["dost", "--port", "9100", "-l", "debug", "serve"]).unwrap();
        assert_eq!(args.port, Some(9100));
        assert_eq!(args.resolve_log_level("info"), "debug");
        assert!(matches!(args.command, Command::Serve));
    }

    #[test]
    fn test_parse_rejects_unknown_language() {
        assert!(CliArgs::try_parse_from(["dost", "ask", "dbt", "--language", "fr"]).is_err());
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(CliArgs::try_parse_from(["dost"]).is_err());
    }

    #[test]
    fn test_log_level_falls_back_to_config() {
        let args = CliArgs::try_parse_from(["dost", "serve"]).unwrap();
        assert_eq!(args.resolve_log_level("warn"), "warn");
    }

    #[test]
    fn test_config_path_flag_wins() {
        let args = CliArgs::try_parse_from(["dost", "-c", "/tmp/dost.toml", "serve"]).unwrap();
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/dost.toml"));
    }

    #[test]
    fn test_endpoint_priority() {
        let cfg = "http://config.test/chat";
        let env = || Some("http://env.test/chat".to_string());

        assert_eq!(
            pick_endpoint(Some("http://flag.test/chat"), env(), cfg),
            "http://flag.test/chat"
        );
        assert_eq!(pick_endpoint(None, env(), cfg), "http://env.test/chat");
        assert_eq!(pick_endpoint(None, None, cfg), cfg);
        assert_eq!(pick_endpoint(None, None, ""), DEFAULT_REMOTE_ENDPOINT);
        assert_eq!(pick_endpoint(Some(" "), Some(String::new()), cfg), cfg);
    }

    #[test]
    fn test_port_priority() {
        assert_eq!(pick_port(Some(9000), Some("9001".into()), 9002), 9000);
        assert_eq!(pick_port(None, Some("9001".into()), 9002), 9001);
        assert_eq!(pick_port(None, Some("not-a-port".into()), 9002), 9002);
        assert_eq!(pick_port(None, None, 0), DEFAULT_PORT);
    }
}
