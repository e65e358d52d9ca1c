//! Server configuration
//!
//! Every option can be given on the command line or through the environment.

use crate::ports::llm::LlmConfig;
use chrono::FixedOffset;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "meet-insights", version, about = "Meeting analysis and insights service")]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "MEET_INSIGHTS_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// SQLite database file for users and saved meetings
    #[arg(long, env = "MEET_INSIGHTS_DATABASE", default_value = "meet-insights.db")]
    pub database: PathBuf,

    /// API key for the completion service; analysis is refused without it
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(
        long,
        env = "OPENAI_BASE_URL",
        default_value = crate::adapters::services::llm::openai::OPENAI_API_BASE
    )]
    pub openai_base_url: String,

    /// Model identifier used for analysis
    #[arg(long, env = "MEET_INSIGHTS_MODEL", default_value = "gpt-3.5-turbo")]
    pub model: String,

    #[arg(long, env = "MEET_INSIGHTS_TEMPERATURE", default_value_t = 0.3)]
    pub temperature: f32,

    #[arg(long, env = "MEET_INSIGHTS_MAX_TOKENS", default_value_t = 2000)]
    pub max_tokens: u32,

    /// Transport timeout for one completion call, in seconds
    #[arg(long, env = "MEET_INSIGHTS_REQUEST_TIMEOUT_SECS", default_value_t = 120)]
    pub request_timeout_secs: u64,

    /// UTC offset used when bucketing meetings by weekday, e.g. +09:00
    #[arg(
        long,
        env = "MEET_INSIGHTS_UTC_OFFSET",
        default_value = "+09:00",
        value_parser = parse_utc_offset
    )]
    pub utc_offset: FixedOffset,
}

impl ServerConfig {
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.model.clone(),
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The API key, treating an empty value as absent
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Parses `+HH:MM`, `-HH:MM` or `Z`
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(|| "invalid offset".to_string());
    }

    let invalid = || format!("Invalid UTC offset '{}', expected +HH:MM", s);

    let (sign, rest) = if let Some(rest) = s.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = s.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_VARS: &[&str] = &[
        "MEET_INSIGHTS_BIND",
        "MEET_INSIGHTS_DATABASE",
        "MEET_INSIGHTS_MODEL",
        "MEET_INSIGHTS_TEMPERATURE",
        "MEET_INSIGHTS_MAX_TOKENS",
        "MEET_INSIGHTS_REQUEST_TIMEOUT_SECS",
        "MEET_INSIGHTS_UTC_OFFSET",
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        clear_env();
        let config = ServerConfig::parse_from(["meet-insights"]);
        assert_eq!(config.bind.port(), 3000);
        assert_eq!(config.utc_offset.local_minus_utc(), 9 * 3600);

        let llm = config.llm_config();
        assert_eq!(llm.temperature, Some(0.3));
        assert_eq!(llm.max_tokens, Some(2000));
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_overrides() {
        clear_env();
        let config = ServerConfig::parse_from([
            "meet-insights",
            "--model",
            "gpt-4",
            "--utc-offset=-05:30",
            "--openai-api-key",
            "  ",
        ]);
        assert_eq!(config.llm_config().model, "gpt-4");
        assert_eq!(config.utc_offset.local_minus_utc(), -(5 * 3600 + 30 * 60));
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_every_option_has_env_fallback() {
        use clap::CommandFactory;

        let command = ServerConfig::command();
        let envs: Vec<_> = command
            .get_arguments()
            .filter(|arg| !matches!(arg.get_id().as_str(), "help" | "version"))
            .map(|arg| {
                arg.get_env()
                    .and_then(|e| e.to_str())
                    .unwrap_or_else(|| panic!("--{} has no env fallback", arg.get_id()))
                    .to_string()
            })
            .collect();

        for var in ENV_VARS {
            assert!(envs.iter().any(|e| e == var), "missing {}", var);
        }
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("+00:00").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("09:00").is_err());
        assert!(parse_utc_offset("+24:00").is_err());
        assert!(parse_utc_offset("+9").is_err());
    }
}
