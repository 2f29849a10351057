//! Configuration and CLI argument handling

use clap::Parser;

use crate::{services::NotifierKind, timer::RestConfig};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "task-pomodoro")]
#[command(about = "A headless Pomodoro timer with proportional rest and hourly milestones")]
#[command(version)]
pub struct Config {
    /// Port to bind the control API to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Minimum rest duration in minutes
    #[arg(long, default_value_t = RestConfig::DEFAULT_MIN_REST_MINUTES)]
    pub min_rest_minutes: u64,

    /// Rest minutes earned per work block
    #[arg(long, default_value_t = RestConfig::DEFAULT_REST_RATIO,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub rest_ratio: u64,

    /// Work minutes in one block
    #[arg(long, default_value_t = RestConfig::DEFAULT_WORK_RATIO,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub work_ratio: u64,

    /// Notification backend
    #[arg(long, value_enum, default_value_t = NotifierKind::Auto)]
    pub notifier: NotifierKind,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Rest ratios for the session
    pub fn rest_config(&self) -> RestConfig {
        RestConfig::new(self.min_rest_minutes, self.rest_ratio, self.work_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro() {
        let config = Config::try_parse_from(["task-pomodoro"]).unwrap();
        assert_eq!(config.rest_config(), RestConfig::default());
        assert_eq!(config.notifier, NotifierKind::Auto);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn ratios_and_backend_are_configurable() {
        let config = Config::try_parse_from([
            "task-pomodoro",
            "--min-rest-minutes",
            "0",
            "--rest-ratio",
            "10",
            "--work-ratio",
            "50",
            "--notifier",
            "log",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.rest_config(), RestConfig::new(0, 10, 50));
        assert_eq!(config.notifier, NotifierKind::Log);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn zero_work_ratio_is_rejected() {
        assert!(Config::try_parse_from(["task-pomodoro", "--work-ratio", "0"]).is_err());
        assert!(Config::try_parse_from(["task-pomodoro", "--rest-ratio", "0"]).is_err());
    }
}
