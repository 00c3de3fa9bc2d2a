//! Runtime configuration.
//!
//! Every setting can come from a command-line flag or an environment
//! variable (flags win). Binaries load `.env` before parsing so local
//! development can keep credentials out of the shell history.

use std::time::Duration;

use clap::{Args, ValueEnum};
use llm_client::BedrockConfig;
use tracing_subscriber::EnvFilter;

/// How the binary should run when no explicit command is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Run a handful of sample prompts and print the plans
    Demo,
    /// Serve the HTTP interface
    Server,
}

#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Bedrock API key
    #[arg(long, env = "AWS_BEARER_TOKEN_BEDROCK", hide_env_values = true)]
    pub api_key: Option<String>,

    /// AWS region hosting the Bedrock runtime
    #[arg(long, env = "AWS_REGION", default_value = llm_client::DEFAULT_REGION)]
    pub region: String,

    /// Bedrock model identifier
    #[arg(long, env = "BEDROCK_MODEL_ID", default_value = llm_client::DEFAULT_MODEL_ID)]
    pub model_id: String,

    /// Maximum tokens per generation
    #[arg(long, env = "BEDROCK_MAX_TOKENS", default_value = "2000")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[arg(long, env = "BEDROCK_TEMPERATURE", default_value = "0.7")]
    pub temperature: f32,

    /// HTTP timeout for each model call, in seconds
    #[arg(long, env = "BEDROCK_TIMEOUT_SECS", default_value = "120")]
    pub timeout_secs: u64,

    /// Override the Bedrock runtime endpoint
    #[arg(long, env = "BEDROCK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Execution mode when no command is given
    #[arg(long, env = "APP_MODE", value_enum, default_value = "demo")]
    pub mode: Mode,

    /// Environment name reported by /health
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let bedrock = BedrockConfig::default();
        Self {
            api_key: None,
            region: bedrock.region,
            model_id: bedrock.model_id,
            max_tokens: bedrock.max_tokens,
            temperature: bedrock.temperature,
            timeout_secs: bedrock.timeout.as_secs(),
            endpoint: None,
            log_level: "info".to_string(),
            port: 8080,
            mode: Mode::Demo,
            environment: "development".to_string(),
        }
    }
}

impl AppConfig {
    /// Settings for the Bedrock client
    pub fn bedrock_config(&self) -> BedrockConfig {
        BedrockConfig {
            api_key: self.api_key.clone(),
            region: self.region.clone(),
            model_id: self.model_id.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
            base_url: self.endpoint.clone(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.bedrock_config().has_credentials()
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: AppConfig,
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = TestCli::try_parse_from([
            "test",
            "--api-key",
            "secret",
            "--region",
            "eu-central-1",
            "--port",
            "9000",
            "--mode",
            "server",
            "--timeout-secs",
            "30",
        ])
        .unwrap();

        assert_eq!(cli.config.port, 9000);
        assert_eq!(cli.config.mode, Mode::Server);
        assert!(cli.config.has_credentials());

        let bedrock = cli.config.bedrock_config();
        assert_eq!(bedrock.region, "eu-central-1");
        assert_eq!(bedrock.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_default_config_matches_client_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.mode, Mode::Demo);
        assert!(!config.has_credentials());

        let bedrock = config.bedrock_config();
        let defaults = BedrockConfig::default();
        assert_eq!(bedrock.model_id, defaults.model_id);
        assert_eq!(bedrock.timeout, defaults.timeout);
    }
}
