//! Command line and environment configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::source::{
    Generator, InputPolicy, OpenAiConfig, OpenAiSource, PlaceholderSource, QuestionSource,
    RelaySource, Tier, DEFAULT_BASE_URL, DEFAULT_MODEL,
};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Turn a passage of text into a multiple-choice quiz", long_about = None)]
pub struct Settings {
    /// API key for the text generation service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the chat completions API
    #[arg(long, env = "MCQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model used to generate questions
    #[arg(long, env = "MCQ_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Relay endpoint accepting {"text": ...}; used instead of calling the API directly
    #[arg(long, env = "MCQ_RELAY_URL", conflicts_with = "offline")]
    pub relay_url: Option<String>,

    /// Generate placeholder questions locally instead of calling a service
    #[arg(long)]
    pub offline: bool,

    /// Input size tier: free, paid or unlimited
    #[arg(long, env = "MCQ_TIER", default_value_t = Tier::Unlimited)]
    pub tier: Tier,

    /// How long an answered question stays on screen
    #[arg(long, env = "MCQ_ADVANCE_DELAY_MS", default_value_t = 1000)]
    pub advance_delay_ms: u64,

    /// Timeout for a single generation request
    #[arg(long, env = "MCQ_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Seed for option shuffling
    #[arg(long)]
    pub seed: Option<u64>,

    /// File whose contents pre-fill the text entry
    #[arg(short, long)]
    pub text_file: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long, env = "MCQ_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            relay_url: None,
            offline: false,
            tier: Tier::default(),
            advance_delay_ms: 1000,
            timeout_secs: 60,
            seed: None,
            text_file: None,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn input_policy(&self) -> InputPolicy {
        InputPolicy::for_tier(self.tier)
    }

    /// Pick the question source these settings describe.
    ///
    /// A missing API key is not reported here; the direct source fails each
    /// request with `MissingApiKey` so only generation is affected.
    pub fn source(&self) -> Arc<dyn QuestionSource> {
        if self.offline {
            return Arc::new(PlaceholderSource);
        }

        if let Some(url) = &self.relay_url {
            return Arc::new(RelaySource::new(url.clone(), self.timeout()));
        }

        Arc::new(OpenAiSource::new(OpenAiConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            timeout: self.timeout(),
        }))
    }

    pub fn generator(&self) -> Generator {
        Generator::new(self.source(), self.input_policy())
    }
}
