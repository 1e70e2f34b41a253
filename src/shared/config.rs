//! Application configuration. Endpoints, locale, prompt tunables, timeouts.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var holding the language-model credential.
pub const CREDENTIAL_KEY: &str = "OPENAI_API_KEY";

/// Default MediaWiki Action API endpoint. `{lang}` is replaced with the locale.
pub const DEFAULT_WIKI_API_URL: &str = "https://{lang}.wikipedia.org/w/api.php";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Wiki language code. Read from WIKI_ENRICH_LOCALE.
    #[serde(default)]
    pub locale: Option<String>,

    /// Sentences per summary. Read from WIKI_ENRICH_SENTENCES.
    #[serde(default)]
    pub sentences: Option<usize>,

    /// Server listen address. Read from WIKI_ENRICH_BIND_ADDR.
    #[serde(default)]
    pub bind_addr: Option<String>,

    /// Base URL the remote client talks to. Read from WIKI_ENRICH_SERVER_URL.
    #[serde(default)]
    pub server_url: Option<String>,

    /// MediaWiki API endpoint template. Read from WIKI_ENRICH_WIKI_API_URL.
    #[serde(default)]
    pub wiki_api_url: Option<String>,

    /// Timeout in seconds for Wikipedia and lookup-server requests. Read from WIKI_ENRICH_HTTP_TIMEOUT_SECS.
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // AI Enrichment Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Chat completions URL. Defaults to OpenAI. Read from WIKI_ENRICH_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Defaults to "gpt-4o-mini". Read from WIKI_ENRICH_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Output token cap for enrichment. Read from WIKI_ENRICH_AI_MAX_TOKENS.
    #[serde(default)]
    pub ai_max_tokens: Option<u32>,

    /// Sampling temperature. Read from WIKI_ENRICH_AI_TEMPERATURE.
    #[serde(default)]
    pub ai_temperature: Option<f32>,

    /// Completion request timeout in seconds. Read from WIKI_ENRICH_AI_TIMEOUT_SECS.
    #[serde(default)]
    pub ai_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Credential Sources
    // ─────────────────────────────────────────────────────────────────────────
    /// TOML secret store consulted first for the credential. Read from WIKI_ENRICH_SECRETS_PATH.
    #[serde(default)]
    pub secrets_path: Option<String>,

    /// Local dotenv file consulted last. Read from WIKI_ENRICH_ENV_FILE.
    #[serde(default)]
    pub env_file: Option<String>,
}

impl AppConfig {
    /// Dotenv file named by WIKI_ENRICH_ENV_FILE, `.env` otherwise.
    pub fn dotenv_path() -> PathBuf {
        std::env::var("WIKI_ENRICH_ENV_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".env"))
    }

    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(&Self::dotenv_path())
    }

    /// Layers, lowest first: WIKI_ENRICH_CONFIG file, dotenv file, process environment.
    /// The dotenv file is read in place; nothing is exported into the process environment.
    pub fn load_with(env_file: &Path) -> Result<Self, config::ConfigError> {
        let file_vars: config::Map<String, String> = dotenv::from_path_iter(env_file)
            .map(|iter| iter.filter_map(Result::ok).collect())
            .unwrap_or_default();

        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("WIKI_ENRICH_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c
            .add_source(config::Environment::with_prefix("WIKI_ENRICH").source(Some(file_vars)))
            .add_source(config::Environment::with_prefix("WIKI_ENRICH"));
        c.build()?.try_deserialize()
    }

    pub fn locale_or_default(&self) -> String {
        self.locale
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "pt".to_string())
    }

    /// Sentences per summary. Defaults to 3; clamped to at least 1.
    pub fn sentences_or_default(&self) -> usize {
        self.sentences.unwrap_or(3).max(1)
    }

    pub fn bind_addr_or_default(&self) -> String {
        self.bind_addr
            .clone()
            .unwrap_or_else(|| "0.0.0.0:8000".to_string())
    }

    pub fn server_url_or_default(&self) -> String {
        self.server_url
            .clone()
            .unwrap_or_else(|| "http://localhost:8000".to_string())
    }

    pub fn wiki_api_url_or_default(&self) -> String {
        self.wiki_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_WIKI_API_URL.to_string())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(10))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    /// Returns the AI model name. Defaults to "gpt-4o-mini".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    pub fn ai_max_tokens_or_default(&self) -> u32 {
        self.ai_max_tokens.unwrap_or(400)
    }

    pub fn ai_temperature_or_default(&self) -> f32 {
        self.ai_temperature.unwrap_or(0.7)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs.unwrap_or(30))
    }

    pub fn secrets_path_or_default(&self) -> PathBuf {
        PathBuf::from(self.secrets_path.as_deref().unwrap_or("secrets.toml"))
    }

    pub fn env_file_or_default(&self) -> PathBuf {
        PathBuf::from(self.env_file.as_deref().unwrap_or(".env"))
    }
}
