// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, .env loading, and typed runtime configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! Environment-based configuration management

use crate::constants::generation::{DEFAULT_RECIPE_COUNT, MAX_RECIPE_COUNT};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Default OpenRouter chat-completions base URL
pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model, a free OpenRouter tier model
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-oss-20b:free";

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Default level
    #[default]
    Info,
    /// Verbose
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Whether this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        };
        f.write_str(name)
    }
}

/// Upstream chat-completion endpoint settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Bearer key; optional for local servers
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Completion token limit per request
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Upstream request timeout
    pub timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_owned(),
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_owned(),
            max_tokens: 800,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

impl LlmConfig {
    /// Whether the endpoint is the hosted OpenRouter API
    #[must_use]
    pub fn is_openrouter(&self) -> bool {
        self.base_url.contains("openrouter.ai")
    }
}

/// Prompting behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// How many recipes to ask for
    pub recipe_count: u8,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            recipe_count: DEFAULT_RECIPE_COUNT,
        }
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// `*` or a comma separated origin list
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Upstream LLM
    pub llm: LlmConfig,
    /// Prompting behaviour
    pub generation: GenerationConfig,
    /// CORS policy
    pub cors: CorsConfig,
    /// Directory of static front-end assets
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            llm: LlmConfig::default(),
            generation: GenerationConfig::default(),
            cors: CorsConfig::default(),
            static_dir: PathBuf::from("public"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value or the
    /// upstream API key is missing for a hosted endpoint.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        load_dotenv();

        let recipe_count: u8 = parse_env("RECIPE_COUNT", DEFAULT_RECIPE_COUNT)?;

        let config = Self {
            host: env_var_or("HOST", "0.0.0.0"),
            http_port: http_port()?,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            llm: LlmConfig {
                base_url: env_var_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
                api_key: env::var("OPENROUTER_API_KEY")
                    .or_else(|_| env::var("LLM_API_KEY"))
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: env_var_or("LLM_MODEL", DEFAULT_LLM_MODEL),
                max_tokens: parse_env("LLM_MAX_TOKENS", 800)?,
                temperature: parse_env("LLM_TEMPERATURE", 0.7)?,
                timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            },
            generation: GenerationConfig {
                recipe_count: recipe_count.clamp(1, MAX_RECIPE_COUNT),
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            static_dir: PathBuf::from(env_var_or("STATIC_DIR", "public")),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error when the hosted endpoint has no API key or the
    /// sampling settings are out of range.
    pub fn validate(&self) -> Result<()> {
        if self.llm.is_openrouter() && self.llm.api_key.is_none() {
            bail!("Missing OPENROUTER_API_KEY (set it in the environment or .env)");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            bail!(
                "LLM_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            );
        }
        if self.llm.max_tokens == 0 {
            bail!("LLM_MAX_TOKENS must be positive");
        }
        Ok(())
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// One-line-per-setting summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "SpiceSync Server Configuration:\n\
             - Bind: {}\n\
             - Environment: {:?}\n\
             - Log Level: {}\n\
             - LLM Endpoint: {}\n\
             - LLM Model: {}\n\
             - LLM API Key: {}\n\
             - Recipes per request: {}\n\
             - Static assets: {}\n\
             - CORS origins: {}",
            self.bind_address(),
            self.environment,
            self.log_level,
            self.llm.base_url,
            self.llm.model,
            if self.llm.api_key.is_some() {
                "Configured"
            } else {
                "Not set"
            },
            self.generation.recipe_count,
            self.static_dir.display(),
            self.cors.allowed_origins,
        )
    }
}

/// Client-side configuration (CLI front end)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the SpiceSync backend
    pub api_url: String,
    /// Directory holding the favorites slot
    pub data_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: format!("http://localhost:{DEFAULT_HTTP_PORT}"),
            data_dir: default_data_dir(),
        }
    }
}

impl ClientConfig {
    /// Load client configuration from the environment
    #[must_use]
    pub fn from_env() -> Self {
        load_dotenv();
        let defaults = Self::default();
        Self {
            api_url: env::var("SPICESYNC_API_URL").unwrap_or(defaults.api_url),
            data_dir: env::var("SPICESYNC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        }
    }
}

/// Platform data directory for favorites, falling back to the working directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from(".spicesync"), |dir| dir.join("spicesync"))
}

fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        warn!("No .env file found or failed to load: {e}");
    }
}

/// `HTTP_PORT`, else the platform-provided `PORT`, else the default
fn http_port() -> Result<u16> {
    let key = if env::var_os("HTTP_PORT").is_some() {
        "HTTP_PORT"
    } else {
        "PORT"
    };
    parse_env(key, DEFAULT_HTTP_PORT)
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}
