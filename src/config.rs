use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_SUMMARIZATION_MODEL: &str = "t5-small";
const DEFAULT_KEYWORD_TOP_N: usize = 8;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
const DEFAULT_TESSERACT_BIN: &str = "tesseract";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the document summarizer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend used to summarize text chunks.
    pub summarization_provider: SummarizationProvider,
    /// Optional base URL override for the summarization backend.
    pub summarization_url: Option<String>,
    /// Model identifier passed to the summarization backend.
    pub summarization_model: String,
    /// Optional bearer token for hosted inference endpoints.
    pub hf_api_token: Option<String>,
    /// Number of keywords extracted from each summary.
    pub keyword_top_n: usize,
    /// How keyword spans are inserted into the summary.
    pub highlight_mode: HighlightMode,
    /// Directory receiving uploaded files.
    pub upload_dir: PathBuf,
    /// Request body limit for uploads.
    pub max_upload_bytes: usize,
    /// Executable invoked for image OCR.
    pub tesseract_bin: String,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

/// Supported summarization backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummarizationProvider {
    /// Hugging Face inference-style `summarization` endpoint.
    HuggingFace,
    /// Local Ollama runtime.
    Ollama,
}

/// Keyword highlighting strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightMode {
    /// One scan over the text; inserted markup is never matched again.
    #[default]
    SinglePass,
    /// Replace every keyword in turn over the progressively updated text.
    Sequential,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            summarization_provider: load_env_optional("SUMMARIZATION_PROVIDER")
                .map(|value| {
                    value.parse().map_err(|()| {
                        ConfigError::InvalidValue("SUMMARIZATION_PROVIDER".to_string())
                    })
                })
                .transpose()?
                .unwrap_or(SummarizationProvider::HuggingFace),
            summarization_url: load_env_optional("SUMMARIZATION_URL"),
            summarization_model: load_env_optional("SUMMARIZATION_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZATION_MODEL.to_string()),
            hf_api_token: load_env_optional("HF_API_TOKEN"),
            keyword_top_n: parse_optional("KEYWORD_TOP_N")?.unwrap_or(DEFAULT_KEYWORD_TOP_N),
            highlight_mode: load_env_optional("HIGHLIGHT_MODE")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|()| ConfigError::InvalidValue("HIGHLIGHT_MODE".to_string()))
                })
                .transpose()?
                .unwrap_or_default(),
            upload_dir: load_env_optional("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_bytes: parse_optional("MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            tesseract_bin: load_env_optional("TESSERACT_BIN")
                .unwrap_or_else(|| DEFAULT_TESSERACT_BIN.to_string()),
            server_port: parse_optional("SERVER_PORT")?,
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

impl std::str::FromStr for SummarizationProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

impl std::str::FromStr for HighlightMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single_pass" | "single-pass" => Ok(Self::SinglePass),
            "sequential" => Ok(Self::Sequential),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        provider = ?config.summarization_provider,
        model = %config.summarization_model,
        upload_dir = %config.upload_dir.display(),
        highlight_mode = ?config.highlight_mode,
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
