//! Process configuration
//!
//! Read from the environment once at startup and passed by reference from
//! there; the defaults target a local Ollama endpoint.

const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
const DEFAULT_API_KEY: &str = "ollama";
const DEFAULT_MODEL: &str = "llama3.2";
const DEFAULT_PORT: u16 = 7860;

/// Provider endpoint and server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY")
                .unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
            model: std::env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: std::env::var("SHOPFRONT_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            model: DEFAULT_MODEL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
