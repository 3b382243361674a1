use thiserror::Error;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GitHub API error: {status} - {message}")]
    GitHubApi { status: u16, message: String },

    #[error("invalid creation date: {value:?}")]
    InvalidDate { value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no valid repository found for row {row} after {attempts} attempts")]
    SamplingExhausted { row: usize, attempts: u64 },

    #[error("table already holds {capacity} rows")]
    TableFull { capacity: usize },
}

pub type Result<T> = std::result::Result<T, SampleError>;
