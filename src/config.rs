use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SampleError};
use crate::features::LanguageMap;

pub const DEFAULT_CONFIG_PATH: &str = "sample.toml";

#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub token: Option<String>,
    pub sample_size: usize,
    /// Exclusive upper bound for the random `since` offset.
    pub max_offset: u64,
    /// 0 disables the bound.
    pub max_attempts_per_row: u64,
    pub output: PathBuf,
    pub incremental: bool,
    pub api_base: String,
    pub user_agent: String,
    /// Column order of the one-hot language encoding.
    pub languages: Vec<String>,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            sample_size: 120,
            max_offset: 8_000_000,
            max_attempts_per_row: 1000,
            output: PathBuf::from("data/github_data_update.csv"),
            incremental: false,
            api_base: "https://api.github.com".to_string(),
            user_agent: "github_sample".to_string(),
            languages: LanguageMap::default().names().to_vec(),
            seed: None,
        }
    }
}

impl Config {
    /// Load a config file. When `path` is `None` the default file is used if
    /// present, otherwise built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.is_file() {
                    Self::from_toml(&fs::read_to_string(default)?)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str::<Config>(contents)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(SampleError::Config("sample_size must be positive".into()));
        }
        if self.max_offset == 0 {
            return Err(SampleError::Config("max_offset must be positive".into()));
        }
        self.language_map()?;
        Ok(())
    }

    pub fn language_map(&self) -> Result<LanguageMap> {
        LanguageMap::new(self.languages.clone())
    }
}
