//! Configuration loader for the markdown-publish toolkit.
//!
//! Settings resolve from an explicit override path, then a
//! `.markdown-publish.toml` in the working directory, then built-in
//! defaults. Raw TOML is normalised into typed structures so downstream
//! crates never touch the file format.

mod credentials;

pub use credentials::{resolve_api_key, resolve_service_token, Credentials};

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".markdown-publish.toml";

/// Destination folder used when none is configured. Service accounts have no
/// drive space of their own, so new documents must land in a shared folder.
const DEFAULT_FOLDER_ID: &str = "0AIKRNYJ7JQZnUk9PVA";

const DEFAULT_DOCS_BASE_URL: &str = "https://docs.googleapis.com";
const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com";
const DEFAULT_TEXT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "credentials not found: set {env_var} or place a credentials.json \
         next to the configuration file"
    )]
    MissingCredentials { env_var: &'static str },

    #[error("invalid credentials file {path}: {reason}")]
    InvalidCredentials { path: PathBuf, reason: String },
}

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub service: ServiceSettings,
    pub generation: GenerationSettings,
    pub pipeline: PipelineSettings,
    /// Directory the configuration was resolved against; credential files
    /// are looked up here.
    pub base_dir: PathBuf,
}

/// Endpoints and destination for the remote document service.
#[derive(Clone, Debug)]
pub struct ServiceSettings {
    pub docs_base_url: String,
    pub drive_base_url: String,
    pub folder_id: String,
}

/// Generative text service settings.
#[derive(Clone, Debug)]
pub struct GenerationSettings {
    pub base_url: String,
    pub model: String,
}

/// File layout for the profile-generation pipeline.
#[derive(Clone, Debug)]
pub struct PipelineSettings {
    pub prompt_dir: PathBuf,
    pub data_dir: PathBuf,
    /// Number of sectioned prompts after the master extraction prompt.
    pub section_count: u32,
}

/// Where to look for the configuration file.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    working_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }
}

impl Config {
    /// Resolve configuration: override path, then working directory, then
    /// defaults. A missing file is not an error; a malformed one is.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = match options.working_dir {
            Some(dir) => dir,
            None => env::current_dir().map_err(|source| ConfigError::Io {
                path: PathBuf::from("."),
                source,
            })?,
        };

        let candidate = options
            .config_path
            .unwrap_or_else(|| working_dir.join(CONFIG_FILE_NAME));

        let raw = if candidate.is_file() {
            let contents = fs::read_to_string(&candidate).map_err(|source| ConfigError::Io {
                path: candidate.clone(),
                source,
            })?;
            toml::from_str::<RawConfig>(&contents).map_err(|source| ConfigError::Parse {
                path: candidate.clone(),
                source,
            })?
        } else {
            RawConfig::default()
        };

        Ok(raw.normalise(working_dir))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    service: Option<RawService>,
    generation: Option<RawGeneration>,
    pipeline: Option<RawPipeline>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawService {
    docs_base_url: Option<String>,
    drive_base_url: Option<String>,
    folder_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGeneration {
    base_url: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPipeline {
    prompt_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    section_count: Option<u32>,
}

impl RawConfig {
    fn normalise(self, base_dir: PathBuf) -> Config {
        let service = self.service.unwrap_or_default();
        let generation = self.generation.unwrap_or_default();
        let pipeline = self.pipeline.unwrap_or_default();

        let resolve = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        Config {
            service: ServiceSettings {
                docs_base_url: service
                    .docs_base_url
                    .unwrap_or_else(|| DEFAULT_DOCS_BASE_URL.to_string()),
                drive_base_url: service
                    .drive_base_url
                    .unwrap_or_else(|| DEFAULT_DRIVE_BASE_URL.to_string()),
                folder_id: service
                    .folder_id
                    .unwrap_or_else(|| DEFAULT_FOLDER_ID.to_string()),
            },
            generation: GenerationSettings {
                base_url: generation
                    .base_url
                    .unwrap_or_else(|| DEFAULT_TEXT_BASE_URL.to_string()),
                model: generation.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
            pipeline: PipelineSettings {
                prompt_dir: resolve(
                    pipeline.prompt_dir.unwrap_or_else(|| PathBuf::from("prompts")),
                ),
                data_dir: resolve(pipeline.data_dir.unwrap_or_else(|| PathBuf::from("data"))),
                section_count: pipeline.section_count.unwrap_or(14),
            },
            base_dir,
        }
    }
}
