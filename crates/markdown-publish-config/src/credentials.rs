//! Credential resolution for the two external services.
//!
//! Precedence mirrors deployment reality: an environment variable wins so
//! hosted runs never need files on disk, with a `credentials.json` beside
//! the configuration as the local-development fallback.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

const SERVICE_TOKEN_ENV: &str = "MARKDOWN_PUBLISH_TOKEN";
const API_KEY_ENV: &str = "GEMINI_API_KEY";
const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Bearer token for the document service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    token: String,
}

/// Resolve the document-service token: `MARKDOWN_PUBLISH_TOKEN`, then a
/// `credentials.json` in `base_dir`.
pub fn resolve_service_token(base_dir: &Path) -> Result<Credentials, ConfigError> {
    if let Ok(token) = env::var(SERVICE_TOKEN_ENV) {
        if !token.trim().is_empty() {
            return Ok(Credentials { token });
        }
    }

    let path = base_dir.join(CREDENTIALS_FILE_NAME);
    if path.is_file() {
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let parsed: CredentialsFile =
            serde_json::from_str(&contents).map_err(|err| ConfigError::InvalidCredentials {
                path: path.clone(),
                reason: err.to_string(),
            })?;
        if parsed.token.trim().is_empty() {
            return Err(ConfigError::InvalidCredentials {
                path,
                reason: "empty token".to_string(),
            });
        }
        return Ok(Credentials {
            token: parsed.token,
        });
    }

    Err(ConfigError::MissingCredentials {
        env_var: SERVICE_TOKEN_ENV,
    })
}

/// Resolve the generative text service API key from `GEMINI_API_KEY`.
pub fn resolve_api_key() -> Result<String, ConfigError> {
    match env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingCredentials {
            env_var: API_KEY_ENV,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn file_fallback_parses_token() {
        let temp = TempDir::new().expect("tempdir");
        let mut file =
            fs::File::create(temp.path().join(CREDENTIALS_FILE_NAME)).expect("create file");
        file.write_all(br#"{"token": "abc123"}"#).expect("write");

        // Only exercised when the env var is absent; tests must not set it.
        if env::var(SERVICE_TOKEN_ENV).is_ok() {
            return;
        }
        let creds = resolve_service_token(temp.path()).expect("resolve");
        assert_eq!(creds.token, "abc123");
    }

    #[test]
    fn missing_everything_is_a_descriptive_error() {
        if env::var(SERVICE_TOKEN_ENV).is_ok() {
            return;
        }
        let temp = TempDir::new().expect("tempdir");
        let err = resolve_service_token(temp.path()).expect_err("no credentials");
        assert!(err.to_string().contains(SERVICE_TOKEN_ENV));
    }

    #[test]
    fn malformed_file_is_rejected() {
        if env::var(SERVICE_TOKEN_ENV).is_ok() {
            return;
        }
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join(CREDENTIALS_FILE_NAME), "not json").expect("write");
        let err = resolve_service_token(temp.path()).expect_err("bad file");
        assert!(matches!(err, ConfigError::InvalidCredentials { .. }));
    }
}
