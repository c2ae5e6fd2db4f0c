use log::debug;
use markdown_publish_config::GenerationSettings;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Responses shorter than this are treated as a failed generation rather
/// than usable content.
const MIN_RESPONSE_CHARS: usize = 20;

/// Blocking client for the generate-content endpoint.
pub struct TextClient {
    http: Client,
    settings: GenerationSettings,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: std::borrow::Cow<'a, str>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<OwnedPart>,
}

#[derive(Deserialize)]
struct OwnedPart {
    #[serde(default)]
    text: String,
}

impl TextClient {
    pub fn new(settings: GenerationSettings, api_key: String) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            settings,
            api_key,
        })
    }

    /// Generate text for `prompt` with the configured model.
    pub fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url, self.settings.model
        );
        let body = GenerateBody {
            contents: [Content {
                parts: [Part {
                    text: prompt.into(),
                }],
            }],
        };

        debug!("generating with model {} ({} prompt chars)", self.settings.model, prompt.len());
        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let generated = extract_text(&text)?;
        if generated.chars().count() < MIN_RESPONSE_CHARS {
            return Err(ClientError::SuspectResponse {
                length: generated.chars().count(),
            });
        }
        Ok(generated)
    }
}

fn extract_text(body: &str) -> Result<String, ClientError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;
    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::MalformedResponse("no candidates in response".into()))?;
    Ok(candidate
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect::<Vec<_>>()
        .join(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_wire_shape() {
        let body = GenerateBody {
            contents: [Content {
                parts: [Part {
                    text: "describe the subject".into(),
                }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"contents": [{"parts": [{"text": "describe the subject"}]}]})
        );
    }

    #[test]
    fn response_text_joins_candidate_parts() {
        let body = json!({
            "candidates": [{"content": {"parts": [
                {"text": "first half, "},
                {"text": "second half"}
            ]}}]
        })
        .to_string();
        assert_eq!(extract_text(&body).unwrap(), "first half, second half");
    }

    #[test]
    fn empty_candidates_are_malformed() {
        let body = json!({"candidates": []}).to_string();
        assert!(matches!(
            extract_text(&body),
            Err(ClientError::MalformedResponse(_))
        ));
    }
}
