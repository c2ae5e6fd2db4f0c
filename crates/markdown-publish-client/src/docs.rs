use log::{debug, info};
use markdown_publish_config::{Credentials, ServiceSettings};
use markdown_publish_core::{compile, OperationBatch};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";

/// A created or targeted remote document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentHandle {
    pub document_id: String,
    pub document_url: String,
}

/// Blocking client for the remote document service.
pub struct DocsClient {
    http: Client,
    settings: ServiceSettings,
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFileBody<'a> {
    name: &'a str,
    mime_type: &'a str,
    parents: [&'a str; 1],
}

#[derive(Deserialize)]
struct CreatedFile {
    id: String,
}

#[derive(Deserialize)]
struct Document {
    body: DocumentBody,
}

#[derive(Deserialize)]
struct DocumentBody {
    content: Vec<StructuralElement>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuralElement {
    end_index: Option<usize>,
}

#[derive(Serialize)]
struct BatchUpdateBody {
    requests: Vec<markdown_publish_core::DocRequest>,
}

impl DocsClient {
    pub fn new(settings: ServiceSettings, credentials: Credentials) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            settings,
            token: credentials.token,
        })
    }

    /// Create an empty document in the configured shared folder.
    pub fn create_document(&self, title: &str) -> Result<DocumentHandle, ClientError> {
        let url = format!(
            "{}/drive/v3/files?fields=id&supportsAllDrives=true",
            self.settings.drive_base_url
        );
        let body = CreateFileBody {
            name: title,
            mime_type: DOCUMENT_MIME_TYPE,
            parents: [self.settings.folder_id.as_str()],
        };

        debug!("creating document {title:?} in folder {}", self.settings.folder_id);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()?;
        let created: CreatedFile = parse_json(check_status(response)?)?;

        info!("created document {}", created.id);
        Ok(DocumentHandle {
            document_url: document_url(&created.id),
            document_id: created.id,
        })
    }

    /// Current end-of-content offset of the document, excluding the trailing
    /// newline every document carries. This is the start offset for appends.
    pub fn end_offset(&self, document_id: &str) -> Result<usize, ClientError> {
        let url = format!("{}/v1/documents/{document_id}", self.settings.docs_base_url);
        let response = self.http.get(url).bearer_auth(&self.token).send()?;
        let document: Document = parse_json(check_status(response)?)?;
        end_offset_of(&document)
    }

    /// Submit a compiled batch. Empty batches are not sent.
    pub fn submit(&self, document_id: &str, batch: &OperationBatch) -> Result<(), ClientError> {
        if batch.is_empty() {
            debug!("skipping empty batch for {document_id}");
            return Ok(());
        }

        let url = format!(
            "{}/v1/documents/{document_id}:batchUpdate",
            self.settings.docs_base_url
        );
        let body = BatchUpdateBody {
            requests: batch.to_requests(),
        };

        debug!(
            "submitting {} inserts and {} style ops to {document_id}",
            batch.inserts.len(),
            batch.styles.len()
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()?;
        check_status(response)?;
        Ok(())
    }

    /// Create a document and fill it with compiled markdown.
    pub fn publish(&self, title: &str, markdown: &str) -> Result<DocumentHandle, ClientError> {
        let handle = self.create_document(title)?;
        let batch = compile(markdown, 1);
        self.submit(&handle.document_id, &batch)?;
        Ok(handle)
    }

    /// Append compiled markdown after the document's current content.
    pub fn append_markdown(&self, document_id: &str, markdown: &str) -> Result<(), ClientError> {
        let start = self.end_offset(document_id)?;
        let batch = compile(markdown, start);
        self.submit(document_id, &batch)
    }
}

fn document_url(document_id: &str) -> String {
    format!("https://docs.google.com/document/d/{document_id}/edit")
}

/// The last structural element's end index points one past the trailing
/// newline; content ends one before it.
fn end_offset_of(document: &Document) -> Result<usize, ClientError> {
    let end_index = document
        .body
        .content
        .last()
        .and_then(|element| element.end_index)
        .ok_or_else(|| ClientError::MalformedResponse("document body has no content".into()))?;
    Ok(end_index.saturating_sub(1).max(1))
}

fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ClientError::Rejected {
        status: status.as_u16(),
        body,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let text = response.text()?;
    serde_json::from_str(&text).map_err(|err| ClientError::MalformedResponse(err.to_string()))
}
