use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service rejected the call. The body is carried verbatim so the
    /// caller sees exactly what the service said.
    #[error("service rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed service response: {0}")]
    MalformedResponse(String),

    /// The generated text was too short to be a real answer.
    #[error("generated text suspiciously short ({length} chars)")]
    SuspectResponse { length: usize },
}
