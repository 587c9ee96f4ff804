use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Request failed with status code {status}")]
    UpstreamStatus { status: u16 },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Unrecognized response shape: {0}")]
    UnrecognizedShape(String),
}

impl From<reqwest::Error> for PromptError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => PromptError::UpstreamStatus {
                status: status.as_u16(),
            },
            None => PromptError::HttpError(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for PromptError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() {
            PromptError::UnrecognizedShape(e.to_string())
        } else {
            PromptError::MalformedBody(e.to_string())
        }
    }
}
