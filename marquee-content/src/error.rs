use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    StatusError { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("GraphQL error: {0}")]
    GraphQlError(String),

    #[error("Response is missing `{0}`")]
    MissingData(&'static str),

    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;
