use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unsupported redirect type: {0} (expected 301 or 302)")]
    InvalidRedirectType(u16),

    #[error("Invalid redirect rule: {0}")]
    InvalidRedirectRule(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
