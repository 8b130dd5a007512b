use thiserror::Error;

#[derive(Debug, Error)]
pub enum BeleggingsMatchError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Report error: {0}")]
    Report(String),
}

impl From<BeleggingsMatchError> for String {
    fn from(err: BeleggingsMatchError) -> Self {
        err.to_string()
    }
}
