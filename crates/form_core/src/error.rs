use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("property index {index} is out of range for {len} properties")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("there is no generated output to minify")]
    NothingToMinify,
    #[error("current output is not valid JSON: {0}")]
    InvalidOutput(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("lookup rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("lookup transport failure: {0}")]
    Transport(String),
}

impl FetchError {
    /// Server-provided message, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FetchError::Rejected { message, .. } => message.as_deref(),
            FetchError::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        FetchError::Transport(value.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(value: url::ParseError) -> Self {
        FetchError::Transport(format!("invalid server url: {value}"))
    }
}
