/// failure of a single remote call. the lifecycle treats every variant as
/// "call failed"; the variants are kept apart for the logs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CallFailure {
    #[error("transport failure calling {url}: {message}")]
    Transport { url: String, message: String },
    #[error("{url} responded with status {status}: {body}")]
    Application {
        url: String,
        status: u16,
        body: String,
    },
    #[error("unexpected response from {url}: {message}")]
    UnexpectedResponse { url: String, message: String },
}

impl CallFailure {
    pub fn transport(url: &str, error: reqwest::Error) -> CallFailure {
        CallFailure::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, CallFailure::Transport { .. })
    }
}
