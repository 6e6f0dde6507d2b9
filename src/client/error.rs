use derive_more::Display;

#[derive(Debug, Display)]
pub enum ClientError {
    #[display("Invalid base URL: {_0}")]
    InvalidUrl(String),

    #[display("Request failed: {_0}")]
    Transport(String),

    #[display("{message}")]
    Api { status: u16, message: String },

    #[display("Unexpected response: {_0}")]
    Decode(String),
}

impl std::error::Error for ClientError {}

impl ClientError {
    /// The text a view should show: the server's own message when it sent
    /// one, `fallback` for transport and decoding failures.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}
