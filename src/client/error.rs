#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with the error envelope.
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
    /// The server answered with something that is not an envelope.
    #[error("unexpected response with status {status}")]
    Unexpected { status: u16 },
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Text shown to the user. Server messages are shown verbatim, everything
    /// else falls back to the operation's generic failure text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ClientError::Api {
            status: 400,
            message: "Title is required and cannot be empty".to_string(),
        };
        assert_eq!(
            err.user_message("Failed to create todo"),
            "Title is required and cannot be empty"
        );
    }

    #[test]
    fn unexpected_responses_use_fallback() {
        let err = ClientError::Unexpected { status: 502 };
        assert_eq!(err.user_message("Failed to fetch todos"), "Failed to fetch todos");
    }
}
