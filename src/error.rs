use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    /// The search endpoint answered with a status outside the 2xx range.
    Transport { status: u16, body: String },
    /// The endpoint answered 2xx but the body could not be parsed.
    MalformedResponse(String),
    Serialize(String),
    Deserialize(String),
    /// The exchange never produced a status (connect, DNS, TLS, timeout...).
    Request(String),
    Config(String),
}

impl Error {
    /// Status code carried by a [`Error::Transport`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Transport { status, body } if body.is_empty() => {
                write!(f, "Search endpoint returned status {}", status)
            }
            Error::Transport { status, body } => {
                write!(f, "Search endpoint returned status {}: {}", status, body)
            }
            Error::MalformedResponse(err) => write!(f, "Malformed response body: {}", err),
            Error::Serialize(err) => write!(f, "Serialization error: {}", err),
            Error::Deserialize(err) => write!(f, "Deserialization error: {}", err),
            Error::Request(err) => write!(f, "Request error: {}", err),
            Error::Config(err) => write!(f, "Configuration error: {}", err),
        }
    }
}

impl std::error::Error for Error {}
