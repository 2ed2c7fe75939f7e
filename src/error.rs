//! Application error type.
//!
//! Every failure in a run is fatal: the binary prints the message and exits
//! with the code attached to the error's kind.

/// Broad classification of what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A date string (CLI input or source payload) could not be parsed.
    InvalidDate,
    /// Connection, DNS or TLS failure, or a non-success HTTP status.
    Network,
    /// The response body was not the JSON shape we expected.
    MalformedJson,
    /// A required field is absent from an otherwise valid payload.
    MissingField,
    /// Writing to the terminal failed.
    Output,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidDate => 2,
            ErrorKind::Network => 3,
            ErrorKind::MalformedJson | ErrorKind::MissingField => 4,
            ErrorKind::Output => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDate, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedJson, message)
    }

    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingField, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Output, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
