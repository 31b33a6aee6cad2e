use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File read error: {0}")]
    FileRead(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn file_read(msg: impl Into<String>) -> Self {
        Self::FileRead(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn missing_credential(msg: impl Into<String>) -> Self {
        Self::MissingCredential(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::Provider(_) | Self::MissingCredential(_))
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_counts_as_provider_error() {
        let err = DomainError::missing_credential("OPENAI_API_KEY is not set");
        assert!(err.is_provider_error());
        assert!(!err.is_transport_error());
        assert_eq!(
            err.to_string(),
            "Missing credential: OPENAI_API_KEY is not set"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DomainError = io.into();
        assert!(matches!(err, DomainError::IoError(_)));
    }
}
