use thiserror::Error;

/// Why a generation call did not produce an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationFailure {
    Failed,
    Timeout,
}

impl std::fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed => write!(f, "failed"),
            Self::Timeout => write!(f, "timed out"),
        }
    }
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Load error: {source_name} - {message}")]
    Load {
        source_name: String,
        message: String,
    },

    #[error("Embedding unavailable: {message}")]
    EmbeddingUnavailable { message: String },

    #[error("Index empty: {message}")]
    IndexEmpty { message: String },

    #[error("Generation {kind}: {message}")]
    Generation {
        kind: GenerationFailure,
        message: String,
    },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn load(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn embedding_unavailable(message: impl Into<String>) -> Self {
        Self::EmbeddingUnavailable {
            message: message.into(),
        }
    }

    pub fn index_empty(message: impl Into<String>) -> Self {
        Self::IndexEmpty {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            kind: GenerationFailure::Failed,
            message: message.into(),
        }
    }

    pub fn generation_timeout(message: impl Into<String>) -> Self {
        Self::Generation {
            kind: GenerationFailure::Timeout,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True when the index has never been built or holds no entries
    pub fn is_index_empty(&self) -> bool {
        matches!(self, Self::IndexEmpty { .. })
    }

    pub fn is_generation_timeout(&self) -> bool {
        matches!(
            self,
            Self::Generation {
                kind: GenerationFailure::Timeout,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error() {
        let error = DomainError::load("FAQ.txt", "file not found");
        assert_eq!(error.to_string(), "Load error: FAQ.txt - file not found");
    }

    #[test]
    fn test_generation_timeout_error() {
        let error = DomainError::generation_timeout("no reply after 30s");
        assert_eq!(error.to_string(), "Generation timed out: no reply after 30s");
        assert!(error.is_generation_timeout());
        assert!(!DomainError::generation("boom").is_generation_timeout());
    }

    #[test]
    fn test_index_empty_predicate() {
        assert!(DomainError::index_empty("never built").is_index_empty());
        assert!(!DomainError::validation("bad").is_index_empty());
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }
}
