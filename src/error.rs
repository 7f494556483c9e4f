//! Error types and handling for `MeteoBot`

use thiserror::Error;

/// Main error type for the `MeteoBot` application
#[derive(Error, Debug)]
pub enum MeteoBotError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IPMA open-data fetch or parse errors
    #[error("Upstream data error: {message}")]
    Upstream { message: String },

    /// Narrative backend (language model) errors
    #[error("Narrative backend error: {message}")]
    Narrative { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl MeteoBotError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream data error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new narrative backend error
    pub fn narrative<S: Into<String>>(message: S) -> Self {
        Self::Narrative {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly message, in the reply language of the assistant
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            MeteoBotError::Config { .. } => {
                "Erro de configuração. Verifica o ficheiro de configuração.".to_string()
            }
            MeteoBotError::Upstream { .. } => {
                "De momento não consigo obter dados meteorológicos. Tenta novamente mais tarde."
                    .to_string()
            }
            MeteoBotError::Narrative { .. } => {
                "De momento não consigo gerar uma resposta. Tenta novamente mais tarde."
                    .to_string()
            }
            MeteoBotError::Validation { message } => {
                format!("Pedido inválido: {message}")
            }
            MeteoBotError::Io { .. } => {
                "Falha numa operação de ficheiros. Verifica as permissões.".to_string()
            }
        }
    }
}
