mod app_config;
mod config;
mod vocabulary;

pub use app_config::{AppConfig, CipherLevel, Credentials, Environment, TlsMinVersion};
pub use config::load_app_config;
pub use vocabulary::{load_vocabulary, PrefixVocabulary};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read prefix vocabulary {path}: {source}")]
    VocabularyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse prefix vocabulary: {0}")]
    VocabularyFileParse(#[from] serde_yaml::Error),

    #[error("invalid prefix vocabulary: {0}")]
    Validation(String),
}
