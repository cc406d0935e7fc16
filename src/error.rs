use thiserror::Error;

/// Erreurs principales de fm-actions.
#[derive(Debug, Error)]
pub enum FmError {
    #[error("Erreur I/O : {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur de parsing : {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Erreur du provider « {0} » : {1}")]
    Provider(String, String),

    #[error("Préférences invalides : {0}")]
    Settings(String),

    #[error("Élément introuvable : {0}")]
    ItemNotFound(String),

    #[error("Le provider « {0} » n'accepte pas les écritures")]
    ProviderNotWilling(String),

    #[error("Élément en lecture seule : {0}")]
    ItemReadOnly(String),

    #[error("{0}")]
    Other(String),
}

/// Alias pratique pour Result avec FmError.
pub type Result<T> = std::result::Result<T, FmError>;
