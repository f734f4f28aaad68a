use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} '{id}' already exists")]
    DuplicateKey { entity: &'static str, id: String },

    #[error("{field} references {entity} '{id}', which does not exist")]
    InvalidReference {
        entity: &'static str,
        field: &'static str,
        id: String,
    },

    #[error("validation failed: {0}")]
    Validation(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
