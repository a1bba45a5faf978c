use crate::validate::ValidationErrors;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    SqlxError(sqlx::Error),

    /// A write collided with an existing row on a UNIQUE column.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("validation failed: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("{0}")]
    RowguardError(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SqlxError(sqlx::Error::RowNotFound))
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::ValidationError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => Error::UniqueViolation(db.message().to_string()),
            e => Error::SqlxError(e),
        }
    }
}
