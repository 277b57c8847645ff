use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Databasfel: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO-fel: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialiseringsfel: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Valideringsfel: {0}")]
    Validation(String),

    #[error("Hittades inte: {0}")]
    NotFound(String),

    #[error("Inte inloggad: åtgärden kräver en inloggad användare")]
    NotAuthenticated,

    #[error("Lagringsfel: {0}")]
    Storage(String),

    #[error("Molnfel: {0}")]
    Remote(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Fel som bara gäller just detta anrop (appen ska fortsätta fungera)
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Validation(_) | Self::NotAuthenticated)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<AppError>() {
            Ok(app_err) => return app_err,
            Err(other) => other,
        };

        match err.downcast::<rusqlite::Error>() {
            Ok(db_err) => Self::Database(db_err),
            Err(other) => Self::Remote(format!("{:#}", other)),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anyhow_conversion_keeps_database_errors() {
        let err: AppError = anyhow::Error::from(rusqlite::Error::QueryReturnedNoRows).into();
        assert!(matches!(err, AppError::Database(_)));

        let err: AppError = anyhow::anyhow!("timeout").into();
        assert!(matches!(err, AppError::Remote(ref msg) if msg == "timeout"));
    }

    #[test]
    fn test_anyhow_conversion_keeps_app_errors() {
        let err: AppError = anyhow::Error::from(AppError::not_found("Anteckning n1")).into();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Anteckning n1"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(!AppError::NotAuthenticated.is_transient());
        assert!(!AppError::validation("titel saknas").is_transient());
        assert!(AppError::storage("quota").is_transient());
    }
}
