use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    TaskNotFound,
    PolicyNotFound,
    AmbiguousRef,
    NotSignedIn,
    DeleteInProgress,
    PolicyNumberConflict,
    ValidationError,
    ConfigError,
    DatabaseError,
    IoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::PolicyNotFound => "POLICY_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::NotSignedIn => "NOT_SIGNED_IN",
            Self::DeleteInProgress => "DELETE_IN_PROGRESS",
            Self::PolicyNumberConflict => "POLICY_NUMBER_CONFLICT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::IoError => "IO_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct AgencyError {
    pub code: ErrorCode,
    pub message: String,
}

impl AgencyError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "agencydesk is not initialized. Run `agencydesk init` first.",
        )
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {reference}"))
    }

    pub fn policy_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::PolicyNotFound,
            format!("Policy not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn not_signed_in() -> Self {
        Self::new(
            ErrorCode::NotSignedIn,
            "Nobody is signed in. Use `agencydesk login <user>` first.",
        )
    }

    pub fn delete_in_progress(id: &str) -> Self {
        Self::new(
            ErrorCode::DeleteInProgress,
            format!("A delete is already in progress (requested: {id})"),
        )
    }

    pub fn policy_number_conflict(number: &str) -> Self {
        Self::new(
            ErrorCode::PolicyNumberConflict,
            format!("Policy with number '{number}' already exists"),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl From<rusqlite::Error> for AgencyError {
    fn from(e: rusqlite::Error) -> Self {
        Self::database(e.to_string())
    }
}

impl From<std::io::Error> for AgencyError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorCode::IoError, e.to_string())
    }
}
