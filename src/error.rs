pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Extraction error at {url}: {source}")]
    Extraction {
        url: String,
        #[source]
        source: ExtractError,
    },

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn extraction(url: impl Into<String>, source: ExtractError) -> Self {
        Error::Extraction {
            url: url.into(),
            source,
        }
    }
}

/// Failure to pull a value out of a parsed page.
///
/// `Missing` is the expected-absence case; optional fields turn it into `None`.
/// The other variants mean the page does not look like what the extractor expects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("field `{field}` is missing")]
    Missing { field: &'static str },

    #[error("field `{field}` is malformed: {reason}")]
    Malformed { field: &'static str, reason: String },

    #[error("invalid selector `{selector}`: {reason}")]
    Selector {
        selector: &'static str,
        reason: String,
    },
}

impl ExtractError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        ExtractError::Malformed {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ExtractError::Missing { .. })
    }
}

pub trait OptionalField<T> {
    /// Maps an expected absence to `None`, keeping every other failure.
    fn optional(self) -> std::result::Result<Option<T>, ExtractError>;
}

impl<T> OptionalField<T> for std::result::Result<T, ExtractError> {
    fn optional(self) -> std::result::Result<Option<T>, ExtractError> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_missing() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
