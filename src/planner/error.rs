use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    /// Deployment problem; generation must not proceed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Caller input the boundary layer reports back verbatim.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}

impl PlanError {
    pub fn missing_tenant() -> Self {
        PlanError::Configuration("a restaurant is required to generate a plan".into())
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        PlanError::Validation {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("dish '{name}' already exists in this scope")]
    Duplicate { name: String },
}
