//! Handler-level errors: client failures wrapped with the resource identity
//! and operation they occurred in.

use crate::tmc::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A schema field was absent or had the wrong shape.
    #[error("unable to read {field}: expected {expected}")]
    Field { field: String, expected: &'static str },

    /// Local validation failed before any network call.
    #[error("{0}")]
    Validation(String),

    /// A client call failed, annotated with resource-identifying context.
    #[error("unable to {operation} {resource} entry, name: {name}")]
    Api {
        resource: &'static str,
        operation: &'static str,
        name: String,
        #[source]
        source: ClientError,
    },
}

impl ProviderError {
    pub fn field(field: impl Into<String>, expected: &'static str) -> Self {
        Self::Field { field: field.into(), expected }
    }

    pub fn api(
        resource: &'static str,
        operation: &'static str,
        name: impl Into<String>,
    ) -> impl FnOnce(ClientError) -> Self {
        let name = name.into();
        move |source| Self::Api { resource, operation, name, source }
    }

    /// True when the underlying cause is a not-found response.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProviderError::Api { source, .. } if source.is_not_found()
        )
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
