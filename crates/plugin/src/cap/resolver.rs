use crate::BoxError;

/// Resolves placeholders in declared values before they reach the document.
pub trait ValueResolver: Send + Sync {
    fn resolve(&self, value: &str) -> Result<String, BoxError>;
}

/// Returns every value unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityResolver;

impl ValueResolver for IdentityResolver {
    fn resolve(&self, value: &str) -> Result<String, BoxError> {
        Ok(value.to_string())
    }
}
