use crate::BoxError;
use crate::model::{MarkerKind, MarkerInstance, MethodSignature};
use std::sync::Arc;

/// A type or module that may declare message consumers.
pub trait CandidateUnit: Send + Sync {
    /// Unit name (for diagnostics), e.g. `com.example.OrderListener`.
    fn name(&self) -> &str;

    /// Methods carrying a marker of `kind`, in declaration order.
    fn methods_with_marker(&self, kind: &MarkerKind) -> Vec<(MarkerInstance, MethodSignature)>;
}

/// Component enumerator - knows where candidate units come from
/// (a static manifest, a registration table, generated code).
pub trait ComponentEnumerator: Send + Sync {
    /// Order is not guaranteed; scanners must not rely on it.
    fn enumerate(&self) -> Result<Vec<Arc<dyn CandidateUnit>>, BoxError>;

    /// Enumerator name (for logging/debugging)
    fn name(&self) -> &str;
}
