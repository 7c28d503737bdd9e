//! Capability traits implemented by protocol plugins and discovery collaborators.

pub mod cap;
pub mod model;
pub mod naming;
pub mod typing;

pub use cap::*;
pub use model::{MarkerInstance, MarkerKind, MethodSignature, Parameter};
pub use naming::{NamingConvention, PathConvention};
pub use typing::{TypeParseError, TypeRef};

/// Error type for plugin and collaborator operations
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Peel known envelope types off a declared parameter type.
/// `envelopes` lists `(name, arity, index of the payload argument)`; peeling
/// repeats until the type matches no envelope.
pub fn unwrap_envelopes<'a>(ty: &'a TypeRef, envelopes: &[(&str, usize, usize)]) -> &'a TypeRef {
    let mut current = ty;
    loop {
        let inner = envelopes
            .iter()
            .find(|(name, arity, _)| current.is_envelope(name, *arity))
            .and_then(|&(_, _, index)| current.generics().get(index));
        match inner {
            Some(inner) => current = inner,
            None => return current,
        }
    }
}
