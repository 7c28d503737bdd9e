use crate::typing::TypeRef;
use std::fmt::Debug;

/// Defines how payload identities are turned into schema names.
/// The schema registry asks for the short name first and falls back to the
/// qualified names, in order, when the short name is owned by another type.
pub trait NamingConvention: Send + Sync + Debug {
    /// Path segments of the type's base name, outermost first.
    fn segments(&self, ty: &TypeRef) -> Vec<String>;

    /// Default schema name: the last segment, followed by the short names of
    /// the generic arguments (`Envelope<a.Foo>` → `Envelope_Foo`).
    fn short_name(&self, ty: &TypeRef) -> String {
        let segments = self.segments(ty);
        let base = segments
            .last()
            .cloned()
            .unwrap_or_else(|| ty.name().to_string());
        sanitize(&format!("{}{}", base, self.generic_suffix(ty)))
    }

    /// Progressively qualified names, one more enclosing segment each time.
    ///
    /// # Returns
    /// `["dto.Foo", "example.dto.Foo", "com.example.dto.Foo"]` for
    /// `com.example.dto.Foo`; empty for a single-segment name.
    fn qualified_names(&self, ty: &TypeRef) -> Vec<String> {
        let segments = self.segments(ty);
        let suffix = self.generic_suffix(ty);
        (2..=segments.len())
            .map(|k| {
                let joined = segments[segments.len() - k..].join(".");
                sanitize(&format!("{joined}{suffix}"))
            })
            .collect()
    }

    fn generic_suffix(&self, ty: &TypeRef) -> String {
        ty.generics()
            .iter()
            .map(|g| format!("_{}", self.short_name(g)))
            .collect()
    }
}

/// Splits on `.`, `::` and `$`, so JVM and Rust identities share one registry.
#[derive(Debug, Default)]
pub struct PathConvention;

impl NamingConvention for PathConvention {
    fn segments(&self, ty: &TypeRef) -> Vec<String> {
        ty.name()
            .split(['.', ':', '$'])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Schema names may only use `[A-Za-z0-9._-]`.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
