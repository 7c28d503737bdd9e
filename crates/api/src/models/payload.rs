use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identity token for a payload shape.
///
/// Two payload types are the same type iff their fully-qualified names are
/// equal. The name may use `.` (JVM style) or `::` (Rust style) separators and
/// may carry generic arguments, e.g. `com.example.Envelope<com.example.Foo>`.
///
/// Names are stored in canonical spelling: no whitespace around `<` and `>`,
/// and `", "` between generic arguments. `a.Pair<a.A,a.B>` and
/// `a.Pair< a.A , a.B >` are the same payload type.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema)]
#[serde(transparent)]
pub struct PayloadType(String);

impl PayloadType {
    pub fn new(fqn: impl AsRef<str>) -> Self {
        Self(canonical_spelling(fqn.as_ref()))
    }

    /// Payload identity of a Rust type, as reported by `std::any::type_name`.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    pub fn fqn(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PayloadType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Whitespace next to `<`, `>` or `,` is dropped, other runs collapse to one
/// space, and every `,` is followed by exactly one space.
fn canonical_spelling(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        match c {
            '<' | '>' => out.push(c),
            ',' => out.push_str(", "),
            _ => {
                if pending_space && !out.is_empty() && !out.ends_with([' ', '<']) {
                    out.push(' ');
                }
                out.push(c);
            }
        }
        pending_space = false;
    }
    out
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PayloadType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PayloadType {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for PayloadType {
    fn as_ref(&self) -> &str {
        self.fqn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LocalDto;

    #[test]
    fn test_identity_is_fqn_equality() {
        assert_eq!(PayloadType::new("a.b.Foo"), PayloadType::from("a.b.Foo"));
        assert_ne!(PayloadType::new("a.b.Foo"), PayloadType::new("a.c.Foo"));
    }

    #[test]
    fn test_of_uses_type_name() {
        let payload = PayloadType::of::<LocalDto>();
        assert!(payload.fqn().ends_with("::LocalDto"));
        assert_eq!(payload, PayloadType::of::<LocalDto>());
    }

    #[test]
    fn test_generic_spelling_is_canonical() {
        let canonical = PayloadType::new("x.Pair<a.A, a.B>");
        assert_eq!(PayloadType::new("x.Pair<a.A,a.B>"), canonical);
        assert_eq!(PayloadType::new(" x.Pair < a.A ,a.B > "), canonical);
        assert_eq!(canonical.fqn(), "x.Pair<a.A, a.B>");

        assert_eq!(
            PayloadType::new("Map<String,List< a.B >>").fqn(),
            "Map<String, List<a.B>>"
        );
        assert_eq!(PayloadType::new("dyn  a::Trait").fqn(), "dyn a::Trait");
    }

    #[test]
    fn test_deserialized_names_are_canonical() {
        let payload: PayloadType = serde_json::from_str("\"x.Pair<a.A,a.B>\"").unwrap();
        assert_eq!(payload, PayloadType::new("x.Pair<a.A, a.B>"));
        assert_eq!(serde_json::to_string(&payload).unwrap(), "\"x.Pair<a.A, a.B>\"");
    }
}
