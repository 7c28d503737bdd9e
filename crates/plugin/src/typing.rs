use chanscope_api::PayloadType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared type: a fully-qualified base name plus generic arguments.
///
/// Manifests write these as strings, e.g.
/// `org.apache.kafka.clients.consumer.ConsumerRecord<java.lang.String, com.example.Foo>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    name: String,
    generics: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParseError {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse type '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for TypeParseError {}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generics: Vec::new(),
        }
    }

    pub fn with_generics(mut self, generics: Vec<TypeRef>) -> Self {
        self.generics = generics;
        self
    }

    pub fn parse(input: &str) -> Result<Self, TypeParseError> {
        let err = |reason| TypeParseError {
            input: input.to_string(),
            reason,
        };
        let (ty, rest) = Self::parse_prefix(input).map_err(err)?;
        if !rest.trim().is_empty() {
            return Err(err("unexpected characters after type"));
        }
        Ok(ty)
    }

    fn parse_prefix(s: &str) -> Result<(TypeRef, &str), &'static str> {
        let s = s.trim_start();
        let end = s.find(['<', '>', ',']).unwrap_or(s.len());
        let name = s[..end].trim();
        if name.is_empty() {
            return Err("empty type name");
        }

        let mut rest = &s[end..];
        let mut generics = Vec::new();
        if let Some(after) = rest.strip_prefix('<') {
            rest = after;
            loop {
                let (arg, after_arg) = Self::parse_prefix(rest)?;
                generics.push(arg);
                let after_arg = after_arg.trim_start();
                if let Some(r) = after_arg.strip_prefix(',') {
                    rest = r;
                } else if let Some(r) = after_arg.strip_prefix('>') {
                    rest = r;
                    break;
                } else {
                    return Err("unterminated generic argument list");
                }
            }
        }

        Ok((TypeRef::new(name).with_generics(generics), rest))
    }

    /// Fully-qualified base name, without generic arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generics(&self) -> &[TypeRef] {
        &self.generics
    }

    /// Last path segment of the base name (`.`, `::` and `$` all separate).
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit(['.', ':', '$'])
            .find(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }

    /// True if this is `envelope` (matched by fqn or simple name) with exactly
    /// `arity` generic arguments.
    pub fn is_envelope(&self, envelope: &str, arity: usize) -> bool {
        self.generics.len() == arity && (self.name == envelope || self.simple_name() == envelope)
    }

    pub fn to_payload_type(&self) -> PayloadType {
        PayloadType::new(self.to_string())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.generics.is_empty() {
            write!(f, "<")?;
            for (i, generic) in self.generics.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{generic}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

impl From<&PayloadType> for TypeRef {
    /// Unparseable identities are kept whole as the base name.
    fn from(payload: &PayloadType) -> Self {
        Self::parse(payload.fqn()).unwrap_or_else(|_| Self::new(payload.fqn()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_generics() {
        let ty = TypeRef::parse(
            "org.apache.kafka.clients.consumer.ConsumerRecord<java.lang.String, com.example.Envelope<com.example.Foo>>",
        )
        .unwrap();

        assert_eq!(ty.simple_name(), "ConsumerRecord");
        assert_eq!(ty.generics().len(), 2);
        assert_eq!(ty.generics()[1].generics()[0].name(), "com.example.Foo");
        assert!(ty.is_envelope("ConsumerRecord", 2));
        assert_eq!(
            ty.to_string(),
            "org.apache.kafka.clients.consumer.ConsumerRecord<java.lang.String, com.example.Envelope<com.example.Foo>>"
        );
    }

    #[test]
    fn test_simple_name_across_separators() {
        assert_eq!(TypeRef::new("com.example.Outer$Inner").simple_name(), "Inner");
        assert_eq!(TypeRef::new("my_crate::dto::Order").simple_name(), "Order");
        assert_eq!(TypeRef::new("Plain").simple_name(), "Plain");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(TypeRef::parse("").is_err());
        assert!(TypeRef::parse("a.Foo<b.Bar").is_err());
        assert!(TypeRef::parse("a.Foo<b.Bar>>").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let ty: TypeRef = serde_json::from_str("\"a.Box<a.Foo>\"").unwrap();
        assert_eq!(ty.generics()[0].simple_name(), "Foo");
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"a.Box<a.Foo>\"");
    }
}
