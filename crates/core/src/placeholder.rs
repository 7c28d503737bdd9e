use chanscope_plugin::{BoxError, ValueResolver};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// `${key}` or `${key:default}`
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::([^}]*))?\}").expect("placeholder pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unresolved placeholder '${{{key}}}' in '{value}'")]
pub struct UnresolvedPlaceholder {
    pub key: String,
    pub value: String,
}

/// Resolves placeholders against docket properties, optionally falling back
/// to environment variables.
#[derive(Debug, Default, Clone)]
pub struct PropertiesResolver {
    properties: IndexMap<String, String>,
    use_environment: bool,
}

impl PropertiesResolver {
    pub fn new(properties: IndexMap<String, String>) -> Self {
        Self {
            properties,
            use_environment: false,
        }
    }

    pub fn with_environment(mut self, use_environment: bool) -> Self {
        self.use_environment = use_environment;
        self
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned().or_else(|| {
            self.use_environment
                .then(|| std::env::var(key).ok())
                .flatten()
        })
    }
}

impl ValueResolver for PropertiesResolver {
    fn resolve(&self, value: &str) -> Result<String, BoxError> {
        let mut missing = None;
        let resolved = PLACEHOLDER.replace_all(value, |caps: &Captures<'_>| {
            let key = caps[1].trim();
            match (self.lookup(key), caps.get(2)) {
                (Some(found), _) => found,
                (None, Some(default)) => default.as_str().to_string(),
                (None, None) => {
                    missing.get_or_insert_with(|| key.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(key) => Err(UnresolvedPlaceholder {
                key,
                value: value.to_string(),
            }
            .into()),
            None => Ok(resolved.into_owned()),
        }
    }
}
