use serde::{Deserialize, Serialize};

/// Configuration for a [`RefDatabase`](crate::RefDatabase).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefDbConfig {
    /// Maximum number of symbolic hops followed while resolving a name.
    /// One more symbolic record fails with `TooManyRedirects`.
    pub max_redirects: usize,
    /// Validate reference names (and symbolic targets) before writes are
    /// dispatched to the backend.
    pub validate_names: bool,
}

impl Default for RefDbConfig {
    fn default() -> Self {
        Self {
            max_redirects: 5,
            validate_names: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = RefDbConfig::default();
        assert_eq!(c.max_redirects, 5);
        assert!(c.validate_names);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: RefDbConfig = serde_json::from_str(r#"{"max_redirects": 2}"#).unwrap();
        assert_eq!(c.max_redirects, 2);
        assert!(c.validate_names);
    }
}
