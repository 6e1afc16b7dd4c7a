use std::fmt;

/// A single-use API credential. Debug output never reveals the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the comma-delimited, environment-supplied credential list.
    /// Blank entries are skipped.
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(Self::new)
            .collect()
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// One upstream endpoint a resolution attempt can be made against.
/// Immutable once issued; constructed from configuration, consumed during a
/// resolution attempt, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderRef {
    /// The credential-rotated platform API: fixed host, one key per attempt,
    /// two-letter country hint.
    Keyed {
        host: String,
        key: ApiKey,
        geo: String,
    },
    /// A self-hosted mirror exposing the normalized schema, no auth.
    Mirror { base_url: String },
}
