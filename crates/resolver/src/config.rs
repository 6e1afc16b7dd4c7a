use crate::provider::ApiKey;

/// Country hint sent to the platform API when the caller supplies none.
pub const DEFAULT_GEO: &str = "IN";

/// Injected configuration for the resolver. The core never hardcodes hosts,
/// credentials or mirrors; the embedding process supplies all of them.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Fixed host of the credential-rotated platform API.
    pub api_host: String,
    /// Rotating credential list for the platform API. Parse the
    /// environment-supplied comma-delimited form with [`ApiKey::parse_list`].
    pub api_keys: Vec<ApiKey>,
    /// Preference-ordered mirror base URLs sharing the normalized schema.
    pub mirrors: Vec<String>,
    /// Mirrors preferred for live-manifest discovery. Empty means "use the
    /// full mirror list".
    pub hls_mirrors: Vec<String>,
    /// Emergency provider consulted only after the whole mirror list failed
    /// on a non-prefetch resolution.
    pub fallback: Option<String>,
    /// Two-letter country hint used when a call carries none.
    pub default_geo: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_host: String::new(),
            api_keys: Vec::new(),
            mirrors: Vec::new(),
            hls_mirrors: Vec::new(),
            fallback: None,
            default_geo: DEFAULT_GEO.to_owned(),
        }
    }
}

impl ResolverConfig {
    /// Mirror set used for live-manifest discovery.
    pub fn live_mirrors(&self) -> &[String] {
        if self.hls_mirrors.is_empty() {
            &self.mirrors
        } else {
            &self.hls_mirrors
        }
    }
}
