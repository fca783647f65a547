//! Cookie jar configuration.

/// How stored cookies are matched against an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Domain, path and `Secure` scheme checks.
    #[default]
    Uri,
    /// Domain check only, ignoring path and scheme.
    DomainOnly,
}

/// Cookie jar configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarConfig {
    /// Which predicates select cookies for a request
    pub match_policy: MatchPolicy,
    /// Leave expired cookies out of the `Cookie` header
    pub skip_expired: bool,
}

impl Default for JarConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::Uri,
            skip_expired: true,
        }
    }
}

impl JarConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match policy.
    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Enable or disable skipping expired cookies.
    pub fn skip_expired(mut self, skip: bool) -> Self {
        self.skip_expired = skip;
        self
    }
}
