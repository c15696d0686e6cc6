//! Bundle grouping tokens
//!
//! One token is drawn per checkout action and shared by all of its cart
//! lines. Sources are injected so that rapid repeated checkouts cannot
//! collide and tests can predict the value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grouping token carried by every line of one checkout action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleToken(String);

impl BundleToken {
    /// Wrap a token value
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BundleToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generator of grouping tokens
pub trait TokenSource {
    /// Produce the token for the next checkout action
    fn next_token(&mut self) -> BundleToken;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> BundleToken {
        (**self).next_token()
    }
}

/// Random v4 UUID tokens: `bundle-<uuid>`
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokens;

impl TokenSource for UuidTokens {
    fn next_token(&mut self) -> BundleToken {
        BundleToken(format!("bundle-{}", Uuid::new_v4()))
    }
}

/// Wall-clock tokens: `bundle-<unix millis>`
///
/// Calls landing in the same millisecond get `last + 1`, so tokens from one
/// source are strictly increasing.
#[derive(Debug, Clone, Default)]
pub struct TimestampTokens {
    last: i64,
}

impl TimestampTokens {
    /// Create source
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenSource for TimestampTokens {
    fn next_token(&mut self) -> BundleToken {
        let now = chrono::Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        BundleToken(format!("bundle-{}", self.last))
    }
}

/// Sequential tokens: `bundle-1`, `bundle-2`, ...
#[derive(Debug, Clone, Default)]
pub struct CounterTokens {
    issued: u64,
}

impl CounterTokens {
    /// Create counter starting at 1
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenSource for CounterTokens {
    fn next_token(&mut self) -> BundleToken {
        self.issued += 1;
        BundleToken(format!("bundle-{}", self.issued))
    }
}
