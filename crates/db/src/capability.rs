//! Credential tiers as types.
//!
//! The backend holds two database credentials: an elevated one used for
//! admin writes and a restricted one used for public reads. Each store is
//! tagged with the tier it was opened with, and only [`Elevated`] stores
//! implement [`crate::store::RecordWriter`].

use std::fmt;
use std::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
}

/// Marker trait for credential tiers. Sealed: only the two tiers below exist.
pub trait Capability: sealed::Sealed + Send + Sync + 'static {
    const NAME: &'static str;
}

/// Full read/write access, bypassing row-level restrictions.
#[derive(Debug, Clone, Copy)]
pub struct Elevated;

/// Read-only access for anonymous visitors.
#[derive(Debug, Clone, Copy)]
pub struct Restricted;

impl sealed::Sealed for Elevated {}
impl sealed::Sealed for Restricted {}

impl Capability for Elevated {
    const NAME: &'static str = "elevated";
}

impl Capability for Restricted {
    const NAME: &'static str = "restricted";
}

/// A connection string bound to a credential tier.
#[derive(Clone)]
pub struct Credential<C: Capability> {
    url: String,
    _tier: PhantomData<C>,
}

impl<C: Capability> Credential<C> {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            _tier: PhantomData,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<C: Capability> fmt::Debug for Credential<C> {
    /// Never print the connection string; it embeds the password.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("tier", &C::NAME)
            .field("url", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_url() {
        let cred = Credential::<Elevated>::new("postgres://admin:hunter2@db/app");
        let printed = format!("{cred:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("elevated"));
    }
}
