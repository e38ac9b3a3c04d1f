//! Caller identity attributes.
//!
//! Stands in for the signed attributes of a caller certificate. The set is
//! fixed when a replica is constructed; a test that needs another identity
//! builds another replica.

use std::collections::BTreeMap;

/// Attribute name holding the caller's user name.
pub const USERNAME_ATTRIBUTE: &str = "username";

/// Attribute name holding the caller's role.
pub const ROLE_ATTRIBUTE: &str = "role";

/// Immutable attribute name → value mapping for the simulated caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityAttributes {
    attrs: BTreeMap<String, Vec<u8>>,
}

impl IdentityAttributes {
    /// An identity with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: return a copy of this identity with one more attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Shorthand for an identity carrying `username` and `role`.
    pub fn user(username: &str, role: &str) -> Self {
        Self::new()
            .with(USERNAME_ATTRIBUTE, username)
            .with(ROLE_ATTRIBUTE, role)
    }

    /// Look up an attribute. Absence is not an error.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.attrs.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for IdentityAttributes
where
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attrs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
