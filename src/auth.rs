//! Clerk credentials
//!
//! Passwords never leave the prompt in clear text: they are reduced to an
//! MD5 hex digest, which is what the credential store keeps and compares.

use std::fmt;

/// Numeric clerk identifier
pub type ClerkId = u32;

/// Lowercase hex MD5 digest of a clerk password
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn from_password(password: &str) -> Self {
        Self(format!("{:x}", md5::compute(password.as_bytes())))
    }

    /// Wrap a digest that was already computed (e.g. read from the store)
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep digests out of logs and debug dumps
impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Credentials collected from flags, environment or a prompt
#[derive(Debug, Clone)]
pub struct Credentials {
    pub clerk: ClerkId,
    pub digest: PasswordDigest,
}

impl Credentials {
    pub fn new(clerk: ClerkId, password: &str) -> Self {
        Self {
            clerk,
            digest: PasswordDigest::from_password(password),
        }
    }
}
