//! Attestor configuration.
//!
//! Where credentials and artifacts live: two ledger addresses (one public,
//! one private to the holder) and the paths used inside them.

use attest_core::Encoding;
use attest_ledger::Address;

use crate::error::{AttestError, Result};

/// Repository of the public address.
pub const ENV_PUBLIC_REPO: &str = "ATTEST_PUBLIC_REPO";
/// Repository of the private address.
pub const ENV_PRIVATE_REPO: &str = "ATTEST_PRIVATE_REPO";
/// Optional branch override for the public address.
pub const ENV_PUBLIC_BRANCH: &str = "ATTEST_PUBLIC_BRANCH";
/// Optional branch override for the private address.
pub const ENV_PRIVATE_BRANCH: &str = "ATTEST_PRIVATE_BRANCH";

/// Configuration for the Attestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestConfig {
    /// Where public credentials and signed artifacts are published.
    pub public: Address,
    /// Where the locked private credentials are kept.
    pub private: Address,
    /// Path of the public credentials record.
    pub public_credentials_path: String,
    /// Path of the locked private credentials record.
    pub private_credentials_path: String,
    /// Directory holding signed artifacts.
    pub artifacts_dir: String,
    /// Encoding of public records and artifacts.
    pub encoding: Encoding,
}

impl Default for AttestConfig {
    fn default() -> Self {
        Self {
            public: Address::main("attest-public"),
            private: Address::main("attest-private"),
            public_credentials_path: "id/public_credentials.json".to_string(),
            private_credentials_path: "id/private_credentials.cbor".to_string(),
            artifacts_dir: "signed".to_string(),
            encoding: Encoding::Json,
        }
    }
}

impl AttestConfig {
    /// Configuration for the given public and private repositories, with
    /// default branches and paths.
    pub fn new(public_repo: impl Into<String>, private_repo: impl Into<String>) -> Self {
        Self {
            public: Address::main(public_repo),
            private: Address::main(private_repo),
            ..Self::default()
        }
    }

    /// Read the addresses from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the addresses through `lookup`. Repositories are required,
    /// branches fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AttestError::Config(format!("{var} is not set")))
        };

        let mut config = Self::new(required(ENV_PUBLIC_REPO)?, required(ENV_PRIVATE_REPO)?);
        if let Some(branch) = lookup(ENV_PUBLIC_BRANCH).filter(|b| !b.is_empty()) {
            config.public.branch = branch;
        }
        if let Some(branch) = lookup(ENV_PRIVATE_BRANCH).filter(|b| !b.is_empty()) {
            config.private.branch = branch;
        }
        Ok(config)
    }

    /// Path of the artifact called `name`.
    ///
    /// Names are a single path component; the extension follows the encoding.
    pub fn artifact_path(&self, name: &str) -> Result<String> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(AttestError::InvalidName(name.to_string()));
        }
        Ok(format!(
            "{}/{}.{}",
            self.artifacts_dir,
            name,
            self.encoding.extension()
        ))
    }
}
