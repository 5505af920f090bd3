//! The Attestor: an identity holder bound to a ledger.
//!
//! The Attestor brings together credentials, the vault, and a ledger into
//! a single interface for publishing an identity and signing artifacts.

use attest_core::{
    generate_credentials, KeyPairFactory, PrivateCredentials, PublicCredentials, SignedPlaintext,
};
use attest_ledger::{Address, CommitRecord, Ledger, LedgerExt};
use attest_vault::{LockedCredentials, VaultKey};
use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};

use crate::config::AttestConfig;
use crate::error::{AttestError, Result};

/// Outcome of checking a published artifact against pinned credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Signed by the pinned identity.
    Authentic,
    /// The signature is valid but the embedded key is not the pinned one.
    UnknownSigner,
    /// The signature does not verify under the embedded key.
    BadSignature,
}

/// An identity holder publishing to a ledger.
///
/// Holds the unlocked private credentials in memory. The private key reaches
/// the ledger only inside a [`LockedCredentials`] record.
///
/// To share one ledger between holders and readers, pass an `Arc<L>`.
pub struct Attestor<L: Ledger> {
    /// The ledger backend.
    ledger: L,
    /// Configuration.
    config: AttestConfig,
    /// The holder's credentials.
    credentials: PrivateCredentials,
}

impl<L: Ledger> Attestor<L> {
    /// Create a new identity and publish it.
    ///
    /// Key material comes from the operating system CSPRNG.
    pub async fn init(ledger: L, config: AttestConfig, vault_key: &VaultKey) -> Result<Self> {
        let mut factory = KeyPairFactory::os();
        Self::init_with(ledger, config, vault_key, &mut factory).await
    }

    /// Create a new identity from `factory` and publish it.
    ///
    /// The locked private record is committed before the public one, so a
    /// published identity always has a recoverable key. Fails if credentials
    /// already exist at either address.
    pub async fn init_with<R: RngCore + CryptoRng>(
        ledger: L,
        config: AttestConfig,
        vault_key: &VaultKey,
        factory: &mut KeyPairFactory<R>,
    ) -> Result<Self> {
        let existing = [
            (&config.public, &config.public_credentials_path),
            (&config.private, &config.private_credentials_path),
        ];
        for (address, path) in existing {
            if ledger.read_file(address, path).await?.is_some() {
                return Err(AttestError::AlreadyInitialized(format!("{path} at {address}")));
            }
        }

        let credentials = generate_credentials(
            factory,
            config.public.repo.clone(),
            config.private.repo.clone(),
        )?;
        let id = credentials.id();
        let fingerprint = credentials.public_key().fingerprint();

        let locked = LockedCredentials::lock(&credentials, vault_key)?;
        ledger
            .commit_file(
                &config.private,
                &config.private_credentials_path,
                &locked.to_bytes()?,
                &format!("store credentials {id}"),
            )
            .await?;

        let public = credentials.public().to_bytes(config.encoding)?;
        ledger
            .commit_file(
                &config.public,
                &config.public_credentials_path,
                &public,
                &format!("publish credentials {id}"),
            )
            .await?;

        info!(%id, %fingerprint, public = %config.public, "identity initialized");
        Ok(Self {
            ledger,
            config,
            credentials,
        })
    }

    /// Load an existing identity by unlocking its private record.
    ///
    /// If public credentials are published, they must match.
    pub async fn load(ledger: L, config: AttestConfig, vault_key: &VaultKey) -> Result<Self> {
        let bytes = ledger
            .read_file(&config.private, &config.private_credentials_path)
            .await?
            .ok_or_else(|| AttestError::NotFound {
                address: config.private.to_string(),
                path: config.private_credentials_path.clone(),
            })?;
        let credentials = LockedCredentials::from_bytes(&bytes)?.unlock(vault_key)?;

        match read_public_credentials(&ledger, &config.public, &config).await? {
            Some(published) if &published != credentials.public() => {
                warn!(
                    published = %published.public_key_ed25519.fingerprint(),
                    held = %credentials.public_key().fingerprint(),
                    "published credentials differ from held credentials"
                );
                return Err(AttestError::CredentialsMismatch {
                    published: published.id.to_string(),
                    held: credentials.id().to_string(),
                });
            }
            Some(_) => {}
            None => warn!(public = %config.public, "public credentials not published"),
        }

        info!(
            id = %credentials.id(),
            fingerprint = %credentials.public_key().fingerprint(),
            "identity loaded"
        );
        Ok(Self {
            ledger,
            config,
            credentials,
        })
    }

    /// Get the holder's credentials.
    pub fn credentials(&self) -> &PrivateCredentials {
        &self.credentials
    }

    /// Get the holder's public credentials.
    pub fn public(&self) -> &PublicCredentials {
        self.credentials.public()
    }

    /// Get the configuration.
    pub fn config(&self) -> &AttestConfig {
        &self.config
    }

    /// Get the ledger reference.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Sign `plaintext` and publish the envelope as the artifact `name`.
    ///
    /// Publishing under an existing name replaces the artifact in a new
    /// commit; earlier versions stay in history.
    pub async fn attest(
        &self,
        name: &str,
        plaintext: impl Into<Vec<u8>>,
    ) -> Result<SignedPlaintext> {
        let path = self.config.artifact_path(name)?;
        let signed = SignedPlaintext::sign(&self.credentials, plaintext.into());
        let bytes = signed.to_bytes(self.config.encoding)?;

        let commit = self
            .ledger
            .commit_file(&self.config.public, &path, &bytes, &format!("attest {name}"))
            .await?;

        info!(
            name,
            %commit,
            fingerprint = %self.credentials.public_key().fingerprint(),
            "artifact attested"
        );
        Ok(signed)
    }

    /// List commits on the public address, newest first.
    pub async fn history(&self) -> Result<Vec<CommitRecord>> {
        Ok(self.ledger.history(&self.config.public).await?)
    }
}

/// Fetch the public credentials published at `address`.
pub async fn fetch_public_credentials<L: Ledger + ?Sized>(
    ledger: &L,
    address: &Address,
    config: &AttestConfig,
) -> Result<PublicCredentials> {
    read_public_credentials(ledger, address, config)
        .await?
        .ok_or_else(|| AttestError::NotFound {
            address: address.to_string(),
            path: config.public_credentials_path.clone(),
        })
}

/// Check the artifact `name` at `address` against the pinned `signer`.
///
/// A missing artifact is an error; a malformed one is a decode error. Any
/// parsed envelope yields a verdict.
pub async fn verify_artifact<L: Ledger + ?Sized>(
    ledger: &L,
    address: &Address,
    signer: &PublicCredentials,
    name: &str,
    config: &AttestConfig,
) -> Result<Verdict> {
    let path = config.artifact_path(name)?;
    let bytes = ledger
        .read_file(address, &path)
        .await?
        .ok_or_else(|| AttestError::NotFound {
            address: address.to_string(),
            path: path.clone(),
        })?;
    let signed = SignedPlaintext::parse_with(&bytes, config.encoding)?;

    let verdict = if !signed.verify() {
        Verdict::BadSignature
    } else if signed.public_key_ed25519 != signer.public_key_ed25519 {
        Verdict::UnknownSigner
    } else {
        Verdict::Authentic
    };

    debug!(
        %address,
        %path,
        signer = %signer.public_key_ed25519.fingerprint(),
        embedded = %signed.public_key_ed25519.fingerprint(),
        ?verdict,
        "artifact verified"
    );
    Ok(verdict)
}

async fn read_public_credentials<L: Ledger + ?Sized>(
    ledger: &L,
    address: &Address,
    config: &AttestConfig,
) -> Result<Option<PublicCredentials>> {
    let Some(bytes) = ledger
        .read_file(address, &config.public_credentials_path)
        .await?
    else {
        return Ok(None);
    };
    Ok(Some(PublicCredentials::from_bytes(&bytes, config.encoding)?))
}
