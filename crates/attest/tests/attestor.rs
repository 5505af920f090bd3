//! Attestor flows against a shared in-memory ledger, and once against git.

use std::sync::Arc;

use attest::core::Encoding;
use attest::ledger::{GitLedger, GitLedgerConfig, Ledger, LedgerExt, MemoryLedger};
use attest::vault::{LockedCredentials, VaultError, VaultKey};
use attest::{
    fetch_public_credentials, verify_artifact, AttestConfig, AttestError, Attestor, Verdict,
};
use attest_testkit::fixtures::TestFixture;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn vault_key() -> VaultKey {
    VaultKey::from_bytes([0x11; 32])
}

fn config() -> AttestConfig {
    AttestConfig::new("mem://alice/pub", "mem://alice/priv")
}

#[tokio::test]
async fn test_vote_published_and_verified_by_reader() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = config();

    let alice = Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    alice.attest("vote", b"vote: yes".to_vec()).await?;

    // A reader pins Alice's published credentials, then checks the artifact.
    let pinned = fetch_public_credentials(ledger.as_ref(), &config.public, &config).await?;
    assert_eq!(&pinned, alice.public());

    let verdict = verify_artifact(ledger.as_ref(), &config.public, &pinned, "vote", &config).await?;
    assert_eq!(verdict, Verdict::Authentic);
    Ok(())
}

#[tokio::test]
async fn test_resigned_artifact_is_unknown_signer() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = config();

    let alice = Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    alice.attest("vote", b"vote: yes".to_vec()).await?;

    // Mallory overwrites the artifact with her own, validly signed, envelope.
    let mallory = TestFixture::with_seed(666);
    let forged = mallory.sign(b"vote: no");
    ledger
        .commit_file(
            &config.public,
            &config.artifact_path("vote")?,
            &forged.to_bytes(Encoding::Json)?,
            "attest vote",
        )
        .await?;

    let verdict =
        verify_artifact(ledger.as_ref(), &config.public, alice.public(), "vote", &config).await?;
    assert_eq!(verdict, Verdict::UnknownSigner);
    Ok(())
}

#[tokio::test]
async fn test_tampered_artifact_is_bad_signature() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = config();

    let alice = Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    let mut signed = alice.attest("vote", b"vote: yes".to_vec()).await?;

    signed.plaintext = b"vote: no".to_vec().into();
    ledger
        .commit_file(
            &config.public,
            &config.artifact_path("vote")?,
            &signed.to_bytes(Encoding::Json)?,
            "tamper",
        )
        .await?;

    let verdict =
        verify_artifact(ledger.as_ref(), &config.public, alice.public(), "vote", &config).await?;
    assert_eq!(verdict, Verdict::BadSignature);
    Ok(())
}

#[tokio::test]
async fn test_malformed_artifact_is_decode_error() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = config();

    let alice = Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    ledger
        .commit_file(&config.public, &config.artifact_path("vote")?, b"{not json", "junk")
        .await?;

    let result =
        verify_artifact(ledger.as_ref(), &config.public, alice.public(), "vote", &config).await;
    assert!(matches!(result, Err(AttestError::Decode(_))));
    Ok(())
}

#[tokio::test]
async fn test_load_recovers_identity() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = config();

    let created = Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    let loaded = Attestor::load(ledger.clone(), config.clone(), &vault_key()).await?;
    assert_eq!(loaded.credentials(), created.credentials());

    // The loaded holder signs as the same identity.
    loaded.attest("later", b"still me".to_vec()).await?;
    let verdict =
        verify_artifact(ledger.as_ref(), &config.public, created.public(), "later", &config)
            .await?;
    assert_eq!(verdict, Verdict::Authentic);
    Ok(())
}

#[tokio::test]
async fn test_load_with_wrong_vault_key_fails() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = config();

    Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    let result = Attestor::load(ledger, config, &VaultKey::from_bytes([0x22; 32])).await;
    assert!(matches!(
        result,
        Err(AttestError::Vault(VaultError::Decryption(_)))
    ));
    Ok(())
}

#[tokio::test]
async fn test_load_without_identity_is_not_found() {
    init_tracing();
    let result = Attestor::load(MemoryLedger::new(), config(), &vault_key()).await;
    assert!(matches!(result, Err(AttestError::NotFound { .. })));
}

#[tokio::test]
async fn test_load_rejects_replaced_public_record() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = config();

    Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    let other = TestFixture::with_seed(3);
    ledger
        .commit_file(
            &config.public,
            &config.public_credentials_path,
            &other.public().to_bytes(config.encoding)?,
            "replace credentials",
        )
        .await?;

    let result = Attestor::load(ledger, config, &vault_key()).await;
    assert!(matches!(result, Err(AttestError::CredentialsMismatch { .. })));
    Ok(())
}

#[tokio::test]
async fn test_init_twice_fails() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = config();

    Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    let result = Attestor::init(ledger.clone(), config.clone(), &vault_key()).await;
    assert!(matches!(result, Err(AttestError::AlreadyInitialized(_))));
    assert_eq!(ledger.commit_count(&config.private)?, 1);
    Ok(())
}

#[tokio::test]
async fn test_init_over_stored_private_record_fails() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = config();

    // A private record without a published identity, e.g. from an interrupted init.
    let earlier = TestFixture::with_seed(9);
    let locked = LockedCredentials::lock(&earlier.credentials, &vault_key())?;
    ledger
        .commit_file(
            &config.private,
            &config.private_credentials_path,
            &locked.to_bytes()?,
            "store credentials",
        )
        .await?;

    let result = Attestor::init(ledger.clone(), config.clone(), &vault_key()).await;
    assert!(matches!(result, Err(AttestError::AlreadyInitialized(_))));
    assert_eq!(ledger.commit_count(&config.private)?, 1);
    assert_eq!(ledger.commit_count(&config.public)?, 0);

    // The stored record is untouched and still unlocks.
    let stored = ledger
        .read_file(&config.private, &config.private_credentials_path)
        .await?
        .expect("private record");
    let unlocked = LockedCredentials::from_bytes(&stored)?.unlock(&vault_key())?;
    assert_eq!(&unlocked, &earlier.credentials);
    Ok(())
}

#[tokio::test]
async fn test_cbor_artifacts() -> anyhow::Result<()> {
    init_tracing();
    let ledger = Arc::new(MemoryLedger::new());
    let config = AttestConfig {
        encoding: Encoding::Cbor,
        public_credentials_path: "id/public_credentials.cbor".to_string(),
        ..config()
    };

    let alice = Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    alice.attest("empty", Vec::new()).await?;

    let stored = ledger.read_file(&config.public, "signed/empty.cbor").await?;
    assert!(stored.is_some());

    let verdict =
        verify_artifact(ledger.as_ref(), &config.public, alice.public(), "empty", &config).await?;
    assert_eq!(verdict, Verdict::Authentic);
    Ok(())
}

#[tokio::test]
async fn test_git_round_trip() -> anyhow::Result<()> {
    init_tracing();
    let root = tempfile::tempdir()?;
    let ledger = Arc::new(GitLedger::new(GitLedgerConfig {
        work_dir: root.path().join("work"),
        ..GitLedgerConfig::default()
    }));
    if ledger.version().await.is_err() {
        eprintln!("git not available, skipping");
        return Ok(());
    }

    let public = root.path().join("pub.git");
    let private = root.path().join("priv.git");
    ledger.init_bare(&public).await?;
    ledger.init_bare(&private).await?;
    let config = AttestConfig::new(
        public.to_string_lossy().into_owned(),
        private.to_string_lossy().into_owned(),
    );

    let alice = Attestor::init(ledger.clone(), config.clone(), &vault_key()).await?;
    alice.attest("vote", b"vote: yes".to_vec()).await?;

    let loaded = Attestor::load(ledger.clone(), config.clone(), &vault_key()).await?;
    assert_eq!(loaded.public(), alice.public());

    let pinned = fetch_public_credentials(ledger.as_ref(), &config.public, &config).await?;
    let verdict = verify_artifact(ledger.as_ref(), &config.public, &pinned, "vote", &config).await?;
    assert_eq!(verdict, Verdict::Authentic);

    let history = alice.history().await?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].subject, "attest vote");
    Ok(())
}
