//! In-memory implementation of the Ledger trait.
//!
//! This is primarily for testing. It has the same semantics as the git
//! ledger but keeps every commit's full tree in memory.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::traits::{validate_path, Address, CommitId, CommitRecord, FileWrite, Ledger};

/// In-memory ledger implementation.
///
/// All data is lost when the ledger is dropped. Thread-safe via RwLock.
pub struct MemoryLedger {
    inner: RwLock<HashMap<Address, Vec<Commit>>>,
}

/// One commit on a branch, holding the full tree at that point.
struct Commit {
    id: CommitId,
    message: String,
    tree: BTreeMap<String, Vec<u8>>,
}

impl MemoryLedger {
    /// Create a new empty in-memory ledger.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Number of commits on a branch.
    pub fn commit_count(&self, address: &Address) -> Result<usize> {
        let inner = self.inner.read().map_err(|_| LedgerError::Poisoned)?;
        Ok(inner.get(address).map(Vec::len).unwrap_or(0))
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Commit id: Blake3 over the parent id, the message and the sorted tree.
fn commit_id(
    parent: Option<&CommitId>,
    message: &str,
    tree: &BTreeMap<String, Vec<u8>>,
) -> CommitId {
    let mut hasher = blake3::Hasher::new_derive_key("attest-ledger-v1 memory commit");
    if let Some(parent) = parent {
        hasher.update(parent.0.as_bytes());
    }
    hasher.update(&(message.len() as u64).to_le_bytes());
    hasher.update(message.as_bytes());
    for (path, contents) in tree {
        hasher.update(&(path.len() as u64).to_le_bytes());
        hasher.update(path.as_bytes());
        hasher.update(&(contents.len() as u64).to_le_bytes());
        hasher.update(contents);
    }
    CommitId(hasher.finalize().to_hex().to_string())
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn commit_files(
        &self,
        address: &Address,
        files: &[FileWrite],
        message: &str,
    ) -> Result<CommitId> {
        if files.is_empty() {
            return Err(LedgerError::EmptyCommit);
        }
        for file in files {
            validate_path(&file.path)?;
        }

        let mut inner = self.inner.write().map_err(|_| LedgerError::Poisoned)?;
        let commits = inner.entry(address.clone()).or_default();

        let parent = commits.last();
        let mut tree = parent.map(|c| c.tree.clone()).unwrap_or_default();
        for file in files {
            tree.insert(file.path.clone(), file.contents.clone());
        }

        let id = commit_id(parent.map(|c| &c.id), message, &tree);
        debug!(%address, commit = %id, files = files.len(), "memory commit");

        commits.push(Commit {
            id: id.clone(),
            message: message.to_string(),
            tree,
        });

        Ok(id)
    }

    async fn read_file(&self, address: &Address, path: &str) -> Result<Option<Vec<u8>>> {
        validate_path(path)?;
        let inner = self.inner.read().map_err(|_| LedgerError::Poisoned)?;

        Ok(inner
            .get(address)
            .and_then(|commits| commits.last())
            .and_then(|head| head.tree.get(path).cloned()))
    }

    async fn history(&self, address: &Address) -> Result<Vec<CommitRecord>> {
        let inner = self.inner.read().map_err(|_| LedgerError::Poisoned)?;

        Ok(inner
            .get(address)
            .map(|commits| {
                commits
                    .iter()
                    .rev()
                    .map(|c| CommitRecord {
                        id: c.id.clone(),
                        subject: c.message.lines().next().unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LedgerExt;

    fn address() -> Address {
        Address::main("mem://pub")
    }

    #[tokio::test]
    async fn test_commit_and_read() {
        let ledger = MemoryLedger::new();
        ledger
            .commit_file(&address(), "a.json", b"{}", "add a")
            .await
            .unwrap();

        let contents = ledger.read_file(&address(), "a.json").await.unwrap();
        assert_eq!(contents.as_deref(), Some(&b"{}"[..]));
    }

    #[tokio::test]
    async fn test_missing_branch_and_path_are_none() {
        let ledger = MemoryLedger::new();
        assert_eq!(ledger.read_file(&address(), "a.json").await.unwrap(), None);

        ledger
            .commit_file(&address(), "a.json", b"1", "add a")
            .await
            .unwrap();
        assert_eq!(ledger.read_file(&address(), "b.json").await.unwrap(), None);

        let other = Address::new("mem://pub", "other");
        assert_eq!(ledger.read_file(&other, "a.json").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_tree_carries_forward() {
        let ledger = MemoryLedger::new();
        ledger.commit_file(&address(), "a", b"1", "one").await.unwrap();
        ledger.commit_file(&address(), "b", b"2", "two").await.unwrap();
        ledger.commit_file(&address(), "a", b"3", "three").await.unwrap();

        assert_eq!(ledger.read_file(&address(), "a").await.unwrap(), Some(b"3".to_vec()));
        assert_eq!(ledger.read_file(&address(), "b").await.unwrap(), Some(b"2".to_vec()));
        assert_eq!(ledger.commit_count(&address()).unwrap(), 3);
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let ledger = MemoryLedger::new();
        let first = ledger.commit_file(&address(), "a", b"1", "one\n\nbody").await.unwrap();
        let second = ledger.commit_file(&address(), "a", b"1", "two").await.unwrap();
        assert_ne!(first, second);

        let history = ledger.history(&address()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second);
        assert_eq!(history[0].subject, "two");
        assert_eq!(history[1].subject, "one");
    }

    #[tokio::test]
    async fn test_rejects_empty_and_bad_paths() {
        let ledger = MemoryLedger::new();
        assert!(matches!(
            ledger.commit_files(&address(), &[], "nothing").await,
            Err(LedgerError::EmptyCommit)
        ));
        assert!(matches!(
            ledger.commit_file(&address(), "../x", b"", "escape").await,
            Err(LedgerError::InvalidPath(_))
        ));
        assert_eq!(ledger.commit_count(&address()).unwrap(), 0);
    }
}
