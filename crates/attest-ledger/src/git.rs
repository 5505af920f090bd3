//! Git implementation of the Ledger trait.
//!
//! Each operation works in a fresh ephemeral checkout under the configured
//! work directory: clone (or init) one branch, act, push, discard. Commands
//! are run through the `git` binary with `tokio::process`; their output is
//! logged at debug level and never parsed for error classification.
//!
//! Remote trees are untrusted. Reads go through git objects rather than the
//! checked-out files, and writes refuse any target reached through a
//! symbolic link, so neither can leave the checkout.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, Result};
use crate::traits::{validate_path, Address, CommitId, CommitRecord, FileWrite, Ledger};

/// Tree entry mode of a symbolic link.
const SYMLINK_MODE: &str = "120000";

/// Configuration for the git ledger.
#[derive(Debug, Clone)]
pub struct GitLedgerConfig {
    /// The git executable.
    pub git: PathBuf,
    /// Parent directory for ephemeral checkouts.
    pub work_dir: PathBuf,
    /// Author name recorded on commits.
    pub author_name: String,
    /// Author email recorded on commits.
    pub author_email: String,
}

impl Default for GitLedgerConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            work_dir: std::env::temp_dir(),
            author_name: "attest".to_string(),
            author_email: "attest@localhost".to_string(),
        }
    }
}

/// A ledger backed by git repositories.
///
/// Concurrent commits to the same branch race at push time; the loser gets a
/// [`LedgerError::Command`] and may retry.
#[derive(Debug, Clone, Default)]
pub struct GitLedger {
    config: GitLedgerConfig,
}

impl GitLedger {
    pub fn new(config: GitLedgerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GitLedgerConfig {
        &self.config
    }

    /// Report the git version in use.
    pub async fn version(&self) -> Result<String> {
        let checkout = self.checkout_dir().await?;
        let stdout = checkout.invoke(&["version"]).await?;
        Ok(stdout.trim().to_string())
    }

    /// Create a bare repository at `path`, suitable as a remote.
    pub async fn init_bare(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path).await?;
        let repo = Checkout {
            dir: CheckoutDir::Borrowed(path.to_path_buf()),
            config: &self.config,
        };
        repo.invoke(&["init", "--bare"]).await?;
        Ok(())
    }

    async fn checkout_dir(&self) -> Result<Checkout<'_>> {
        tokio::fs::create_dir_all(&self.config.work_dir).await?;
        let work_dir = self.config.work_dir.clone();
        let dir = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix("attest-checkout-")
                .tempdir_in(work_dir)
        })
        .await
        .map_err(|e| LedgerError::Io(std::io::Error::other(e)))??;
        Ok(Checkout {
            dir: CheckoutDir::Owned(dir),
            config: &self.config,
        })
    }

    /// Whether the remote has the branch.
    async fn remote_has_branch(&self, checkout: &Checkout<'_>, address: &Address) -> Result<bool> {
        let stdout = checkout
            .invoke(&["ls-remote", "--heads", &address.repo, &address.branch])
            .await?;
        Ok(!stdout.trim().is_empty())
    }

    /// Clone the branch if it exists. Returns `None` if it does not.
    async fn clone_branch(&self, address: &Address) -> Result<Option<Checkout<'_>>> {
        let checkout = self.checkout_dir().await?;
        if !self.remote_has_branch(&checkout, address).await? {
            return Ok(None);
        }
        checkout
            .invoke(&[
                "clone",
                "--branch",
                &address.branch,
                "--single-branch",
                &address.repo,
                ".",
            ])
            .await?;
        Ok(Some(checkout))
    }

    /// Clone the branch, or start it in a fresh repository with the remote set.
    async fn clone_or_init_branch(&self, address: &Address) -> Result<Checkout<'_>> {
        if let Some(checkout) = self.clone_branch(address).await? {
            return Ok(checkout);
        }

        info!(%address, "branch not found on remote, initializing");
        let checkout = self.checkout_dir().await?;
        checkout.invoke(&["init"]).await?;
        let head = format!("refs/heads/{}", address.branch);
        checkout.invoke(&["symbolic-ref", "HEAD", &head]).await?;
        checkout
            .invoke(&["remote", "add", "origin", &address.repo])
            .await?;
        Ok(checkout)
    }
}

#[async_trait]
impl Ledger for GitLedger {
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

        let checkout = self.clone_or_init_branch(address).await?;
        for file in files {
            reject_symlinks(checkout.path(), &file.path).await?;
        }
        for file in files {
            let target = checkout.path().join(&file.path);
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&target, &file.contents).await?;
        }

        let pathspec = files
            .iter()
            .map(|f| f.path.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        checkout
            .invoke_stdin(
                &pathspec,
                &["--literal-pathspecs", "add", "--pathspec-from-file=-"],
            )
            .await?;
        checkout
            .invoke_stdin(message, &["commit", "--allow-empty", "-F", "-"])
            .await?;
        checkout
            .invoke(&["push", "-u", "origin", &address.branch])
            .await?;

        let head = checkout.invoke(&["rev-parse", "HEAD"]).await?;
        let head = head.trim();
        if head.is_empty() {
            return Err(LedgerError::Command {
                command: "git rev-parse HEAD".into(),
                status: None,
                stderr: "head commit missing".into(),
            });
        }

        info!(%address, commit = head, files = files.len(), "committed");
        Ok(CommitId(head.to_string()))
    }

    async fn read_file(&self, address: &Address, path: &str) -> Result<Option<Vec<u8>>> {
        validate_path(path)?;
        let Some(checkout) = self.clone_branch(address).await? else {
            return Ok(None);
        };
        let Some(entry) = checkout.tree_entry(path).await? else {
            return Ok(None);
        };

        if entry.mode == SYMLINK_MODE {
            warn!(%address, path, "refusing to read a symbolic link");
            return Err(LedgerError::UnsafePath(path.to_string()));
        }
        if entry.kind != "blob" {
            return Ok(None);
        }

        let contents = checkout
            .invoke_bytes(None, &["cat-file", "blob", &entry.object])
            .await?;
        Ok(Some(contents))
    }

    async fn history(&self, address: &Address) -> Result<Vec<CommitRecord>> {
        let Some(checkout) = self.clone_branch(address).await? else {
            return Ok(Vec::new());
        };

        let stdout = checkout.invoke(&["log", "--pretty=oneline"]).await?;
        Ok(stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                let (id, subject) = line.split_once(' ').unwrap_or((line, ""));
                CommitRecord {
                    id: CommitId(id.to_string()),
                    subject: subject.to_string(),
                }
            })
            .collect())
    }
}

/// Refuse a write target that is, or sits below, a symbolic link.
async fn reject_symlinks(root: &Path, relative: &str) -> Result<()> {
    let mut current = root.to_path_buf();
    for part in relative.split('/') {
        current.push(part);
        match tokio::fs::symlink_metadata(&current).await {
            Ok(meta) if meta.file_type().is_symlink() => {
                return Err(LedgerError::UnsafePath(relative.to_string()));
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// One entry of `git ls-tree`.
struct TreeEntry {
    mode: String,
    kind: String,
    object: String,
}

enum CheckoutDir {
    /// Ephemeral, removed on drop.
    Owned(TempDir),
    Borrowed(PathBuf),
}

/// A working directory in which git commands run.
struct Checkout<'a> {
    dir: CheckoutDir,
    config: &'a GitLedgerConfig,
}

impl Checkout<'_> {
    fn path(&self) -> &Path {
        match &self.dir {
            CheckoutDir::Owned(dir) => dir.path(),
            CheckoutDir::Borrowed(path) => path,
        }
    }

    async fn invoke(&self, args: &[&str]) -> Result<String> {
        let stdout = self.invoke_bytes(None, args).await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    async fn invoke_stdin(&self, stdin: &str, args: &[&str]) -> Result<String> {
        let stdout = self.invoke_bytes(Some(stdin), args).await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    /// The entry at `path` in the head tree, without touching the working tree.
    async fn tree_entry(&self, path: &str) -> Result<Option<TreeEntry>> {
        let stdout = self
            .invoke(&["--literal-pathspecs", "ls-tree", "-z", "HEAD", "--", path])
            .await?;

        Ok(stdout.split('\0').find_map(|record| {
            let (meta, name) = record.split_once('\t')?;
            if name != path {
                return None;
            }
            let mut fields = meta.split(' ');
            Some(TreeEntry {
                mode: fields.next()?.to_string(),
                kind: fields.next()?.to_string(),
                object: fields.next()?.to_string(),
            })
        }))
    }

    async fn invoke_bytes(&self, stdin: Option<&str>, args: &[&str]) -> Result<Vec<u8>> {
        let mut cmd = Command::new(&self.config.git);
        cmd.arg("-c")
            .arg(format!("user.name={}", self.config.author_name))
            .arg("-c")
            .arg(format!("user.email={}", self.config.author_email))
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .current_dir(self.path())
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn()?;
        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes()).await?;
            pipe.shutdown().await?;
        }
        let output = child.wait_with_output().await?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(
            repo = %self.path().display(),
            args = %args.join(" "),
            stdin = stdin.unwrap_or_default(),
            stdout = %String::from_utf8_lossy(&output.stdout),
            %stderr,
            "git"
        );

        if !output.status.success() {
            return Err(LedgerError::Command {
                command: format!("git {}", args.join(" ")),
                status: output.status.code(),
                stderr,
            });
        }
        Ok(output.stdout)
    }
}
