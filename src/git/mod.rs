use anyhow::{Context, Result};
use git2::Repository;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::error::HelperError;
use crate::traits::GitOperations;

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Opens the git repository containing the specified path
    ///
    /// # Errors
    /// Returns an error if:
    /// - The path is not inside a git repository
    /// - Failed to access the repository
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).context("Failed to find git repository")?;
        Ok(Self { repo })
    }

    #[must_use]
    pub fn get_repo_path(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }

    /// Runs git in the working directory with output passed through to the terminal
    fn run_git(&self, args: &[&str]) -> Result<()> {
        let command_line = format!("git {}", args.join(" "));
        info!(command = %command_line, "running git");

        let status = Command::new("git")
            .args(args)
            .current_dir(self.get_repo_path())
            .status()
            .with_context(|| format!("Failed to execute `{command_line}`"))?;

        if !status.success() {
            return Err(HelperError::ExternalTool {
                command: command_line,
                code: status.code(),
            }
            .into());
        }

        Ok(())
    }
}

impl GitOperations for GitRepo {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get current branch")?;
        let name = head.shorthand().unwrap_or("HEAD").to_string();
        debug!(branch = %name, "resolved current branch");
        Ok(name)
    }

    fn has_staged_changes(&self) -> Result<bool> {
        // An unborn HEAD compares against the empty tree
        let head_tree = match self.repo.head() {
            Ok(head) => Some(head.peel_to_tree()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e).context("Failed to resolve HEAD"),
        };

        // Pick up changes staged by other processes since the repo was opened
        let mut index = self.repo.index()?;
        index.read(false)?;
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;
        let staged = diff.deltas().len() > 0;
        debug!(staged, "checked index for staged changes");
        Ok(staged)
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.run_git(&["checkout", "-b", name])
    }

    fn commit(&self, subject: &str, body: &str) -> Result<()> {
        self.run_git(&["commit", "-m", subject, "-m", body])
    }
}

/// Calls recorded by [`MockGitRepo`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    CreateBranch(String),
    Commit { subject: String, body: String },
}

/// In-memory stand-in for a repository, for driving sessions in tests
pub struct MockGitRepo {
    pub branch: String,
    pub staged: bool,
    /// When set, mutating calls fail as if git exited with this code
    pub fail_with: Option<i32>,
    calls: RefCell<Vec<GitCall>>,
}

impl MockGitRepo {
    pub fn new(branch: impl Into<String>, staged: bool) -> Self {
        Self {
            branch: branch.into(),
            staged,
            fail_with: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing(mut self, code: i32) -> Self {
        self.fail_with = Some(code);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: GitCall, command: String) -> Result<()> {
        self.calls.borrow_mut().push(call);
        match self.fail_with {
            Some(code) => Err(HelperError::ExternalTool {
                command,
                code: Some(code),
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl GitOperations for MockGitRepo {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn has_staged_changes(&self) -> Result<bool> {
        Ok(self.staged)
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.record(
            GitCall::CreateBranch(name.to_string()),
            format!("git checkout -b {name}"),
        )
    }

    fn commit(&self, subject: &str, body: &str) -> Result<()> {
        self.record(
            GitCall::Commit {
                subject: subject.to_string(),
                body: body.to_string(),
            },
            "git commit".to_string(),
        )
    }
}

/// Opens the repository containing the current directory
///
/// # Errors
/// Returns an error if the current directory is unavailable or not in a repository
pub fn open_current() -> Result<GitRepo> {
    let current_dir: PathBuf = std::env::current_dir()?;
    GitRepo::open(&current_dir)
}
