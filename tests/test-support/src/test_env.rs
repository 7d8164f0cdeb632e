use anyhow::{Context, Result};
use assert_fs::TempDir;
use assert_fs::prelude::*;

use std::path::Path;
use std::process::Command;

/// Temporary git repository plus an isolated configuration directory
pub struct CliTestEnvironment {
    pub repo_dir: assert_fs::fixture::ChildPath,
    pub config_dir: assert_fs::fixture::ChildPath,
    /// Directory outside any repository
    pub outside_dir: assert_fs::fixture::ChildPath,
    _temp_dir: TempDir, // Keep temp_dir private to ensure cleanup, but don't expose it
}

impl CliTestEnvironment {
    /// Creates a new test environment with a real git repository on `main`
    ///
    /// # Errors
    /// Returns an error if:
    /// - Failed to create temporary directory
    /// - Failed to initialize git repository
    /// - Failed to configure git settings
    /// - Failed to create initial commit
    pub fn new() -> Result<Self> {
        let env = Self::empty()?;

        env.repo_dir.child("README.md").write_str("# Test Repo")?;
        env.git(&["add", "."])?;
        env.git(&["commit", "-m", "Initial commit"])?;

        // Ensure we have a main branch (some git versions default to 'master')
        env.git(&["branch", "-M", "main"])?;

        Ok(env)
    }

    /// Creates a test environment whose repository has no commits yet
    ///
    /// # Errors
    /// Returns an error if the directories or the repository cannot be created
    pub fn empty() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let repo_dir = temp_dir.child("test_repo");
        let config_dir = temp_dir.child("config");
        let outside_dir = temp_dir.child("outside");

        repo_dir.create_dir_all()?;
        outside_dir.create_dir_all()?;

        let env = Self {
            repo_dir,
            config_dir,
            outside_dir,
            _temp_dir: temp_dir,
        };

        env.git(&["init"])?;
        env.git(&["config", "user.name", "Test User"])?;
        env.git(&["config", "user.email", "test@example.com"])?;
        env.git(&["config", "commit.gpgsign", "false"])?;

        Ok(env)
    }

    /// Run a git command in the repository directory and return its stdout
    ///
    /// # Errors
    /// Returns an error if git cannot be started or exits unsuccessfully
    pub fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.repo_dir.path())
            .output()
            .context("Failed to execute git command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Git command failed: {}", stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Write a file in the repository and stage it
    ///
    /// # Errors
    /// Returns an error if the file cannot be written or staged
    pub fn stage_file(&self, name: &str, content: &str) -> Result<()> {
        self.repo_dir.child(name).write_str(content)?;
        self.git(&["add", name])?;
        Ok(())
    }

    /// Write a raw configuration record
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn write_config(&self, content: &str) -> Result<()> {
        self.config_dir.create_dir_all()?;
        self.config_dir.child("config.toml").write_str(content)?;
        Ok(())
    }

    #[must_use]
    pub fn config_file(&self) -> assert_fs::fixture::ChildPath {
        self.config_dir.child("config.toml")
    }

    /// Execute the CLI from the repository directory with an isolated config directory
    ///
    /// # Errors
    /// Returns an error if the command setup fails
    pub fn run_command(&self, args: &[&str]) -> Result<assert_cmd::Command> {
        self.run_command_in(self.repo_dir.path(), args)
    }

    /// Execute the CLI from an arbitrary directory with an isolated config directory
    ///
    /// # Errors
    /// Returns an error if the command setup fails
    pub fn run_command_in(&self, dir: &Path, args: &[&str]) -> Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::cargo_bin("git-helper")
            .context("Failed to find git-helper binary")?;

        cmd.current_dir(dir)
            .env("GIT_HELPER_CONFIG_DIR", self.config_dir.path())
            .env_remove("GIT_HELPER_LOG");

        cmd.args(args);
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predicates::prelude::*;

    #[test]
    fn test_cli_test_environment_creation() -> Result<()> {
        let env = CliTestEnvironment::new()?;

        env.repo_dir.assert(predicate::path::is_dir());
        env.repo_dir.child(".git").assert(predicate::path::exists());
        env.repo_dir
            .child("README.md")
            .assert(predicate::str::contains("# Test Repo"));
        assert_eq!(env.git(&["rev-parse", "--abbrev-ref", "HEAD"])?, "main");

        // Config directory is created lazily by the CLI
        env.config_dir.assert(predicate::path::missing());

        Ok(())
    }

    #[test]
    fn test_write_config_creates_directory() -> Result<()> {
        let env = CliTestEnvironment::new()?;
        env.write_config("abbreviation = \"ds\"\n")?;

        env.config_file()
            .assert(predicate::str::contains("abbreviation"));

        Ok(())
    }
}
