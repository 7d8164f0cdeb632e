//! # git-helper
//!
//! An interactive CLI that enforces an organization's branch-naming and
//! commit-message conventions, then hands the result to git.
//!
//! ## Conventions
//!
//! - **Branches** - `<abbreviation>-<fix|feat>-<description>/<TICKET-ID>`,
//!   e.g. `ds-fix-user-details-window/CPRE-11347`
//! - **Commits** - `<type>(<product>): <description>` followed by
//!   `Fixes <TICKET-ID>` or `Closes <TICKET-ID>`, with the ticket read from the
//!   current branch name
//!
//! ## Quick Start
//!
//! ```bash
//! # Store your two-letter abbreviation
//! git-helper config DS
//!
//! # Create and switch to a new branch
//! git-helper create-branch
//!
//! # Commit staged changes
//! git-helper create-commit
//! ```
//!
//! ## Module Structure
//!
//! - [`commands`] - Individual command implementations (config, show-config, create-branch, create-commit)
//! - [`config`] - Persists the abbreviation in `~/.git-helper-cli/config.toml`
//! - [`naming`] - Validators and assemblers for branch names and commit messages
//! - [`ticket`] - Derives the ticket id from a branch name
//! - [`git`] - Git operations: git2 for queries, the git binary for branch and commit
//! - [`prompt`] - Abstracts interactive prompts for testability
//! - [`traits`] - Defines the GitOperations trait for testability and abstraction
//! - [`error`] - Typed errors shared by the modules above

pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod naming;
pub mod prompt;
pub mod ticket;
pub mod traits;

pub use anyhow::Result;
