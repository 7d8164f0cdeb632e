use anyhow::{Context, Result};
use tracing::debug;

use crate::error::HelperError;
use crate::git;
use crate::naming::{ChangeType, CommitSpec, Product, check_commit_description};
use crate::prompt::{InquirePrompter, Prompter};
use crate::ticket::extract_ticket;
use crate::traits::GitOperations;

/// How a commit session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed { subject: String, body: String },
    Aborted,
}

/// Interactively build and record a convention-following commit
///
/// # Errors
/// Returns an error if the current directory is not a git repository, nothing
/// is staged, the branch carries no ticket id, a prompt fails, or git fails
pub fn create_commit() -> Result<()> {
    let git_repo = git::open_current()?;
    run_commit_session(&InquirePrompter, &git_repo)?;
    Ok(())
}

/// Linear flow: type, product, description, ticket from the branch, one confirmation.
///
/// # Errors
/// Returns [`HelperError::PreconditionFailed`] before any prompt when the index
/// has no staged changes. Also fails when the ticket cannot be extracted, a
/// prompt fails or is cancelled, or git fails to commit.
pub fn run_commit_session(
    prompter: &dyn Prompter,
    git_repo: &dyn GitOperations,
) -> Result<CommitOutcome> {
    if !git_repo.has_staged_changes()? {
        return Err(HelperError::PreconditionFailed(
            "no staged changes found. Please stage your changes before committing".to_string(),
        )
        .into());
    }

    let commit_type: ChangeType = prompter
        .select("Select commit type:", ChangeType::options())?
        .parse()?;
    let product: Product = prompter
        .select("Select product:", Product::options())?
        .parse()?;
    let description =
        prompter.text("Enter a short commit description:", check_commit_description)?;

    let branch = git_repo.current_branch()?;
    let ticket_id = extract_ticket(&branch)
        .with_context(|| format!("failed to extract ticket from branch '{}'", branch))?;
    debug!(%branch, %ticket_id, "derived ticket from branch");

    let spec = CommitSpec {
        commit_type,
        product,
        description,
        ticket_id,
    };
    let (subject, body) = spec.messages();

    println!("\nThe following commit messages will be created:");
    println!("Message 1: {}", subject);
    println!("Message 2: {}", body);

    if !prompter.confirm("Do you want to proceed with this commit?", false)? {
        println!("Commit creation aborted.");
        return Ok(CommitOutcome::Aborted);
    }

    println!("Executing git commit...");
    git_repo
        .commit(&subject, &body)
        .context("failed to create commit")?;
    println!("✓ Commit created successfully!");

    Ok(CommitOutcome::Committed { subject, body })
}
