use anyhow::{Context, Result};
use tracing::debug;

use crate::config::{ConfigStore, HelperConfig};
use crate::git;
use crate::naming::{BranchSpec, ChangeType, check_branch_description, validate_ticket_id};
use crate::prompt::{InquirePrompter, Prompter};
use crate::traits::GitOperations;

const TYPE_PROMPT: &str = "Choose branch type:";
const DESCRIPTION_PROMPT: &str =
    "Enter a short branch description (spaces will be replaced with hyphens):";
const TICKET_PROMPT: &str = "Enter the ticket ID (e.g., CPRE-11347):";
const MENU_PROMPT: &str = "What would you like to do?";

/// How a branch session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    Created(String),
    Cancelled,
}

/// Entries of the review menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Confirm,
    EditType,
    EditDescription,
    EditTicket,
    Cancel,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Confirm,
        MenuChoice::EditType,
        MenuChoice::EditDescription,
        MenuChoice::EditTicket,
        MenuChoice::Cancel,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Confirm => "Confirm and create branch",
            MenuChoice::EditType => "Edit branch type",
            MenuChoice::EditDescription => "Edit description",
            MenuChoice::EditTicket => "Edit ticket ID",
            MenuChoice::Cancel => "Cancel",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.label() == label)
    }

    fn options() -> Vec<String> {
        Self::ALL.iter().map(|c| c.label().to_string()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    CollectType,
    CollectDescription,
    CollectTicket,
    ReviewMenu,
    Confirm(String),
    Done(String),
    Cancelled,
}

/// Fields gathered so far; the first missing one decides where the session goes next
#[derive(Debug, Default)]
struct Draft {
    branch_type: Option<ChangeType>,
    description: Option<String>,
    ticket_id: Option<String>,
}

impl Draft {
    fn next_state(&self) -> State {
        if self.branch_type.is_none() {
            State::CollectType
        } else if self.description.is_none() {
            State::CollectDescription
        } else if self.ticket_id.is_none() {
            State::CollectTicket
        } else {
            State::ReviewMenu
        }
    }

    fn spec(&self, abbreviation: &str) -> Option<BranchSpec> {
        Some(BranchSpec {
            abbreviation: abbreviation.to_string(),
            branch_type: self.branch_type?,
            description: self.description.clone()?,
            ticket_id: self.ticket_id.clone()?,
        })
    }
}

/// Interactively create and switch to a convention-following branch
///
/// # Errors
/// Returns an error if no abbreviation is configured, the current directory is
/// not a git repository, a prompt fails, or git fails to create the branch
pub fn create_branch() -> Result<()> {
    let config = ConfigStore::new()?
        .load()
        .context("failed to load configuration")?;
    config.require_abbreviation()?;

    let git_repo = git::open_current()?;
    run_branch_session(&config, &InquirePrompter, &git_repo)?;
    Ok(())
}

/// Drives the collect / review / confirm loop.
///
/// The abbreviation is checked before the first prompt. Edits from the review
/// menu re-collect a single field and return to the menu.
///
/// # Errors
/// Returns an error if no abbreviation is configured, a prompt fails or is
/// cancelled, or git fails to create the branch
pub fn run_branch_session(
    config: &HelperConfig,
    prompter: &dyn Prompter,
    git_repo: &dyn GitOperations,
) -> Result<BranchOutcome> {
    let abbreviation = config.require_abbreviation()?;
    let mut draft = Draft::default();
    let mut state = State::CollectType;

    loop {
        debug!(?state, "branch session");
        state = match state {
            State::CollectType => {
                let choice = prompter.select(TYPE_PROMPT, ChangeType::options())?;
                draft.branch_type = Some(choice.parse()?);
                draft.next_state()
            }
            State::CollectDescription => {
                draft.description =
                    Some(prompter.text(DESCRIPTION_PROMPT, check_branch_description)?);
                draft.next_state()
            }
            State::CollectTicket => {
                draft.ticket_id = Some(prompter.text(TICKET_PROMPT, validate_ticket_id)?);
                draft.next_state()
            }
            State::ReviewMenu => match draft.spec(abbreviation) {
                None => draft.next_state(),
                Some(spec) => {
                    let branch_name = spec.branch_name();
                    println!("\nProposed branch name: {}", branch_name);

                    let choice = prompter.select(MENU_PROMPT, MenuChoice::options())?;
                    match MenuChoice::from_label(&choice) {
                        Some(MenuChoice::Confirm) => State::Confirm(branch_name),
                        Some(MenuChoice::EditType) => State::CollectType,
                        Some(MenuChoice::EditDescription) => State::CollectDescription,
                        Some(MenuChoice::EditTicket) => State::CollectTicket,
                        Some(MenuChoice::Cancel) => State::Cancelled,
                        None => anyhow::bail!("Unknown menu choice: {}", choice),
                    }
                }
            },
            State::Confirm(branch_name) => {
                let confirmed =
                    prompter.confirm(&format!("Create branch '{}'?", branch_name), false)?;
                if confirmed {
                    println!("Executing: git checkout -b {}", branch_name);
                    git_repo
                        .create_branch(&branch_name)
                        .context("failed to create branch")?;
                    State::Done(branch_name)
                } else {
                    State::ReviewMenu
                }
            }
            State::Done(branch_name) => {
                println!("✓ Branch created and switched successfully!");
                return Ok(BranchOutcome::Created(branch_name));
            }
            State::Cancelled => {
                println!("Aborting branch creation.");
                return Ok(BranchOutcome::Cancelled);
            }
        };
    }
}
