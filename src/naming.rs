//! Branch-name and commit-message conventions.
//!
//! Branches follow `<abbreviation>-<type>-<description>/<TICKET-ID>`, for example
//! `ds-fix-user-details-window/CPRE-11347`. Commits carry two messages:
//!
//! ```text
//! fix(lego): typo in header
//! Fixes CLI-34343
//! ```
//!
//! Every validator here is a plain function returning the accepted value or a
//! [`HelperError::Format`] carrying the message to show the user, so the same
//! functions back both the interactive prompts and the non-interactive paths.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::HelperError;

/// Longest branch description accepted, measured after hyphenation
pub const BRANCH_DESCRIPTION_MAX: usize = 30;

/// Longest commit description accepted
pub const COMMIT_DESCRIPTION_MAX: usize = 50;

static TICKET_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+-\d+$").unwrap_or_else(|e| unreachable!("ticket pattern: {e}"))
});

static ABBREVIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2}$").unwrap_or_else(|e| unreachable!("abbreviation pattern: {e}"))
});

/// Kind of work a branch or commit carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Fix,
    Feat,
}

impl ChangeType {
    pub const ALL: [ChangeType; 2] = [ChangeType::Fix, ChangeType::Feat];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Fix => "fix",
            ChangeType::Feat => "feat",
        }
    }

    /// Option labels in menu order
    #[must_use]
    pub fn options() -> Vec<String> {
        Self::ALL.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fix" => Ok(ChangeType::Fix),
            "feat" => Ok(ChangeType::Feat),
            other => Err(HelperError::format(format!(
                "unknown type '{other}' (expected fix or feat)"
            ))),
        }
    }
}

/// Product tag placed in the commit scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Lego,
    Plec,
}

impl Product {
    pub const ALL: [Product; 2] = [Product::Lego, Product::Plec];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Product::Lego => "lego",
            Product::Plec => "plec",
        }
    }

    #[must_use]
    pub fn options() -> Vec<String> {
        Self::ALL.iter().map(|p| p.as_str().to_string()).collect()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Product {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lego" => Ok(Product::Lego),
            "plec" => Ok(Product::Plec),
            other => Err(HelperError::format(format!(
                "unknown product '{other}' (expected lego or plec)"
            ))),
        }
    }
}

/// Replaces spaces with hyphens and enforces `1..=max_len` characters.
///
/// # Errors
/// Returns [`HelperError::Format`] when the hyphenated text is empty or too long.
pub fn validate_description(raw: &str, max_len: usize) -> Result<String, HelperError> {
    let normalized = raw.replace(' ', "-");
    if normalized.is_empty() {
        return Err(HelperError::format("description cannot be empty"));
    }
    if normalized.chars().count() > max_len {
        return Err(HelperError::format(format!(
            "description too long (max {max_len} characters after formatting)"
        )));
    }
    Ok(normalized)
}

/// Prompt check for the branch description.
///
/// # Errors
/// See [`validate_description`].
pub fn check_branch_description(raw: &str) -> Result<String, HelperError> {
    validate_description(raw, BRANCH_DESCRIPTION_MAX)
}

/// Prompt check for the commit description. The accepted value is the text as
/// typed; only its length is checked.
///
/// # Errors
/// See [`validate_description`].
pub fn check_commit_description(raw: &str) -> Result<String, HelperError> {
    validate_description(raw, COMMIT_DESCRIPTION_MAX).map(|_| raw.to_string())
}

/// Accepts `LETTERS-DIGITS` verbatim, e.g. `CPRE-11347`.
///
/// # Errors
/// Returns [`HelperError::Format`] when the pattern does not match.
pub fn validate_ticket_id(raw: &str) -> Result<String, HelperError> {
    if TICKET_ID.is_match(raw) {
        Ok(raw.to_string())
    } else {
        Err(HelperError::format("ticket ID must be in format ABC-123"))
    }
}

/// Accepts exactly two ASCII letters, case preserved.
///
/// # Errors
/// Returns [`HelperError::Format`] when the input is not two letters.
pub fn validate_abbreviation(raw: &str) -> Result<String, HelperError> {
    if ABBREVIATION.is_match(raw) {
        Ok(raw.to_string())
    } else {
        Err(HelperError::format("abbreviation must be exactly two letters"))
    }
}

/// `lower(abbrev)-type-lower(description)/ticket_id`; the ticket keeps its case.
#[must_use]
pub fn assemble_branch_name(
    abbreviation: &str,
    branch_type: ChangeType,
    description: &str,
    ticket_id: &str,
) -> String {
    format!(
        "{}-{}-{}/{}",
        abbreviation.to_lowercase(),
        branch_type,
        description.to_lowercase(),
        ticket_id
    )
}

/// Closing verb for the second commit line.
#[must_use]
pub fn commit_verb(commit_type: &str) -> String {
    match commit_type {
        "fix" => "Fixes".to_string(),
        "feat" => "Closes".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Builds `("type(product): description", "<Verb> ticket_id")`.
#[must_use]
pub fn assemble_commit_messages(
    commit_type: &str,
    product: &str,
    description: &str,
    ticket_id: &str,
) -> (String, String) {
    (
        format!("{commit_type}({product}): {description}"),
        format!("{} {}", commit_verb(commit_type), ticket_id),
    )
}

/// Fields collected by the branch session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSpec {
    pub abbreviation: String,
    pub branch_type: ChangeType,
    /// Already hyphenated
    pub description: String,
    pub ticket_id: String,
}

impl BranchSpec {
    #[must_use]
    pub fn branch_name(&self) -> String {
        assemble_branch_name(
            &self.abbreviation,
            self.branch_type,
            &self.description,
            &self.ticket_id,
        )
    }
}

/// Fields collected by the commit session; `ticket_id` comes from the branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSpec {
    pub commit_type: ChangeType,
    pub product: Product,
    pub description: String,
    pub ticket_id: String,
}

impl CommitSpec {
    #[must_use]
    pub fn messages(&self) -> (String, String) {
        assemble_commit_messages(
            self.commit_type.as_str(),
            self.product.as_str(),
            &self.description,
            &self.ticket_id,
        )
    }
}
