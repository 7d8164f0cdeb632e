use crate::error::HelperError;
use crate::naming::validate_ticket_id;

/// Separator between the descriptive part of a branch and its ticket id
pub const TICKET_SEPARATOR: char = '/';

/// Extracts the ticket id from a branch name such as `ds-fix-header/CPRE-123`.
///
/// The last `/`-separated segment is the candidate. A branch without a
/// separator is its own candidate and goes through the same pattern check.
///
/// # Errors
/// Returns [`HelperError::Format`] when the candidate is not `LETTERS-DIGITS`.
pub fn extract_ticket(branch_name: &str) -> Result<String, HelperError> {
    let candidate = branch_name
        .rsplit(TICKET_SEPARATOR)
        .next()
        .unwrap_or(branch_name);

    validate_ticket_id(candidate).map_err(|_| {
        HelperError::format(format!(
            "extracted ticket ID '{candidate}' from branch '{branch_name}' does not match expected pattern ABC-123"
        ))
    })
}
