use anyhow::Result;

/// Trait for Git operations to enable mocking in tests
pub trait GitOperations {
    /// Short name of the checked-out branch (`HEAD` when detached)
    fn current_branch(&self) -> Result<String>;
    fn has_staged_changes(&self) -> Result<bool>;
    /// Create `name` from HEAD and switch to it
    fn create_branch(&self, name: &str) -> Result<()>;
    /// Commit the index with a subject line and a body line
    fn commit(&self, subject: &str, body: &str) -> Result<()>;
}
