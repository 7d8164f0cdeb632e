pub mod completions;
pub mod config;
pub mod create_branch;
pub mod create_commit;
pub mod show_config;
