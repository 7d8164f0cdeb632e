use clap::{CommandFactory, Parser, Subcommand};
use git_helper::Result;
use git_helper::commands::completions::{self, Shell};
use git_helper::commands::{config, create_branch, create_commit, show_config};
use git_helper::error::is_cancellation;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `GIT_HELPER_LOG=debug`
const LOG_ENV: &str = "GIT_HELPER_LOG";

#[derive(Parser)]
#[command(name = "git-helper")]
#[command(about = "Create branches and commits that follow the team's git conventions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set or update your two-letter abbreviation used in branch names
    Config {
        /// Abbreviation to store; prompts when omitted
        abbreviation: Option<String>,
    },
    /// Display the current configuration
    ShowConfig,
    /// Create and switch to a new branch following the naming convention
    ///
    /// Branches are named <abbreviation>-<type>-<short_desc>/<ticket_id>,
    /// for example lv-fix-user-details-window-width/CPRE-11347
    CreateBranch,
    /// Create a commit for the staged changes following the message convention
    ///
    /// The commit gets two messages: "<type>(<product>): <description>" and
    /// "<Fixes|Closes> <ticket_id>", with the ticket taken from the branch name
    CreateCommit,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Config { abbreviation } => config::configure(abbreviation.as_deref()),
        Commands::ShowConfig => show_config::show_config(),
        Commands::CreateBranch => create_branch::create_branch(),
        Commands::CreateCommit => create_commit::create_commit(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            completions::generate_completions(shell, &mut cmd);
            Ok(())
        }
    };

    match result {
        Err(e) if is_cancellation(&e) => {
            println!("Operation cancelled.");
            Ok(())
        }
        other => other,
    }
}
