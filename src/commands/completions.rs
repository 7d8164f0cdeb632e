use clap::{Command, ValueEnum};
use clap_complete::{Shell as CompleteShell, generate};
use std::io::{self, Write};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl From<Shell> for CompleteShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompleteShell::Bash,
            Shell::Zsh => CompleteShell::Zsh,
            Shell::Fish => CompleteShell::Fish,
        }
    }
}

/// Generate native shell completions using clap
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut io::stdout());
}

pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(CompleteShell::from(shell), cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_command() -> Command {
        Command::new("git-helper")
            .subcommand(Command::new("create-branch"))
            .subcommand(Command::new("show-config"))
    }

    #[test]
    fn test_completions_mention_subcommands() -> anyhow::Result<()> {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let mut buffer = Vec::new();
            write_completions(shell, &mut sample_command(), &mut buffer);
            let script = String::from_utf8(buffer)?;
            assert!(script.contains("create-branch"), "{shell:?} script");
            assert!(script.contains("show-config"), "{shell:?} script");
        }
        Ok(())
    }
}
