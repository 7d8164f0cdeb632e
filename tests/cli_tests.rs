//! CLI integration tests
//!
//! These tests run the built binary against a temporary repository and an
//! isolated configuration directory. Interactive prompts need a terminal, so
//! only the paths that finish or fail before prompting are exercised here; the
//! prompt-driven sessions are covered by the scripted unit tests.

use anyhow::Result;
use assert_fs::prelude::*;
use predicates::prelude::*;

use test_support::CliTestEnvironment;

fn get_stdout(env: &CliTestEnvironment, args: &[&str]) -> Result<String> {
    let assert_output = env.run_command(args)?.assert().success();
    let output = assert_output.get_output();
    Ok(String::from_utf8(output.stdout.clone())?)
}

// ==================== HELP ====================

#[test]
fn test_help_lists_subcommands() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    let output = get_stdout(&env, &["--help"])?;
    for subcommand in ["config", "show-config", "create-branch", "create-commit"] {
        assert!(
            output.contains(subcommand),
            "help should mention {}",
            subcommand
        );
    }

    Ok(())
}

#[test]
fn test_create_branch_help_shows_convention() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    env.run_command(&["create-branch", "--help"])?
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<abbreviation>-<type>-<short_desc>/<ticket_id>",
        ));

    Ok(())
}

// ==================== CONFIG ====================

#[test]
fn test_show_config_when_unconfigured() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    let output = get_stdout(&env, &["show-config"])?;
    assert!(output.contains("No configuration found"));
    env.config_dir.assert(predicate::path::missing());

    Ok(())
}

#[test]
fn test_config_then_show_config() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    env.run_command(&["config", "DS"])?
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved successfully!"));

    env.config_file()
        .assert(predicate::str::contains("abbreviation = \"DS\""));

    let output = get_stdout(&env, &["show-config"])?;
    assert!(output.contains("Current Configuration:"));
    assert!(output.contains("Two-letter Abbreviation: DS"));

    Ok(())
}

#[test]
fn test_config_overwrites_previous_value() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    env.run_command(&["config", "ab"])?.assert().success();
    env.run_command(&["config", "CD"])?.assert().success();

    let output = get_stdout(&env, &["show-config"])?;
    assert!(output.contains("Two-letter Abbreviation: CD"));

    Ok(())
}

#[test]
fn test_config_rejects_invalid_abbreviation() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    for invalid in ["d5", "abc", "x"] {
        env.run_command(&["config", invalid])?
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "abbreviation must be exactly two letters",
            ));
    }
    env.config_file().assert(predicate::path::missing());

    Ok(())
}

#[test]
fn test_show_config_tolerates_unknown_fields() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.write_config("abbreviation = \"lv\"\ntheme = \"dark\"\n")?;

    let output = get_stdout(&env, &["show-config"])?;
    assert!(output.contains("Two-letter Abbreviation: lv"));

    Ok(())
}

#[test]
fn test_show_config_reports_malformed_file() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.write_config("abbreviation = \n")?;

    env.run_command(&["show-config"])?
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration file"));

    Ok(())
}

#[test]
fn test_show_config_rejects_hand_edited_abbreviation() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.write_config("abbreviation = \"d5x\"\n")?;

    env.run_command(&["show-config"])?
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly two letters"));

    env.run_command(&["create-branch"])?
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly two letters"));
    assert_eq!(env.git(&["rev-parse", "--abbrev-ref", "HEAD"])?, "main");

    Ok(())
}

// ==================== PRECONDITIONS ====================

#[test]
fn test_create_branch_requires_configuration() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    env.run_command(&["create-branch"])?
        .assert()
        .failure()
        .stderr(predicate::str::contains("no configuration found"));

    // Still on the original branch
    assert_eq!(env.git(&["rev-parse", "--abbrev-ref", "HEAD"])?, "main");

    Ok(())
}

#[test]
fn test_create_branch_outside_repository() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.write_config("abbreviation = \"ds\"\n")?;

    env.run_command_in(env.outside_dir.path(), &["create-branch"])?
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to find git repository"));

    Ok(())
}

#[test]
fn test_create_commit_requires_staged_changes() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.git(&["checkout", "-b", "ds-fix-header/CPRE-1"])?;

    // Unstaged edits do not count
    env.repo_dir.child("README.md").write_str("# Changed")?;

    env.run_command(&["create-commit"])?
        .assert()
        .failure()
        .stderr(predicate::str::contains("no staged changes found"));

    assert_eq!(env.git(&["rev-list", "--count", "HEAD"])?, "1");

    Ok(())
}

#[test]
fn test_create_commit_outside_repository() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    env.run_command_in(env.outside_dir.path(), &["create-commit"])?
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to find git repository"));

    Ok(())
}

// ==================== COMPLETIONS ====================

#[test]
fn test_completions_generate_for_each_shell() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    for shell in ["bash", "zsh", "fish"] {
        let output = get_stdout(&env, &["completions", shell])?;
        assert!(output.contains("create-commit"), "{} completions", shell);
    }

    Ok(())
}
