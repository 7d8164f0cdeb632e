use anyhow::Result;
use inquire::{Confirm, CustomUserError, InquireError, Select, Text, validator::Validation};
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::HelperError;

/// Input check run on every submission; `Ok` carries the accepted value
pub type CheckFn = fn(&str) -> Result<String, HelperError>;

/// Trait for providing interactive prompts
/// This allows us to abstract away the terminal for testing
pub trait Prompter {
    /// Present a single-choice menu and return the chosen label
    ///
    /// # Errors
    /// Returns an error if the prompt fails or the user cancels
    fn select(&self, prompt: &str, options: Vec<String>) -> Result<String>;

    /// Ask for free text, re-prompting in place until `check` accepts it.
    /// Returns the value `check` produced.
    ///
    /// # Errors
    /// Returns an error if the prompt fails or the user cancels
    fn text(&self, prompt: &str, check: CheckFn) -> Result<String>;

    /// Ask a yes/no question
    ///
    /// # Errors
    /// Returns an error if the prompt fails or the user cancels
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Real implementation using inquire for production use
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select(&self, prompt: &str, options: Vec<String>) -> Result<String> {
        let selection = Select::new(prompt, options)
            .with_vim_mode(true)
            .prompt()
            .map_err(map_inquire_error)?;
        Ok(selection)
    }

    fn text(&self, prompt: &str, check: CheckFn) -> Result<String> {
        let raw = Text::new(prompt)
            .with_validator(move |input: &str| {
                Ok::<Validation, CustomUserError>(match check(input) {
                    Ok(_) => Validation::Valid,
                    Err(e) => Validation::Invalid(e.to_string().into()),
                })
            })
            .prompt()
            .map_err(map_inquire_error)?;

        // The validator already accepted this input
        Ok(check(&raw)?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::new(prompt)
            .with_default(default)
            .prompt()
            .map_err(map_inquire_error)?;
        Ok(answer)
    }
}

fn map_inquire_error(err: InquireError) -> anyhow::Error {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            HelperError::Cancelled.into()
        }
        other => anyhow::Error::new(other).context("Interactive prompt failed"),
    }
}

/// Answer queued on a [`ScriptedPrompter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Choice(String),
    Text(String),
    Confirm(bool),
    /// Behaves like the user pressing Escape
    Cancel,
}

/// Mock implementation for testing that replays predetermined answers
///
/// Text answers rejected by the prompt's check are recorded and the next
/// queued answer is tried, the same way the terminal re-prompts in place.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    prompts: RefCell<Vec<String>>,
    rejections: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Every prompt message shown, in order
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    /// Validation messages produced for rejected text answers
    #[must_use]
    pub fn rejections(&self) -> Vec<String> {
        self.rejections.borrow().clone()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, prompt: &str) -> Result<Answer> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(Answer::Cancel) => Err(HelperError::Cancelled.into()),
            Some(answer) => Ok(answer),
            None => anyhow::bail!("No scripted answer left for prompt '{}'", prompt),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, options: Vec<String>) -> Result<String> {
        match self.next(prompt)? {
            Answer::Choice(choice) if options.contains(&choice) => Ok(choice),
            Answer::Choice(choice) => {
                anyhow::bail!("Scripted choice '{}' not found in options", choice)
            }
            other => anyhow::bail!("Expected a choice for '{}', got {:?}", prompt, other),
        }
    }

    fn text(&self, prompt: &str, check: CheckFn) -> Result<String> {
        loop {
            match self.next(prompt)? {
                Answer::Text(input) => match check(&input) {
                    Ok(value) => return Ok(value),
                    Err(e) => self.rejections.borrow_mut().push(e.to_string()),
                },
                other => anyhow::bail!("Expected text for '{}', got {:?}", prompt, other),
            }
        }
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(answer) => Ok(answer),
            other => anyhow::bail!("Expected yes/no for '{}', got {:?}", prompt, other),
        }
    }
}
