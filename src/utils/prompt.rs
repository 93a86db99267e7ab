use crate::error::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};

/// Source of connection parameters that were not configured up front.
pub trait CredentialPrompt {
    fn ask(&self, label: &str) -> Result<String>;
    fn ask_secret(&self, label: &str) -> Result<String>;
}

/// Asks on the controlling terminal. The password is read without echo.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialPrompt for TerminalPrompt {
    fn ask(&self, label: &str) -> Result<String> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .interact_text()?;
        Ok(value)
    }

    fn ask_secret(&self, label: &str) -> Result<String> {
        let value = Password::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()?;
        Ok(value)
    }
}
