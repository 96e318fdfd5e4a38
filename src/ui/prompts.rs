//! Prompts that degrade to defaults outside a terminal

use super::context::UiContext;
use crate::error::{RosterError, RosterResult};

/// Ask a yes/no question; non-interactive runs take `default`
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> RosterResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| RosterError::User(format!("Prompt task failed: {}", e)))?
    .map_err(|e| RosterError::User(format!("Prompt failed: {}", e)))
}

/// Ask for a line of text
///
/// Outside a terminal there is nobody to ask: `current` is returned if set,
/// otherwise the caller gets `None` and must report the missing value.
pub async fn input(
    ctx: &UiContext,
    message: &str,
    placeholder: &str,
    current: Option<&str>,
) -> RosterResult<Option<String>> {
    if !ctx.is_interactive() {
        return Ok(current.map(str::to_string));
    }

    let message = message.to_string();
    let placeholder = placeholder.to_string();
    let current = current.map(str::to_string);

    let value: String = tokio::task::spawn_blocking(move || {
        let mut prompt = cliclack::input(&message).placeholder(&placeholder);
        if let Some(ref current) = current {
            prompt = prompt.default_input(current);
        }
        prompt.interact()
    })
    .await
    .map_err(|e| RosterError::User(format!("Prompt task failed: {}", e)))?
    .map_err(|e| RosterError::User(format!("Prompt failed: {}", e)))?;

    let value = value.trim().to_string();
    Ok((!value.is_empty()).then_some(value))
}
