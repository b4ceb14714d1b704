//! Interactive prompts with a non-interactive fallback
//!
//! Prompts run on the blocking pool so the runtime keeps servicing other
//! work while waiting on the terminal.

use super::context::UiContext;
use crate::error::{AgrowError, AgrowResult};

async fn interact<T, F>(prompt: F) -> AgrowResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> std::io::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(prompt)
        .await
        .map_err(|e| AgrowError::User(format!("Prompt task failed: {}", e)))?
        .map_err(|e| AgrowError::User(format!("Prompt failed: {}", e)))
}

/// Ask a yes/no question. Returns `default` when nobody can answer.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> AgrowResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    interact(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
}

/// Ask for a line of text. `None` when running non-interactively.
pub async fn input(
    ctx: &UiContext,
    message: &str,
    initial: Option<&str>,
) -> AgrowResult<Option<String>> {
    if !ctx.is_interactive() {
        return Ok(None);
    }

    let message = message.to_string();
    let initial = initial.map(str::to_string);
    let value = interact(move || {
        let mut prompt = cliclack::input(&message);
        if let Some(initial) = initial {
            prompt = prompt.default_input(&initial);
        }
        prompt.interact::<String>()
    })
    .await?;

    Ok(Some(value))
}

/// Ask for a secret without echoing it. `None` when running non-interactively.
pub async fn password(ctx: &UiContext, message: &str) -> AgrowResult<Option<String>> {
    if !ctx.is_interactive() {
        return Ok(None);
    }

    let message = message.to_string();
    let value = interact(move || cliclack::password(&message).mask('▪').interact()).await?;
    Ok(Some(value))
}
