//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};

use crate::audit::{AuditEvent, AuditLog};
use crate::config::Config;
use crate::error::AgrowResult;
use crate::routes::Route;
use crate::session::{RefreshOutcome, SessionManager};
use crate::ui::{self, TaskSpinner, UiContext};
use std::future::Future;

/// Everything a command needs, built once per invocation
pub struct AppContext {
    pub config: Config,
    pub session: SessionManager,
    pub audit: AuditLog,
    pub ui: UiContext,
    /// What happened when the session was restored at startup
    pub startup: RefreshOutcome,
}

impl AppContext {
    /// Open the session and try to restore it from the refresh credential
    pub async fn start(config: Config) -> AgrowResult<Self> {
        let session = SessionManager::open(&config).await?;
        let audit = AuditLog::new(&config);

        let startup = session.ensure_session().await;
        if matches!(startup, RefreshOutcome::Refreshed | RefreshOutcome::Failed(_)) {
            audit
                .record(AuditEvent::Refresh {
                    outcome: startup.label(),
                })
                .await;
        }

        Ok(Self {
            config,
            session,
            audit,
            ui: UiContext::detect(),
            startup,
        })
    }
}

/// Command that shows a given page
pub fn command_for(route: Route) -> Option<&'static str> {
    match route {
        Route::Home => Some("status"),
        Route::GetAppSoon => None,
        Route::Signup => Some("signup"),
        Route::Login => Some("login"),
        Route::ForgotPassword => Some("forgot-password"),
        Route::Profile => Some("profile show"),
    }
}

/// Tell the user where the flow continues
pub(crate) fn next_step(ctx: &UiContext, route: Route) {
    if let Some(command) = command_for(route) {
        ui::remark(
            ctx,
            &format!("Next: {} (agrowmart {})", route.title(), command),
        );
    }
}

/// Run `work` behind a spinner; success prints `done`, failure is left to
/// the caller's error reporting.
pub(crate) async fn with_spinner<T, F>(
    ctx: &UiContext,
    message: &str,
    done: &str,
    work: F,
) -> AgrowResult<T>
where
    F: Future<Output = AgrowResult<T>>,
{
    let mut spinner = TaskSpinner::new(ctx);
    spinner.start(message);
    match work.await {
        Ok(value) => {
            spinner.stop(done);
            Ok(value)
        }
        Err(e) => {
            spinner.clear();
            Err(e)
        }
    }
}

/// Use a flag value, or ask for it. Empty when neither is possible.
pub(crate) async fn text_or_prompt(
    ctx: &UiContext,
    given: Option<String>,
    label: &str,
) -> AgrowResult<String> {
    match given {
        Some(value) => Ok(value),
        None => Ok(ui::input(ctx, label, None).await?.unwrap_or_default()),
    }
}

/// Use a secret flag value, or ask for it without echo
pub(crate) async fn secret_or_prompt(
    ctx: &UiContext,
    given: Option<String>,
    label: &str,
) -> AgrowResult<String> {
    match given {
        Some(value) => Ok(value),
        None => Ok(ui::password(ctx, label).await?.unwrap_or_default()),
    }
}
