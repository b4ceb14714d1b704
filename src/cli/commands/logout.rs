//! Logout command - end the session

use crate::audit::AuditEvent;
use crate::cli::args::LogoutArgs;
use crate::cli::{next_step, AppContext};
use crate::error::AgrowResult;
use crate::routes::Route;
use crate::ui;

/// Execute the logout command
pub async fn execute(args: LogoutArgs, app: &AppContext) -> AgrowResult<()> {
    let ctx = &app.ui;

    app.session.logout().await;
    if !args.keep_remembered {
        app.session.forget().await;
    }

    app.audit
        .record(AuditEvent::Logout {
            forget: !args.keep_remembered,
        })
        .await;

    ui::step_ok(ctx, "Logged out");
    next_step(ctx, Route::Login);
    Ok(())
}
