//! Status command - show the current session

use crate::cli::args::{OutputFormat, StatusArgs};
use crate::cli::AppContext;
use crate::error::AgrowResult;
use crate::session::{RefreshOutcome, SessionState};
use crate::ui;

/// Execute the status command
pub async fn execute(args: StatusArgs, app: &AppContext) -> AgrowResult<()> {
    let session = &app.session;
    let state = session.state().await;
    let display_name = session.display_name().await;
    let remembered = session.remembered_login().await;
    let persistent = session.has_refresh_credential().await;

    if args.format == OutputFormat::Json {
        let report = serde_json::json!({
            "state": state,
            "user": display_name,
            "restored": app.startup.label(),
            "persistent": persistent,
            "remembered": remembered.as_ref().map(|r| r.identifier.value()),
            "api_url": app.config.api.base_url,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let ctx = &app.ui;
    ui::intro(ctx, "AgrowMart Naturals");

    let authenticated = state == SessionState::Authenticated;
    ui::key_value_status(ctx, "Session", &state.to_string(), authenticated);
    if let Some(name) = &display_name {
        ui::key_value(ctx, "Signed in as", name);
    }

    match &app.startup {
        RefreshOutcome::Refreshed => ui::step_info(ctx, "Session restored from saved login"),
        RefreshOutcome::Failed(reason) => ui::step_warn_hint(
            ctx,
            &format!("Saved login could not be used ({})", reason),
            "Run: agrowmart login",
        ),
        RefreshOutcome::AlreadyActive | RefreshOutcome::NoRefreshCredential => {}
    }

    ui::key_value(
        ctx,
        "Stay signed in",
        if persistent { "yes" } else { "no" },
    );
    if let Some(remembered) = &remembered {
        ui::key_value(
            ctx,
            &format!("Remembered {}", remembered.identifier.kind()),
            remembered.identifier.value(),
        );
    }
    ui::key_value(ctx, "API", &app.config.api.base_url);

    if !authenticated {
        ui::remark(ctx, "Run: agrowmart login");
    }
    Ok(())
}
