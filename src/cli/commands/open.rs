//! Open command - list pages or resolve one through the access guard

use crate::cli::args::OpenArgs;
use crate::cli::{command_for, AppContext};
use crate::error::{AgrowError, AgrowResult};
use crate::routes::{guard, Navigation, Route};
use crate::session::SessionState;
use crate::ui;
use console::style;

/// Execute the open command
pub async fn execute(args: OpenArgs, app: &AppContext) -> AgrowResult<()> {
    let authenticated = app.session.state().await == SessionState::Authenticated;

    let Some(path) = args.path else {
        print_table();
        return Ok(());
    };

    let route =
        Route::parse(&path).ok_or_else(|| AgrowError::User(format!("No page at {}", path)))?;
    let ctx = &app.ui;

    match guard(route, authenticated) {
        Navigation::Redirect(target) => {
            ui::step_warn_hint(
                ctx,
                &format!("{} requires login, redirecting to {}", route, target),
                "Run: agrowmart login",
            );
        }
        Navigation::Render(route) => {
            ui::step_ok(ctx, route.title());
            if route.shows_navbar() {
                if let Some(name) = app.session.display_name().await {
                    ui::key_value(ctx, "Signed in as", &name);
                }
            }
            match command_for(route) {
                Some(command) => ui::remark(ctx, &format!("Run: agrowmart {}", command)),
                None => ui::remark(ctx, "The AgrowMart app is coming soon. Stay tuned!"),
            }
        }
    }
    Ok(())
}

fn print_table() {
    println!(
        "{:<18} {:<28} {:<10} {}",
        style("PATH").bold(),
        style("PAGE").bold(),
        style("ACCESS").bold(),
        style("COMMAND").bold()
    );
    for route in Route::ALL {
        let access = if route.requires_auth() {
            "login"
        } else {
            "public"
        };
        println!(
            "{:<18} {:<28} {:<10} {}",
            route.path(),
            route.title(),
            access,
            command_for(route).unwrap_or("-")
        );
    }
}
