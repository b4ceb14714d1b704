//! Login command - authenticate and store credentials

use crate::api::{Identifier, LoginCredentials};
use crate::audit::AuditEvent;
use crate::cli::args::LoginArgs;
use crate::cli::{next_step, secret_or_prompt, with_spinner, AppContext};
use crate::error::AgrowResult;
use crate::routes::Route;
use crate::ui;
use crate::validate::ValidationError;

/// Execute the login command
pub async fn execute(args: LoginArgs, app: &AppContext) -> AgrowResult<()> {
    let ctx = &app.ui;
    ui::intro(ctx, "Login");

    let remembered = app.session.remembered_login().await;

    let identifier = if args.email.is_some() || args.phone.is_some() {
        Identifier::from_input(args.email.as_deref(), args.phone.as_deref())?
    } else {
        let remembered = remembered.as_ref().map(|r| &r.identifier);
        let entered = ui::input(
            ctx,
            "Phone number or email",
            remembered.map(Identifier::value),
        )
        .await?;
        if entered.is_none() {
            if let Some(id) = remembered {
                ui::step_info(ctx, &format!("Using remembered {} {}", id.kind(), id.value()));
            }
        }
        choose_identifier(entered.as_deref(), remembered)?
    };

    let password = secret_or_prompt(ctx, args.password, "Password").await?;
    let credentials = LoginCredentials::from_parts(identifier, &password)?;

    // Stay signed in when asked to, or when the last login did
    let persist = if args.remember {
        true
    } else if args.no_remember {
        false
    } else {
        remembered.is_some()
    };

    let user = with_spinner(
        ctx,
        "Logging in...",
        "Login Successful!",
        app.session.login(&credentials, persist),
    )
    .await?;

    app.audit
        .record(AuditEvent::Login {
            identifier: credentials.identifier.kind(),
            persist,
        })
        .await;

    ui::key_value(ctx, "Signed in as", &user.display_name());
    if persist {
        ui::remark(ctx, "You will stay signed in on this device");
    }
    next_step(ctx, Route::Home);
    Ok(())
}

/// Identifier typed at the prompt, or the remembered one when nobody could
/// be asked
fn choose_identifier(
    entered: Option<&str>,
    remembered: Option<&Identifier>,
) -> Result<Identifier, ValidationError> {
    match (entered.map(str::trim), remembered) {
        (Some(entered), _) if entered.contains('@') => Identifier::from_input(Some(entered), None),
        (Some(entered), _) => Identifier::from_input(None, Some(entered)),
        (None, Some(remembered)) => Ok(remembered.clone()),
        (None, None) => Err(ValidationError::MissingIdentifier),
    }
}
