//! Signup command - create an account

use crate::api::SignupForm;
use crate::audit::AuditEvent;
use crate::cli::args::SignupArgs;
use crate::cli::{next_step, secret_or_prompt, text_or_prompt, with_spinner, AppContext};
use crate::error::AgrowResult;
use crate::routes::Route;
use crate::ui;

/// Execute the signup command
pub async fn execute(args: SignupArgs, app: &AppContext) -> AgrowResult<()> {
    let ctx = &app.ui;
    ui::intro(ctx, "Sign Up");

    let first_name = text_or_prompt(ctx, args.first_name, "First name").await?;
    let last_name = text_or_prompt(ctx, args.last_name, "Last name").await?;
    let phone = text_or_prompt(ctx, args.phone, "Phone number").await?;
    let email = text_or_prompt(ctx, args.email, "Email (optional)").await?;
    let password = secret_or_prompt(ctx, args.password, "Password").await?;
    let confirm_password = match args.confirm_password {
        Some(confirm) => confirm,
        None if ctx.is_interactive() => secret_or_prompt(ctx, None, "Confirm password").await?,
        None => password.clone(),
    };

    let form = SignupForm {
        first_name,
        last_name,
        phone,
        email,
        password,
        confirm_password,
    };
    let request = form.validate()?;

    with_spinner(
        ctx,
        "Creating account...",
        "Sign Up Successful!",
        app.session.api().signup(&request),
    )
    .await?;

    app.audit
        .record(AuditEvent::Signup {
            with_email: request.email.is_some(),
        })
        .await;

    next_step(ctx, Route::Login);
    Ok(())
}
