//! Password recovery commands

use crate::api::ResetPasswordRequest;
use crate::audit::AuditEvent;
use crate::cli::args::{ForgotPasswordArgs, ResetPasswordArgs};
use crate::cli::{next_step, secret_or_prompt, text_or_prompt, with_spinner, AppContext};
use crate::error::AgrowResult;
use crate::routes::Route;
use crate::ui;
use crate::validate;

/// Request a reset code for the account's phone number
pub async fn forgot(args: ForgotPasswordArgs, app: &AppContext) -> AgrowResult<()> {
    let ctx = &app.ui;
    ui::intro(ctx, "Forgot Password");

    let phone = text_or_prompt(ctx, args.phone, "Phone number").await?;
    let phone = validate::recovery_phone(&phone, &app.config.account.default_country_code)?;

    with_spinner(
        ctx,
        "Sending code...",
        "Reset code sent to your phone",
        app.session.api().forgot_password(&phone),
    )
    .await?;

    app.audit.record(AuditEvent::ResetRequested).await;

    ui::remark(
        ctx,
        &format!("Next: agrowmart reset-password --phone {}", phone),
    );
    Ok(())
}

/// Set a new password using the code sent by SMS
pub async fn reset(args: ResetPasswordArgs, app: &AppContext) -> AgrowResult<()> {
    let ctx = &app.ui;
    ui::intro(ctx, "Reset Password");

    let phone = text_or_prompt(ctx, args.phone, "Phone number").await?;
    let phone = validate::recovery_phone(&phone, &app.config.account.default_country_code)?;
    let code = text_or_prompt(ctx, args.code, "Code you received").await?;
    let new_password = secret_or_prompt(ctx, args.new_password, "New password").await?;
    validate::validate_reset(&code, &new_password)?;

    let request = ResetPasswordRequest {
        phone,
        code: code.trim().to_string(),
        new_password,
    };

    with_spinner(
        ctx,
        "Resetting password...",
        "Password reset successfully.",
        app.session.api().reset_password(&request),
    )
    .await?;

    app.audit.record(AuditEvent::PasswordReset).await;

    next_step(ctx, Route::Login);
    Ok(())
}
