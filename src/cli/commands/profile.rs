//! Profile command - view, edit or delete the signed-in account

use crate::audit::AuditEvent;
use crate::cli::args::{OutputFormat, ProfileAction, ProfileArgs, ProfileUpdateArgs};
use crate::cli::{next_step, text_or_prompt, with_spinner, AppContext};
use crate::error::{AgrowError, AgrowResult};
use crate::profile::{suggest_locations, ProfileEdit, ProfileService, ReverseGeocoder};
use crate::routes::Route;
use crate::ui;
use crate::validate::{self, ValidationError};

/// Execute the profile command
pub async fn execute(args: ProfileArgs, app: &AppContext) -> AgrowResult<()> {
    match args.action {
        None => show(OutputFormat::Text, app).await,
        Some(ProfileAction::Show { format }) => show(format, app).await,
        Some(ProfileAction::Update(update)) => update_profile(update, app).await,
        Some(ProfileAction::Delete { phone, yes }) => delete(phone, yes, app).await,
        Some(ProfileAction::Cities { prefix }) => {
            cities(prefix.as_deref().unwrap_or_default());
            Ok(())
        }
    }
}

async fn show(format: OutputFormat, app: &AppContext) -> AgrowResult<()> {
    let service = ProfileService::new(&app.session);
    let profile = service.fetch().await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    let ctx = &app.ui;
    ui::intro(ctx, "Your Profile");
    let shown = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };
    ui::key_value(ctx, "First name", &shown(&profile.first_name));
    ui::key_value(ctx, "Last name", &shown(&profile.last_name));
    ui::key_value(ctx, "Email", &shown(&profile.email));
    ui::key_value(ctx, "Location", &shown(&profile.location));
    ui::key_value(ctx, "Picture", &shown(&profile.profile_image));
    Ok(())
}

async fn update_profile(args: ProfileUpdateArgs, app: &AppContext) -> AgrowResult<()> {
    let ctx = &app.ui;

    if let Some(email) = args.email.as_deref().map(str::trim) {
        if !email.is_empty() && !validate::is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
    }

    let mut location = args.location;
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        let geocoder = ReverseGeocoder::from_config(&app.config.profile);
        match geocoder.locate(lat, lon).await {
            Some(place) => {
                ui::step_info(ctx, &format!("Location detected: {}", place));
                location = Some(place);
            }
            None => ui::step_warn(ctx, "Could not detect a location; keeping the current one"),
        }
    }

    let edit = ProfileEdit {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        location,
        profile_picture: args.picture,
    };
    if edit.is_empty() {
        return Err(AgrowError::User(
            "Nothing to update. Pass at least one field, e.g. --location Pune".to_string(),
        ));
    }

    let service = ProfileService::new(&app.session);
    let sent = with_spinner(
        ctx,
        "Saving profile...",
        "Profile updated successfully!",
        service.edit(&edit),
    )
    .await?;

    app.audit
        .record(AuditEvent::ProfileUpdated {
            picture: sent.profile_picture.is_some(),
        })
        .await;

    ui::key_value(ctx, "Name", format!("{} {}", sent.first_name, sent.last_name).trim());
    if !sent.location.is_empty() {
        ui::key_value(ctx, "Location", &sent.location);
    }
    Ok(())
}

async fn delete(phone: Option<String>, yes: bool, app: &AppContext) -> AgrowResult<()> {
    let ctx = &app.ui;
    ui::intro(ctx, "Delete Account");

    // Refuse before asking anything when nobody is signed in
    if app.session.access_token().await.is_none() {
        return Err(AgrowError::NotAuthenticated);
    }

    let phone = text_or_prompt(ctx, phone, "Enter your phone number to confirm").await?;
    if phone.trim().is_empty() {
        ui::step_warn(ctx, "Account deletion cancelled");
        return Ok(());
    }

    let confirmed = ui::confirm(
        &ctx.clone().with_auto_yes(yes),
        "Are you sure you want to delete your account? This cannot be undone.",
        false,
    )
    .await?;
    if !confirmed {
        ui::step_warn_hint(ctx, "Account deletion cancelled", "Pass --yes to confirm");
        return Ok(());
    }

    let service = ProfileService::new(&app.session);
    with_spinner(
        ctx,
        "Deleting account...",
        "Account deleted successfully.",
        service.delete_account(&phone),
    )
    .await?;

    app.audit.record(AuditEvent::AccountDeleted).await;

    next_step(ctx, Route::Home);
    Ok(())
}

fn cities(prefix: &str) {
    for city in suggest_locations(prefix) {
        println!("{}", city);
    }
}
