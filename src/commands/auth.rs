use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use super::password_or_prompt;
use crate::banner::Banner;
use crate::cli::{LoginArgs, RegisterArgs, ResetPasswordArgs};
use crate::client::{Credentials, PasswordReset, Registration, TaskboardClient};
use crate::error::{Result, TaskboardError};
use crate::jwt;
use crate::output;
use crate::session::SessionStore;
use crate::types::{Role, User};
use crate::validation::{self, LoginForm, RegisterForm, ResetPasswordForm};

pub async fn register(client: &TaskboardClient, args: RegisterArgs) -> Result<()> {
    let password = password_or_prompt(args.password, "Password")?;
    let form = RegisterForm {
        full_name: args.full_name,
        email: args.email,
        password,
        role: args.role,
    };
    form.validate()?;

    // validate() guarantees the role is present
    let role = form.role.ok_or_else(|| TaskboardError::Validation("Role is required".into()))?;
    client
        .register(&Registration {
            full_name: form.full_name.trim(),
            email: form.email.trim(),
            password: &form.password,
            role,
        })
        .await
        .map_err(|e| e.or_message("Registration failed"))?;

    info!(email = %form.email.trim(), "registered");
    output::print_banner(&Banner::success(
        "Registration successful! Please check your email to activate your account.",
    ));
    Ok(())
}

pub async fn resend_activation(client: &TaskboardClient, email: &str) -> Result<()> {
    validation::require_email(email)?;
    client
        .resend_activation(email.trim())
        .await
        .map_err(|e| e.or_message("Failed to resend activation link."))?;

    output::print_banner(&Banner::success(
        "Activation link has been resent to your email.",
    ));
    Ok(())
}

pub async fn login(client: &TaskboardClient, store: &SessionStore, args: LoginArgs) -> Result<()> {
    let password = password_or_prompt(args.password, "Password")?;
    let form = LoginForm {
        email: args.email,
        password,
    };
    form.validate()?;

    let user = authenticate(client, store, &form).await?;

    output::print_banner(&Banner::success(format!(
        "Logged in as {} ({})",
        user.full_name, user.role
    )));
    output::print_message("Run 'taskboard dashboard' to see your dashboard.");
    Ok(())
}

/// Exchange credentials for a token and cache the resulting session.
///
/// Nothing is written to the session store unless the backend accepts the login.
pub async fn authenticate(
    client: &TaskboardClient,
    store: &SessionStore,
    form: &LoginForm,
) -> Result<User> {
    let response = client
        .login(&Credentials {
            email: form.email.trim(),
            password: &form.password,
        })
        .await
        .inspect_err(|e| warn!(error = %e, "login failed"))?;

    let claims = jwt::decode_claims(&response.token)?;
    let role = Role::from_wire(&claims.role).unwrap_or_else(|| {
        warn!(role = %claims.role, "unrecognized role in token, treating as developer");
        Role::Developer
    });

    let user = User {
        email: claims.sub,
        full_name: claims.name,
        role,
        token: response.token,
    };
    store.save(&user)?;
    info!(
        email = %user.email,
        role = user.role.as_wire(),
        session = %store.path().display(),
        "logged in"
    );
    Ok(user)
}

pub async fn logout(base: Url, store: &SessionStore) -> Result<()> {
    sign_out(base, store).await?;
    output::print_message("Logged out. Run 'taskboard login' to sign in again.");
    Ok(())
}

/// Tell the backend about the logout, then clear the local session whatever it said.
///
/// Returns whether the backend acknowledged the logout.
pub async fn sign_out(base: Url, store: &SessionStore) -> Result<bool> {
    let session = match store.load() {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "unreadable session, clearing it");
            None
        }
    };

    let acknowledged = match session {
        Some(user) => match TaskboardClient::with_token(base, user.token).logout().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "logout request failed");
                false
            }
        },
        None => false,
    };

    store.clear()?;
    Ok(acknowledged)
}

/// Session details safe to print; the token stays out.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    email: &'a str,
    full_name: &'a str,
    role: Role,
}

pub fn whoami(store: &SessionStore) -> Result<()> {
    let user = store.require()?;
    let view = SessionView {
        email: &user.email,
        full_name: &user.full_name,
        role: user.role,
    };
    output::print_item(&view, |u| {
        println!("Name:  {}", u.full_name);
        println!("Email: {}", u.email);
        println!("Role:  {}", u.role);
    });
    Ok(())
}

pub async fn forgot_password(client: &TaskboardClient, email: &str) -> Result<()> {
    validation::require_email(email)?;
    client
        .forgot_password(email.trim())
        .await
        .map_err(|e| e.or_message("Failed to send reset link. Please try again."))?;

    output::print_banner(&Banner::success("Password reset link sent to your email."));
    Ok(())
}

pub async fn reset_password(client: &TaskboardClient, args: ResetPasswordArgs) -> Result<()> {
    let new_password = password_or_prompt(args.password, "New password")?;
    let confirm_password = password_or_prompt(args.confirm, "Confirm new password")?;
    let form = ResetPasswordForm {
        token: args.token,
        new_password,
        confirm_password,
    };
    form.validate()?;

    client
        .reset_password(&PasswordReset {
            token: form.token.trim(),
            new_password: &form.new_password,
            confirm_password: &form.confirm_password,
        })
        .await
        .map_err(|e| e.or_message("Failed to reset password."))?;

    output::print_banner(&Banner::success("Password has been reset successfully."));
    output::print_message("Run 'taskboard login' to sign in with your new password.");
    Ok(())
}
