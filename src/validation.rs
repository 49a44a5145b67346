//! Client-side checks that gate form submission.
//!
//! These only decide whether a request is worth sending; the backend applies its own rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TaskboardError};
use crate::types::Role;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// One pattern per character class a password must contain.
static PASSWORD_CLASSES: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (Regex::new(r"[A-Z]").expect("valid pattern"), "an uppercase letter"),
        (Regex::new(r"[a-z]").expect("valid pattern"), "a lowercase letter"),
        (Regex::new(r"[0-9]").expect("valid pattern"), "a digit"),
        (Regex::new(r"[^A-Za-z0-9]").expect("valid pattern"), "a special character"),
    ]
});

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Missing password requirements, empty when the password is acceptable.
pub fn password_problems(password: &str) -> Vec<String> {
    let mut missing = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        missing.push(format!("at least {MIN_PASSWORD_LEN} characters"));
    }
    for (pattern, label) in PASSWORD_CLASSES.iter() {
        if !pattern.is_match(password) {
            missing.push((*label).to_string());
        }
    }
    missing
}

/// Fail with every problem joined into one message.
fn into_result(problems: Vec<String>) -> Result<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(TaskboardError::Validation(problems.join("; ")))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl RegisterForm {
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if is_blank(&self.full_name) {
            problems.push("Full name is required".to_string());
        }
        if is_blank(&self.email) {
            problems.push("Email is required".to_string());
        } else if !is_valid_email(&self.email) {
            problems.push("Email address is not valid".to_string());
        }
        let missing = password_problems(&self.password);
        if !missing.is_empty() {
            problems.push(format!("Password needs {}", missing.join(", ")));
        }
        if self.role.is_none() {
            problems.push("Role is required".to_string());
        }
        problems
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        self.problems().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.can_submit() {
            return Ok(());
        }
        into_result(self.problems())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if !is_valid_email(&self.email) {
            problems.push("Enter a valid email address".to_string());
        }
        if self.password.is_empty() {
            problems.push("Password is required".to_string());
        }
        into_result(problems)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.token) {
            return Err(TaskboardError::Validation(
                "Reset token is missing".to_string(),
            ));
        }
        if self.new_password.is_empty() {
            return Err(TaskboardError::Validation(
                "New password is required".to_string(),
            ));
        }
        if self.new_password != self.confirm_password {
            return Err(TaskboardError::Validation(
                "Passwords do not match.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Single required email, as on the forgot-password and resend-activation forms.
pub fn require_email(email: &str) -> Result<()> {
    if is_blank(email) {
        return Err(TaskboardError::Validation(
            "Please enter your email above first.".to_string(),
        ));
    }
    if !is_valid_email(email) {
        return Err(TaskboardError::Validation(
            "Email address is not valid".to_string(),
        ));
    }
    Ok(())
}
