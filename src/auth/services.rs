use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use super::{
    dto::{AuthPayload, PublicUser, RegisterRequest},
    jwt::JwtKeys,
};
use crate::error::{AppError, AppResult};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalizes the registration form in place and checks its constraints.
pub fn validate_registration(req: &mut RegisterRequest) -> AppResult<()> {
    req.email = normalize_email(&req.email);
    req.name = req.name.trim().to_string();

    if !is_valid_email(&req.email) {
        return Err(AppError::validation("Invalid email"));
    }
    let name_len = req.name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&name_len) {
        return Err(AppError::validation(format!(
            "Name must be between {NAME_MIN} and {NAME_MAX} characters"
        )));
    }
    let password_len = req.password.chars().count();
    if password_len < PASSWORD_MIN {
        return Err(AppError::validation("Password too short"));
    }
    if password_len > PASSWORD_MAX {
        return Err(AppError::validation("Password too long"));
    }
    Ok(())
}

/// Signs a fresh access/refresh pair for `user`.
pub fn issue_tokens(keys: &JwtKeys, user: PublicUser) -> anyhow::Result<AuthPayload> {
    let user_id: Uuid = user.id;
    Ok(AuthPayload {
        access_token: keys.sign_access(user_id)?,
        refresh_token: keys.sign_refresh(user_id)?,
        token_type: "Bearer",
        user,
    })
}
