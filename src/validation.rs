use crate::persistence::preferences::UserProfile;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// Same permissive shape the dashboard always used.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("static email pattern"));

/// A single inline field error, as surfaced next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Presence + format checks for the profile form. Returns every failing
/// field, not just the first.
pub fn validate_profile(profile: &UserProfile) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if profile.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if profile.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !EMAIL_RE.is_match(profile.email.trim()) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }
    if profile.phone.trim().is_empty() {
        errors.push(FieldError::new("phone", "Phone is required"));
    }
    if profile.location.trim().is_empty() {
        errors.push(FieldError::new("location", "Location is required"));
    }
    if profile.bio.trim().is_empty() {
        errors.push(FieldError::new("bio", "Bio is required"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub fn validate_password_change(form: &PasswordChange) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.current_password.is_empty() {
        errors.push(FieldError::new(
            "currentPassword",
            "Current password is required",
        ));
    }
    if form.new_password.is_empty() {
        errors.push(FieldError::new("newPassword", "New password is required"));
    } else if form.new_password.len() < 8 {
        errors.push(FieldError::new(
            "newPassword",
            "Password must be at least 8 characters",
        ));
    }
    if form.new_password != form.confirm_password {
        errors.push(FieldError::new(
            "confirmPassword",
            "Passwords do not match",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Strength score 0-100: 25 points per satisfied class (length >= 8,
/// lowercase, uppercase, digit, symbol), capped at 100.
pub fn password_strength(password: &str) -> u8 {
    let mut strength: u32 = 0;
    if password.len() >= 8 {
        strength += 25;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        strength += 25;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        strength += 25;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += 25;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        strength += 25;
    }
    strength.min(100) as u8
}

/// Scenarios only require a non-empty name and description.
pub fn validate_scenario(name: &str, description: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::new("name", "Name is required"));
    }
    if description.trim().is_empty() {
        return Err(FieldError::new("description", "Description is required"));
    }
    Ok(())
}
