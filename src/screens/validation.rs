use regex::Regex;

pub const MIN_PASSWORD_CHARS: usize = 6;

pub const REQUIRED_FIELDS: &str = "All fields are required!";
pub const INVALID_EMAIL: &str = "Please enter a valid email address!";
pub const SHORT_PASSWORD: &str = "Password must be at least 6 characters long!";
pub const MISSING_CODE: &str = "Please enter the verification code!";

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"\S+@\S+\.\S+").is_ok_and(|re| re.is_match(email))
}

#[must_use]
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}

/// True when every field has content.
#[must_use]
pub fn all_present(fields: &[&str]) -> bool {
    fields.iter().all(|field| !field.is_empty())
}
