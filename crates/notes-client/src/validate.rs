//! Form checks that run before any request is built.
//!
//! Each form validates into the request body it feeds, or into
//! [`FormErrors`] with one entry per failing field.

use notes_types::{
    ChangePasswordRequest, LoginRequest, MessageCategory, RegisterRequest, SubmitMessageRequest,
};
use std::fmt;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_MESSAGE_LEN: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    fn push(&mut self, field: &'static str, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The message shown under `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

#[derive(Clone, Debug, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, Default)]
pub struct MessageForm {
    pub content: String,
    pub category: Option<MessageCategory>,
    pub captcha: Option<String>,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FormErrors> {
        let mut errors = FormErrors::default();
        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Name is required");
        }
        let email = check_email(&self.email, "Invalid email", &mut errors);
        check_new_password("password", &self.password, "Password is required", &mut errors);
        check_confirmation(&self.password, &self.confirm_password, &mut errors);

        errors.into_result(RegisterRequest {
            name: name.to_string(),
            email,
            password: self.password.clone(),
        })
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormErrors> {
        let mut errors = FormErrors::default();
        let email = check_email(
            &self.email,
            "Please enter a valid email address",
            &mut errors,
        );
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }

        errors.into_result(LoginRequest {
            email,
            password: self.password.clone(),
        })
    }
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<ChangePasswordRequest, FormErrors> {
        let mut errors = FormErrors::default();
        if self.current_password.is_empty() {
            errors.push("current_password", "Current password is required");
        }
        check_new_password(
            "new_password",
            &self.new_password,
            "New password is required",
            &mut errors,
        );
        check_confirmation(&self.new_password, &self.confirm_password, &mut errors);

        errors.into_result(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

impl MessageForm {
    pub fn validate(&self) -> Result<SubmitMessageRequest, FormErrors> {
        let mut errors = FormErrors::default();
        if self.content.trim().is_empty() {
            errors.push("content", "Please enter your message");
        } else if self.content.chars().count() > MAX_MESSAGE_LEN {
            errors.push("content", "Message must be less than 1000 characters");
        }

        errors.into_result(SubmitMessageRequest {
            content: self.content.clone(),
            category: self.category.unwrap_or_default(),
            captcha: self.captcha.clone(),
        })
    }
}

/// `^\S+@\S+$`: no whitespace, and an `@` with something on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    email
        .char_indices()
        .any(|(i, c)| c == '@' && i > 0 && i + 1 < email.len())
}

fn check_email(raw: &str, invalid: &str, errors: &mut FormErrors) -> String {
    let email = raw.trim();
    if email.is_empty() {
        errors.push("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.push("email", invalid);
    }
    email.to_string()
}

fn check_new_password(
    field: &'static str,
    password: &str,
    required: &str,
    errors: &mut FormErrors,
) {
    if password.is_empty() {
        errors.push(field, required);
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(field, "Password must be at least 8 characters");
    }
}

fn check_confirmation(password: &str, confirmation: &str, errors: &mut FormErrors) {
    if password != confirmation {
        errors.push("confirm_password", "Passwords do not match");
    }
}
