//! Login and registration forms and the notices they produce.

use filedeck_api_models::{ErrorBody, LoginRequest, LoginResponse, MessageResponse, RegisterRequest};

use crate::error::FormError;

/// Fallback shown after a successful registration without a server message.
pub const REGISTER_SUCCESS_FALLBACK: &str = "Registration successful.";
/// Fallback shown when registration fails without a server message.
pub const REGISTER_FAILURE_FALLBACK: &str = "Registration failed. Please try again.";
/// Fallback shown after a successful login without a server message.
pub const LOGIN_SUCCESS_FALLBACK: &str = "Logged in successfully.";
/// Fallback shown when login fails without a server error.
pub const LOGIN_FAILURE_FALLBACK: &str = "Login failed. Please try again.";

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    if value.trim().is_empty() {
        Err(FormError { field })
    } else {
        Ok(value.to_string())
    }
}

/// Registration form contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Password.
    pub password: String,
}

impl RegisterForm {
    /// Presence-check every field and build the request body.
    ///
    /// # Errors
    /// Returns the first blank field.
    pub fn into_request(self) -> Result<RegisterRequest, FormError> {
        Ok(RegisterRequest {
            name: required("name", &self.name)?,
            email: required("email", &self.email)?,
            password: required("password", &self.password)?,
        })
    }
}

/// Login form contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Account email.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginForm {
    /// Presence-check both fields and build the request body.
    ///
    /// # Errors
    /// Returns the first blank field.
    pub fn into_request(self) -> Result<LoginRequest, FormError> {
        Ok(LoginRequest {
            email: required("email", &self.email)?,
            password: required("password", &self.password)?,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Success notice after registering.
#[must_use]
pub fn register_success_text(response: &MessageResponse) -> String {
    non_blank(response.message.as_deref())
        .unwrap_or(REGISTER_SUCCESS_FALLBACK)
        .to_string()
}

/// Failure notice after registering; reads the server `message` field.
#[must_use]
pub fn register_failure_text(body: Option<&ErrorBody>) -> String {
    non_blank(body.and_then(|body| body.message.as_deref()))
        .unwrap_or(REGISTER_FAILURE_FALLBACK)
        .to_string()
}

/// Success notice after logging in.
#[must_use]
pub fn login_success_text(response: &LoginResponse) -> String {
    non_blank(response.message.as_deref())
        .unwrap_or(LOGIN_SUCCESS_FALLBACK)
        .to_string()
}

/// Failure notice after logging in; reads the server `error` field.
#[must_use]
pub fn login_failure_text(body: Option<&ErrorBody>) -> String {
    non_blank(body.and_then(|body| body.error.as_deref()))
        .unwrap_or(LOGIN_FAILURE_FALLBACK)
        .to_string()
}
