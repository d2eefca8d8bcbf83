//! Unified application error model and mapping helpers.
//! This module provides a common error enum used across the resolver and
//! coordinator layers, along with mappers to HTTP status codes and GraphQL
//! error extensions.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    /// Mutation attempted without a verified identity in context.
    Auth { code: String, message: String },
    /// Login failed; uniform for unknown email and wrong password.
    Credentials { code: String, message: String },
    /// Enroll/unenroll target does not exist.
    NotFound { code: String, message: String },
    /// Uniqueness or range constraint violated at the store boundary.
    Validation { code: String, message: String },
    /// Store unreachable or timed out; not retried here.
    Store { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::Auth { code, .. }
            | AppError::Credentials { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Validation { code, .. }
            | AppError::Store { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Auth { message, .. }
            | AppError::Credentials { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Validation { message, .. }
            | AppError::Store { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn credentials<S: Into<String>>(code: S, msg: S) -> Self { AppError::Credentials { code: code.into(), message: msg.into() } }
    pub fn not_found<S: Into<String>>(code: S, msg: S) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn validation<S: Into<String>>(code: S, msg: S) -> Self { AppError::Validation { code: code.into(), message: msg.into() } }
    pub fn store<S: Into<String>>(code: S, msg: S) -> Self { AppError::Store { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Canonical error for unauthenticated mutation attempts.
    pub fn authentication_required() -> Self {
        AppError::auth("authentication_required", "authentication required")
    }

    /// Canonical login failure. One message for both unknown email and wrong
    /// password so account existence does not leak.
    pub fn invalid_credentials() -> Self {
        AppError::credentials("invalid_credentials", "invalid credentials")
    }

    /// Map to HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::Auth { .. } => 401,
            AppError::Credentials { .. } => 401,
            AppError::NotFound { .. } => 404,
            AppError::Validation { .. } => 400,
            AppError::Store { .. } => 503,
            AppError::Internal { .. } => 500,
        }
    }

    /// Map into a GraphQL error carrying machine-readable extensions:
    /// `code` (stable string) and `status` (HTTP-equivalent).
    pub fn into_graphql(self) -> async_graphql::Error {
        use async_graphql::ErrorExtensions;
        let status = self.http_status();
        let code = self.code_str().to_string();
        async_graphql::Error::new(self.message().to_string()).extend_with(|_, e| {
            e.set("code", code.clone());
            e.set("status", i64::from(status));
        })
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<crate::store::StoreError> for AppError {
    fn from(err: crate::store::StoreError) -> Self {
        use crate::store::StoreError;
        match err {
            StoreError::Duplicate { field } => {
                AppError::validation("duplicate_value".to_string(), format!("value for '{field}' already exists"))
            }
            StoreError::Constraint { message } => AppError::validation("constraint_violation".to_string(), message),
            StoreError::Unavailable { message } => AppError::store("store_unavailable".to_string(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert_eq!(AppError::authentication_required().http_status(), 401);
        assert_eq!(AppError::invalid_credentials().http_status(), 401);
        assert_eq!(AppError::not_found("not_found", "missing").http_status(), 404);
        assert_eq!(AppError::validation("duplicate_value", "dup").http_status(), 400);
        assert_eq!(AppError::store("store_unavailable", "down").http_status(), 503);
        assert_eq!(AppError::internal("internal", "panic").http_status(), 500);
    }

    #[test]
    fn graphql_extensions_carry_code_and_status() {
        let err = AppError::authentication_required().into_graphql();
        let ext = err.extensions.expect("extensions");
        assert_eq!(ext.get("code"), Some(&async_graphql::Value::from("authentication_required")));
        assert_eq!(ext.get("status"), Some(&async_graphql::Value::from(401i64)));
    }

    #[test]
    fn store_error_mapping() {
        use crate::store::StoreError;
        let dup: AppError = StoreError::Duplicate { field: "email".into() }.into();
        assert_eq!(dup.code_str(), "duplicate_value");
        assert_eq!(dup.http_status(), 400);
        let down: AppError = StoreError::Unavailable { message: "timeout".into() }.into();
        assert_eq!(down.http_status(), 503);
    }
}
