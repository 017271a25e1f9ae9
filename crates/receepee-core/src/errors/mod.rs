// ABOUTME: Unified error type and error codes shared by every receepee layer
// ABOUTME: Classifies upstream HTTP failures, parse failures, and local validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

//! # Unified Error Handling System
//!
//! Every fallible operation in receepee returns [`AppResult`]. Errors carry a
//! stable [`ErrorCode`], a human-readable message, and an [`ErrorContext`] that
//! records the upstream HTTP status when the failure came from the recipe API.
//!
//! `AppError` is `Clone` because a single failed fetch is shared with every
//! requester that joined the same in-flight request.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied an invalid argument
    InvalidInput = 3000,
    /// Value outside an accepted range
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Requested resource does not exist upstream
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Upstream answered with a non-success status
    ExternalServiceError = 5000,
    /// Upstream could not be reached at all
    ExternalServiceUnavailable = 5001,
    /// Upstream rejected the API key
    ExternalAuthFailed = 5002,
    /// Upstream quota or rate limit exhausted
    ExternalRateLimited = 5003,

    // Configuration (6000-6999)
    /// Configuration could not be loaded or is invalid
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Payload could not be (de)serialized
    SerializationError = 9003,
}

impl ErrorCode {
    /// HTTP status equivalent of this error, used when reporting to callers
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::ValueOutOfRange => 400,
            Self::ResourceNotFound => 404,
            Self::ExternalRateLimited => 429,
            Self::ExternalServiceError | Self::ExternalServiceUnavailable => 502,
            Self::ExternalAuthFailed => 503,
            Self::ConfigInvalid | Self::InternalError | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "The recipe service returned an error",
            Self::ExternalServiceUnavailable => "The recipe service is currently unavailable",
            Self::ExternalAuthFailed => "The recipe service rejected the API key",
            Self::ExternalRateLimited => "The recipe service quota has been exhausted",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Map an upstream HTTP status to the error code it represents
    ///
    /// Spoonacular answers 402 once the daily point quota is spent, so it is
    /// grouped with 429.
    #[must_use]
    pub const fn from_upstream_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::ExternalAuthFailed,
            402 | 429 => Self::ExternalRateLimited,
            404 => Self::ResourceNotFound,
            _ => Self::ExternalServiceError,
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// HTTP status returned by the upstream API, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
    /// Reason phrase accompanying the upstream status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status_text: Option<String>,
    /// Identifier of the resource involved (recipe id, query key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// Unified error type for the application
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// HTTP status equivalent of this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Upstream HTTP status, when the error came from a non-success response
    #[must_use]
    pub const fn upstream_status(&self) -> Option<u16> {
        self.context.upstream_status
    }

    /// Whether this error came out of a fetch (network, HTTP status, or payload parse)
    ///
    /// Callers surface all of these the same way and offer a manual retry.
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ExternalServiceError
                | ErrorCode::ExternalServiceUnavailable
                | ErrorCode::ExternalAuthFailed
                | ErrorCode::ExternalRateLimited
                | ErrorCode::ResourceNotFound
                | ErrorCode::SerializationError
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside an accepted range
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// External service error with a free-form message
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Upstream could not be reached (DNS, connect, TLS, timeout)
    #[must_use]
    pub fn network(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Upstream answered with a non-success HTTP status
    #[must_use]
    pub fn from_upstream(status: u16, status_text: impl Into<String>) -> Self {
        let status_text = status_text.into();
        let mut error = Self::new(
            ErrorCode::from_upstream_status(status),
            format!("API Error: {status} - {status_text}"),
        );
        error.context.upstream_status = Some(status);
        error.context.upstream_status_text = Some(status_text);
        error
    }

    /// Upstream body was not valid JSON for the expected shape
    #[must_use]
    pub fn parse(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("{}: JSON parse error: {}", service.into(), message.into()),
        )
    }

    /// Local (de)serialization failure
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_classification() {
        assert_eq!(
            ErrorCode::from_upstream_status(402),
            ErrorCode::ExternalRateLimited
        );
        assert_eq!(
            ErrorCode::from_upstream_status(429),
            ErrorCode::ExternalRateLimited
        );
        assert_eq!(
            ErrorCode::from_upstream_status(401),
            ErrorCode::ExternalAuthFailed
        );
        assert_eq!(
            ErrorCode::from_upstream_status(404),
            ErrorCode::ResourceNotFound
        );
        assert_eq!(
            ErrorCode::from_upstream_status(500),
            ErrorCode::ExternalServiceError
        );
    }

    #[test]
    fn test_upstream_status_error_carries_status_and_text() {
        let error = AppError::from_upstream(402, "Payment Required");

        assert_eq!(error.upstream_status(), Some(402));
        assert_eq!(
            error.context.upstream_status_text.as_deref(),
            Some("Payment Required")
        );
        assert_eq!(error.message, "API Error: 402 - Payment Required");
        assert!(error.is_fetch_error());
    }

    #[test]
    fn test_parse_and_http_errors_are_both_fetch_errors() {
        assert!(AppError::parse("Spoonacular API", "expected value").is_fetch_error());
        assert!(AppError::network("Spoonacular API", "connection refused").is_fetch_error());
        assert!(!AppError::invalid_input("empty").is_fetch_error());
    }

    #[test]
    fn test_error_serialization_uses_screaming_codes() {
        let error = AppError::from_upstream(429, "Too Many Requests");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("EXTERNAL_RATE_LIMITED"));
        assert!(json.contains("429"));
    }

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::not_found("Recipe 5");
        assert_eq!(
            error.to_string(),
            "The requested resource was not found: Recipe 5 not found"
        );
    }
}
