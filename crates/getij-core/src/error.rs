//! Centralized error types for the Getij application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for the status line
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the Getij application should be convertible to this type.
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Forecast feed error: {0}")]
    Feed(#[from] FeedError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Feed(e) => e.user_message(),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Errors from the hosted forecast feed (the latest-row RPC and its payload).
#[derive(Debug, Error)]
pub enum FeedError {
    /// The RPC is missing or the anon role may not execute it
    #[error("RPC unavailable: {0}")]
    RpcUnavailable(String),

    #[error("RPC error: {0}")]
    RpcFailed(String),

    /// `body_processed` is not a JSON array of records
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid API key")]
    InvalidApiKey,
}

impl FeedError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FeedError::RpcUnavailable(_) => {
                "Forecast function not reachable. Check that it exists and 'anon' may execute it."
            }
            FeedError::RpcFailed(_) => "Forecast service error. Please try again.",
            FeedError::MalformedPayload(_) => "The latest forecast could not be read.",
            FeedError::InvalidApiKey => "Supabase anon key is invalid. Check settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
