// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! These stay inside the crate's layers. The public contracts handed to the
//! view layer (advice, meal plans, store mutators) translate them into their
//! documented fallbacks instead of returning them.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("AI service error: {0}")]
    AiService(String),

    #[error("Invalid AI response: {0}")]
    InvalidResponse(String),

    #[error("AI service not configured")]
    NotConfigured,
}

impl AppError {
    /// Marker used when the AI service rejects a request for quota reasons.
    pub const AI_RATE_LIMIT: &'static str = "Rate limit exceeded";

    /// Returns true if this error came from the remote AI boundary
    /// (transport failure, remote error, or unusable response).
    pub fn is_ai_failure(&self) -> bool {
        matches!(
            self,
            AppError::AiService(_) | AppError::InvalidResponse(_) | AppError::NotConfigured
        )
    }

    /// Returns true if the AI service reported rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::AiService(msg) if msg.contains(Self::AI_RATE_LIMIT))
    }
}

/// Result type alias for fallible internals.
pub type Result<T> = std::result::Result<T, AppError>;
