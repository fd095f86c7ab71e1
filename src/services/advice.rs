// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coaching advice client.
//!
//! Wraps an [`AdviceService`] so callers always get displayable text back:
//! remote failures become a fixed fallback message instead of an error.

use crate::error::Result;
use crate::models::Profile;
use async_trait::async_trait;
use std::sync::Arc;

/// Shown when the advice service cannot be reached or reports an error.
pub const ADVICE_FALLBACK: &str = "Error connecting to the AI coach. Please try again later.";

/// Shown when the service answers with no text at all.
pub const EMPTY_ADVICE: &str = "I'm sorry, I couldn't generate advice right now.";

/// Remote service producing free-form coaching text.
#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Answer `question` for the user described by `profile`.
    ///
    /// Implementations must send the full profile and the verbatim question.
    async fn advise(&self, question: &str, profile: &Profile) -> Result<String>;
}

/// Caller-facing advice client that never fails.
#[derive(Clone)]
pub struct AdviceClient {
    service: Arc<dyn AdviceService>,
}

impl AdviceClient {
    pub fn new(service: Arc<dyn AdviceService>) -> Self {
        Self { service }
    }

    /// Ask the coach a question.
    ///
    /// Always resolves to a string: the service's answer, [`EMPTY_ADVICE`]
    /// for a blank answer, or [`ADVICE_FALLBACK`] on any failure. No retries.
    pub async fn get_advice(&self, question: &str, profile: &Profile) -> String {
        match self.service.advise(question, profile).await {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!("Advice service returned no text");
                EMPTY_ADVICE.to_string()
            }
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, rate_limited = e.is_rate_limited(), "Advice request failed");
                ADVICE_FALLBACK.to_string()
            }
        }
    }
}
