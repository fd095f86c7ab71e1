// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AI coach conversation session.
//!
//! The transcript is append-only. A submission appends the user turn at
//! once, marks the session pending while the advice request runs, then
//! appends exactly one assistant turn. Submissions made while pending are
//! refused, which serializes advice requests per session.

use crate::models::{ChatTurn, Profile};
use crate::services::advice::AdviceClient;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of [`ConversationSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The assistant replied with this text
    Answered(String),
    /// Input was empty or whitespace; nothing was appended
    RejectedEmpty,
    /// A previous submission is still pending; nothing was appended
    Busy,
}

#[derive(Debug)]
struct SessionState {
    transcript: Vec<ChatTurn>,
    pending: bool,
}

/// One coach conversation. Clones share the same transcript.
#[derive(Clone)]
pub struct ConversationSession {
    state: Arc<Mutex<SessionState>>,
    advice: AdviceClient,
}

impl ConversationSession {
    /// Start a conversation greeting the profile's user.
    pub fn new(advice: AdviceClient, profile: &Profile) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                transcript: vec![ChatTurn::assistant(greeting(profile))],
                pending: false,
            })),
            advice,
        }
    }

    /// Copy of the transcript so far.
    pub async fn transcript(&self) -> Vec<ChatTurn> {
        self.state.lock().await.transcript.clone()
    }

    pub async fn turn_count(&self) -> usize {
        self.state.lock().await.transcript.len()
    }

    /// True while an advice request is outstanding.
    pub async fn is_pending(&self) -> bool {
        self.state.lock().await.pending
    }

    /// Submit user text and wait for the coach's reply.
    pub async fn submit(&self, text: &str, profile: &Profile) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::RejectedEmpty;
        }

        {
            let mut state = self.state.lock().await;
            if state.pending {
                tracing::debug!("Coach submission refused while pending");
                return SubmitOutcome::Busy;
            }
            state.transcript.push(ChatTurn::user(text));
            state.pending = true;
        }

        // Lock is not held across the remote call
        let mut guard = PendingGuard {
            state: Arc::clone(&self.state),
            armed: true,
        };

        let reply = self.advice.get_advice(text, profile).await;

        {
            let mut state = self.state.lock().await;
            state.transcript.push(ChatTurn::assistant(reply.clone()));
            state.pending = false;
        }
        guard.armed = false;

        SubmitOutcome::Answered(reply)
    }
}

/// Returns the session to idle if a submission is dropped mid-request.
struct PendingGuard {
    state: Arc<Mutex<SessionState>>,
    armed: bool,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.state.try_lock() {
            Ok(mut state) => state.pending = false,
            Err(_) => {
                // The lock is only held briefly; clear the flag once it frees up
                let state = Arc::clone(&self.state);
                match tokio::runtime::Handle::try_current() {
                    Ok(handle) => {
                        handle.spawn(async move {
                            state.lock().await.pending = false;
                        });
                    }
                    Err(_) => {
                        tracing::warn!("No runtime to clear pending coach submission; session stays busy");
                    }
                }
            }
        }
    }
}

/// Opening assistant message.
pub fn greeting(profile: &Profile) -> String {
    format!(
        "Hello {}! I'm your Vertex AI Coach. Ready to crush your fitness goals? How can I help you today?",
        profile.name
    )
}
