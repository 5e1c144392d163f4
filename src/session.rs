//! Per-chat state kept in memory for the lifetime of the process.
//!
//! Holds the chat's API key, where its analysis currently stands and the
//! storyboard from the latest successful analysis (for export). Starting a
//! new analysis discards the previous storyboard. Nothing here is written to
//! disk.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use teloxide::types::ChatId;

use crate::error::StoryboardError;
use crate::storyboard::StoryboardResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnalysisState {
    #[default]
    Idle,
    Pending,
    Validated,
    Failed,
}

#[derive(Debug, Default)]
struct ChatSession {
    api_key: Option<String>,
    state: AnalysisState,
    last_result: Option<StoryboardResult>,
}

#[derive(Clone, Debug, Default)]
pub struct Sessions {
    inner: Arc<Mutex<HashMap<ChatId, ChatSession>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChatId, ChatSession>> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_api_key(&self, chat_id: ChatId, key: impl Into<String>) {
        self.lock().entry(chat_id).or_default().api_key = Some(key.into());
        tracing::debug!(chat_id = chat_id.0, "API key stored for chat");
    }

    /// Drop the chat's key. Returns whether one was set.
    pub fn forget_api_key(&self, chat_id: ChatId) -> bool {
        self.lock()
            .get_mut(&chat_id)
            .and_then(|s| s.api_key.take())
            .is_some()
    }

    pub fn api_key(&self, chat_id: ChatId) -> Option<String> {
        self.lock().get(&chat_id).and_then(|s| s.api_key.clone())
    }

    pub fn state(&self, chat_id: ChatId) -> AnalysisState {
        self.lock()
            .get(&chat_id)
            .map(|s| s.state)
            .unwrap_or_default()
    }

    pub fn last_result(&self, chat_id: ChatId) -> Option<StoryboardResult> {
        self.lock().get(&chat_id).and_then(|s| s.last_result.clone())
    }

    /// Mark the chat as `Pending` and hand out a guard for the invocation.
    ///
    /// Returns `None` while another analysis for the same chat is in flight.
    pub fn begin(&self, chat_id: ChatId) -> Option<Invocation> {
        let mut sessions = self.lock();
        let session = sessions.entry(chat_id).or_default();
        if session.state == AnalysisState::Pending {
            tracing::debug!(chat_id = chat_id.0, "analysis already pending");
            return None;
        }
        session.state = AnalysisState::Pending;
        session.last_result = None;
        Some(Invocation {
            sessions: self.clone(),
            chat_id,
            finished: false,
        })
    }

    fn settle(&self, chat_id: ChatId, state: AnalysisState, result: Option<StoryboardResult>) {
        let mut sessions = self.lock();
        let session = sessions.entry(chat_id).or_default();
        session.state = state;
        session.last_result = result;
    }
}

/// An analysis in flight. Dropping it unfinished counts as a failure.
#[derive(Debug)]
pub struct Invocation {
    sessions: Sessions,
    chat_id: ChatId,
    finished: bool,
}

impl Invocation {
    pub fn finish(mut self, outcome: &Result<StoryboardResult, StoryboardError>) {
        match outcome {
            Ok(result) => {
                self.sessions
                    .settle(self.chat_id, AnalysisState::Validated, Some(result.clone()))
            }
            Err(_) => self.sessions.settle(self.chat_id, AnalysisState::Failed, None),
        }
        self.finished = true;
    }
}

impl Drop for Invocation {
    fn drop(&mut self) {
        if !self.finished {
            self.sessions
                .settle(self.chat_id, AnalysisState::Failed, None);
        }
    }
}
