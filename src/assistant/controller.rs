// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::response::{generate, ContextMode};
use super::store::SessionStore;
use crate::config::AssistantConfig;
use crate::error::SendError;
use crate::model::{MessageId, Session, SessionState};

/// Drives the simulated assistant: open/close/send/clear against one [`SessionStore`].
///
/// `send` schedules the synthetic reply on the current Tokio runtime and therefore panics
/// when called outside of one, like `tokio::spawn`. Dropping the controller aborts a reply
/// that has not landed yet.
#[derive(Debug)]
pub struct AssistantController {
    store: Arc<SessionStore>,
    config: AssistantConfig,
    pending_replies: Mutex<Vec<JoinHandle<()>>>,
}

impl AssistantController {
    pub fn new(config: AssistantConfig) -> Self {
        Self::with_store(Arc::new(SessionStore::new()), config)
    }

    pub fn with_store(store: Arc<SessionStore>, config: AssistantConfig) -> Self {
        Self { store, config, pending_replies: Mutex::new(Vec::new()) }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.store.subscribe()
    }

    pub fn snapshot(&self) -> Session {
        self.store.snapshot()
    }

    pub fn state(&self) -> SessionState {
        self.store.read(Session::state)
    }

    pub fn open(&self, context: Option<&str>) {
        let announced = self.store.open_with_context(context);
        info!(context = ?context, announced, "assistant opened");
    }

    pub fn close(&self) {
        self.store.close();
        info!("assistant closed");
    }

    /// Open the assistant on a piece of page content. An explicit mode, when given, replaces
    /// the `Explain: ...` context right after it is announced.
    pub fn explain(&self, content: &str, mode: Option<ContextMode>) {
        self.open(Some(&format!("Explain: {content}")));
        if let Some(mode) = mode {
            self.store.set_context(Some(mode.tag().to_owned()));
        }
    }

    /// Submit user text. On success the user message is already in the store and the reply
    /// lands after the configured delay.
    pub fn send(&self, text: &str) -> Result<MessageId, SendError> {
        if text.trim().is_empty() {
            debug!("rejecting empty message");
            return Err(SendError::EmptyMessage);
        }

        let turn = self.store.begin_user_turn(text).map_err(|err| {
            warn!(error = %err, "rejecting message while a reply is pending");
            err
        })?;

        let store = Arc::clone(&self.store);
        let delay = self.config.reply_delay;
        let query = text.to_owned();
        let epoch = turn.epoch;
        let context = turn.context.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mode = context.as_deref().unwrap_or(ContextMode::General.tag());
            let body = generate(&query, mode);
            if store.deliver_reply(epoch, body, context) {
                debug!("assistant reply delivered");
            } else {
                debug!("assistant reply discarded; conversation was cleared");
            }
        });

        // A reply that has not landed yet keeps running; only finished handles are dropped.
        let mut pending = self.pending_replies();
        pending.retain(|previous| !previous.is_finished());
        pending.push(handle);
        drop(pending);

        info!(message_id = %turn.message_id, context = ?turn.context, "user message sent");
        Ok(turn.message_id)
    }

    /// Empty the conversation. Open/closed status is kept; a reply still in flight is dropped.
    pub fn clear(&self) {
        self.abort_pending();
        self.store.clear();
        info!("assistant conversation cleared");
    }

    /// Resolve once no reply is pending.
    pub async fn wait_idle(&self) {
        let mut rx = self.store.subscribe();
        // The sender lives as long as `self`, so `wait_for` cannot observe a closed channel.
        let _ = rx.wait_for(|session| !session.is_awaiting_reply()).await;
    }

    fn pending_replies(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending_replies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn abort_pending(&self) {
        for handle in self.pending_replies().drain(..) {
            handle.abort();
        }
    }
}

impl Drop for AssistantController {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
