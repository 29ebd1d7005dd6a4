// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::error::SendError;
use crate::model::{Message, MessageId, Role, Session};

/// What `begin_user_turn` hands back to the controller so the reply can be scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserTurn {
    pub(crate) message_id: MessageId,
    pub(crate) epoch: u64,
    pub(crate) context: Option<String>,
}

/// Single owner of the assistant [`Session`].
///
/// Every mutation is one `watch` update: it is fully applied, and visible to every
/// subscriber, by the time the call returns.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<Session>,
    last_message_id: AtomicU64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::default());
        Self { tx, last_message_id: AtomicU64::new(0) }
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Read without cloning. Do not call back into the store from `f`.
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Allocate the next message id. Ids keep increasing across `clear`.
    pub fn next_message_id(&self) -> MessageId {
        MessageId::new(self.last_message_id.fetch_add(1, Ordering::Relaxed)).next()
    }

    pub fn append(&self, message: Message) {
        self.tx.send_modify(|session| session.push(message));
    }

    pub fn set_open(&self, open: bool) {
        self.tx.send_modify(|session| session.set_open(open));
    }

    pub fn set_context(&self, context: Option<String>) {
        self.tx.send_modify(|session| session.set_active_context(context));
    }

    pub fn set_awaiting_reply(&self, awaiting: bool) {
        self.tx.send_modify(|session| session.set_awaiting_reply(awaiting));
    }

    /// Drop every message and force the awaiting flag off. The open flag and active context
    /// are left alone.
    pub fn clear(&self) {
        self.tx.send_modify(Session::reset_conversation);
    }

    /// Open, optionally switching context. A context different from the active one is
    /// announced with a system message.
    pub(crate) fn open_with_context(&self, context: Option<&str>) -> bool {
        let mut announced = false;
        self.tx.send_modify(|session| {
            session.set_open(true);
            let Some(context) = context else {
                return;
            };
            if session.active_context() == Some(context) {
                return;
            }
            session.set_active_context(Some(context.to_owned()));
            session.push(Message::new(
                self.next_message_id(),
                Role::System,
                format!("Context: {context}"),
                None,
            ));
            announced = true;
        });
        announced
    }

    pub(crate) fn close(&self) {
        self.tx.send_modify(|session| {
            session.set_open(false);
            session.set_active_context(None);
        });
    }

    /// Append the user message and raise the awaiting flag, unless a reply is already pending.
    pub(crate) fn begin_user_turn(&self, body: &str) -> Result<UserTurn, SendError> {
        let mut outcome = Err(SendError::AwaitingReply);
        self.tx.send_if_modified(|session| {
            if session.is_awaiting_reply() {
                return false;
            }
            let context = session.active_context().map(str::to_owned);
            let message_id = self.next_message_id();
            session.push(Message::new(message_id, Role::User, body, context.clone()));
            session.set_awaiting_reply(true);
            outcome = Ok(UserTurn { message_id, epoch: session.epoch(), context });
            true
        });
        outcome
    }

    /// Land a scheduled reply. Replies addressed to a conversation that was cleared since are
    /// dropped and `false` is returned.
    pub(crate) fn deliver_reply(&self, epoch: u64, body: String, context: Option<String>) -> bool {
        self.tx.send_if_modified(|session| {
            if session.epoch() != epoch {
                return false;
            }
            session.push(Message::new(self.next_message_id(), Role::Assistant, body, context));
            session.set_awaiting_reply(false);
            true
        })
    }
}
