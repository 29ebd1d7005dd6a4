// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use super::message::Message;

/// Where the assistant session sits in its open/awaiting lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Closed,
    OpenIdle,
    OpenAwaitingReply,
}

/// Conversation state of the simulated assistant.
///
/// Mutated only through [`crate::assistant::SessionStore`]; this type is the value observers
/// receive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    messages: Vec<Message>,
    is_open: bool,
    active_context: Option<String>,
    is_awaiting_reply: bool,
    #[serde(skip)]
    epoch: u64,
}

impl Session {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn active_context(&self) -> Option<&str> {
        self.active_context.as_deref()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.is_awaiting_reply
    }

    /// Bumped by every `clear`, so work scheduled against an older conversation can tell.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Awaiting is reported even while closed, since replies keep landing in the background;
    /// the closed state wins for display purposes.
    pub fn state(&self) -> SessionState {
        match (self.is_open, self.is_awaiting_reply) {
            (false, _) => SessionState::Closed,
            (true, false) => SessionState::OpenIdle,
            (true, true) => SessionState::OpenAwaitingReply,
        }
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    pub(crate) fn set_active_context(&mut self, context: Option<String>) {
        self.active_context = context;
    }

    pub(crate) fn set_awaiting_reply(&mut self, awaiting: bool) {
        self.is_awaiting_reply = awaiting;
    }

    pub(crate) fn reset_conversation(&mut self) {
        self.messages.clear();
        self.is_awaiting_reply = false;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionState};
    use crate::model::{Message, MessageId, Role};

    #[test]
    fn state_follows_open_and_awaiting_flags() {
        let mut session = Session::default();
        assert_eq!(session.state(), SessionState::Closed);

        session.set_open(true);
        assert_eq!(session.state(), SessionState::OpenIdle);

        session.set_awaiting_reply(true);
        assert_eq!(session.state(), SessionState::OpenAwaitingReply);

        session.set_open(false);
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.is_awaiting_reply());
    }

    #[test]
    fn reset_conversation_keeps_open_flag_and_bumps_epoch() {
        let mut session = Session::default();
        session.set_open(true);
        session.set_awaiting_reply(true);
        session.push(Message::new(MessageId::new(1), Role::User, "q", None));

        session.reset_conversation();

        assert!(session.messages().is_empty());
        assert!(session.is_open());
        assert!(!session.is_awaiting_reply());
        assert_eq!(session.epoch(), 1);
    }
}
