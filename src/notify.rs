// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Toast and clipboard collaborators.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::ClipboardError;
use crate::model::Message;

pub const TOAST_DURATION: Duration = Duration::from_millis(2000);
pub const COPIED_TITLE: &str = "Copied to clipboard";
pub const COPY_FAILED_TITLE: &str = "Failed to copy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub variant: ToastVariant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), variant: ToastVariant::Default, duration: TOAST_DURATION }
    }

    pub fn destructive(mut self) -> Self {
        self.variant = ToastVariant::Destructive;
        self
    }
}

/// Fire-and-forget toast sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Sends toasts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => info!(title = %toast.title, "toast"),
            ToastVariant::Destructive => warn!(title = %toast.title, "toast"),
        }
    }
}

/// Keeps every toast it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).push(toast);
    }
}

/// In-process clipboard. An unavailable one fails every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    unavailable: Option<String>,
}

impl MemoryClipboard {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { contents: Mutex::new(None), unavailable: Some(reason.into()) }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(reason) = &self.unavailable {
            return Err(ClipboardError::Unavailable(reason.clone()));
        }
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_owned());
        Ok(())
    }
}

/// Copy a message body and report the outcome as a toast. Returns whether the copy worked.
pub async fn copy_message(
    clipboard: &dyn Clipboard,
    notifier: &dyn Notifier,
    message: &Message,
) -> bool {
    match clipboard.write_text(message.body()).await {
        Ok(()) => {
            notifier.notify(Toast::new(COPIED_TITLE));
            true
        }
        Err(err) => {
            warn!(message_id = %message.id(), error = %err, "copy failed");
            notifier.notify(Toast::new(COPY_FAILED_TITLE).destructive());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        copy_message, MemoryClipboard, RecordingNotifier, Toast, ToastVariant, TracingNotifier,
        COPIED_TITLE, TOAST_DURATION,
    };
    use crate::model::{Message, MessageId, Role};

    fn message() -> Message {
        Message::new(MessageId::new(7), Role::Assistant, "ζ(s) has zeros", None)
    }

    #[tokio::test]
    async fn copy_writes_body_and_confirms() {
        let clipboard = MemoryClipboard::default();
        let notifier = RecordingNotifier::default();

        assert!(copy_message(&clipboard, &notifier, &message()).await);
        assert_eq!(clipboard.contents().as_deref(), Some("ζ(s) has zeros"));
        assert_eq!(notifier.toasts(), [Toast::new(COPIED_TITLE)]);
        assert_eq!(notifier.toasts()[0].duration, TOAST_DURATION);
    }

    #[tokio::test]
    async fn failed_copy_shows_destructive_toast() {
        let clipboard = MemoryClipboard::unavailable("no display");
        let notifier = RecordingNotifier::default();

        assert!(!copy_message(&clipboard, &notifier, &message()).await);
        assert_eq!(clipboard.contents(), None);
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Failed to copy");
        assert_eq!(toasts[0].variant, ToastVariant::Destructive);
    }

    #[tokio::test]
    async fn tracing_notifier_reports_both_outcomes() {
        let clipboard = MemoryClipboard::default();
        assert!(copy_message(&clipboard, &TracingNotifier, &message()).await);
        assert_eq!(clipboard.contents().as_deref(), Some("ζ(s) has zeros"));

        let broken = MemoryClipboard::unavailable("no display");
        assert!(!copy_message(&broken, &TracingNotifier, &message()).await);
    }
}
