// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use gilc::assistant::{generate, AssistantController, ContextMode, ContextualHelp, PageSection};
use gilc::config::AssistantConfig;
use gilc::model::{Role, SessionState};
use gilc::notify::{copy_message, MemoryClipboard, RecordingNotifier, COPIED_TITLE};

fn controller(delay_ms: u64) -> AssistantController {
    AssistantController::new(
        AssistantConfig::default().with_reply_delay(Duration::from_millis(delay_ms)),
    )
}

#[tokio::test(start_paused = true)]
async fn accepted_tip_opens_in_its_mode_and_replies_from_that_template() {
    let controller = controller(1500);
    let mut help = ContextualHelp::new(PageSection::Problems);
    let tip = help.reveal().expect("problems tip");
    assert!(help.accept(&controller));

    controller.send("check my induction step").expect("send");
    controller.wait_idle().await;

    let session = controller.snapshot();
    let bodies: Vec<(Role, &str)> =
        session.messages().iter().map(|m| (m.role(), m.body())).collect();
    let expected_reply = generate("check my induction step", tip.mode.tag());
    assert_eq!(
        bodies,
        [
            (Role::System, format!("Context: {}", tip.mode.tag()).as_str()),
            (Role::User, "check my induction step"),
            (Role::Assistant, expected_reply.as_str()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn observers_see_every_state_transition() {
    let controller = controller(200);
    let mut rx = controller.subscribe();
    let mut seen = vec![rx.borrow_and_update().state()];

    controller.open(None);
    rx.changed().await.expect("open");
    seen.push(rx.borrow_and_update().state());

    controller.send("hi").expect("send");
    rx.changed().await.expect("send");
    seen.push(rx.borrow_and_update().state());

    rx.changed().await.expect("reply");
    seen.push(rx.borrow_and_update().state());

    assert_eq!(
        seen,
        [
            SessionState::Closed,
            SessionState::OpenIdle,
            SessionState::OpenAwaitingReply,
            SessionState::OpenIdle,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn explain_then_copy_the_reply() {
    let controller = controller(1500);
    controller.explain("the critical line", Some(ContextMode::Research));
    assert_eq!(controller.snapshot().active_context(), Some("research"));

    controller.send("why one half?").expect("send");
    controller.wait_idle().await;

    let session = controller.snapshot();
    let reply = session.messages().last().expect("reply");
    assert_eq!(reply.role(), Role::Assistant);
    assert_eq!(reply.context(), Some("research"));

    let clipboard = MemoryClipboard::default();
    let notifier = RecordingNotifier::default();
    assert!(copy_message(&clipboard, &notifier, reply).await);
    assert_eq!(clipboard.contents().as_deref(), Some(reply.body()));
    assert_eq!(notifier.toasts()[0].title, COPIED_TITLE);
}

#[tokio::test(start_paused = true)]
async fn cleared_conversation_never_receives_the_old_reply() {
    let controller = controller(1500);
    controller.open(None);
    controller.send("first").expect("send");
    controller.clear();

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(controller.snapshot().messages().is_empty());
    assert_eq!(controller.state(), SessionState::OpenIdle);

    controller.send("second").expect("send after clear");
    controller.wait_idle().await;
    let session = controller.snapshot();
    assert_eq!(session.messages().len(), 2);
    assert!(session.messages()[0].id() < session.messages()[1].id());
}
