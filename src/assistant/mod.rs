// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The simulated assistant: session store, canned response generator and the controller that
//! schedules replies.

pub mod controller;
pub mod help;
pub mod response;
pub mod store;

pub use controller::AssistantController;
pub use help::{tips_for, ContextualHelp, ContextualTip, PageSection};
pub use response::{generate, generate_for, ContextMode, UnknownContextMode};
pub use store::SessionStore;
