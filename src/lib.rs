// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! GILC: simulated research assistant, content pipeline and Unicode diagram renderer.
//!
//! The assistant ([`assistant`]) keeps one conversation and answers from canned templates
//! after a fixed delay. Problem pages ([`catalog`]) are markdown-like strings that
//! [`content::render`] turns into blocks; diagram blocks compile through [`diagram`].

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod content;
pub mod diagram;
pub mod error;
pub mod format;
pub mod layout;
pub mod model;
pub mod notify;
pub mod proof;
pub mod render;
