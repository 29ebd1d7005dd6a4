// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Content strings (markdown with TeX math and fenced diagrams) into
//! [`crate::model::ContentDocument`].

pub mod math;
pub mod pipeline;

pub use math::{math_spans, MathSpan};
pub use pipeline::render;
