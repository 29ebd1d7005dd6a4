// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid-ish parsing for the flowchart subset shown in problem content.

pub mod flowchart;
mod ident;

pub use flowchart::{parse_flowchart, MermaidFlowchartParseError, MermaidIdentError};

/// First keyword of a diagram description, skipping blank and `%%` comment lines.
pub fn header_keyword(description: &str) -> Option<&str> {
    description
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("%%"))
        .and_then(|line| line.split_whitespace().next())
        .map(|keyword| keyword.trim_end_matches(';'))
}
