// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MermaidIdentError {
    #[error("must not be empty")]
    Empty,
    #[error("must not contain whitespace")]
    ContainsWhitespace,
    #[error("contains invalid character: '{ch}'")]
    InvalidChar { ch: char },
}

/// Node identifiers are ASCII alphanumerics plus `_`.
pub(super) fn validate_mermaid_ident(ident: &str) -> Result<(), MermaidIdentError> {
    if ident.is_empty() {
        return Err(MermaidIdentError::Empty);
    }
    if ident.chars().any(char::is_whitespace) {
        return Err(MermaidIdentError::ContainsWhitespace);
    }
    match ident.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        Some(ch) => Err(MermaidIdentError::InvalidChar { ch }),
        None => Ok(()),
    }
}
