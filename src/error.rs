// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Error types shared across the crate.

use thiserror::Error;

use crate::format::mermaid::MermaidFlowchartParseError;
use crate::layout::FlowchartLayoutError;
use crate::render::FlowchartRenderError;

/// Why a `send` was rejected. Neither case changes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a reply is already pending")]
    AwaitingReply,
}

/// Failure reported by a diagram compiler. Shown inline, never escalated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("diagram description is empty")]
    Empty,
    #[error("unsupported diagram type: {keyword}")]
    UnsupportedKind { keyword: String },
    #[error(transparent)]
    Parse(#[from] MermaidFlowchartParseError),
    #[error(transparent)]
    Layout(#[from] FlowchartLayoutError),
    #[error(transparent)]
    Render(#[from] FlowchartRenderError),
    #[error("diagram compiler failed: {0}")]
    Compile(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidEnv { name: String, value: String, reason: String },
}

/// Top-level failures of the `gilc` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown problem id: {0}")]
    UnknownProblem(u32),
    #[error("unknown page section: {0}")]
    UnknownSection(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}
