// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Conversation messages and session state for the assistant, the parsed content document,
//! the compiled flowchart AST and the problem catalog records.

pub mod content;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod flow_ast;
pub mod ids;
pub mod message;
pub mod problem;
pub mod session;

pub use content::{Block, ContentDocument, DIAGRAM_LANGUAGE};
pub use flow_ast::{FlowDirection, FlowEdge, FlowNode, FlowchartAst, NodeShape};
pub use ids::{Id, IdError, MessageId, ObjectId};
pub use message::{Message, Role};
pub use problem::{
    AlternativeProof, HistoricalContribution, Problem, ProblemSummary, ProofStep, RelatedProblem,
};
pub use session::{Session, SessionState};
