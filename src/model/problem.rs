// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::NaiveDate;
use serde::Serialize;

/// One inference in a proof outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofStep {
    pub id: String,
    pub statement: String,
    pub justification: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Ids of earlier steps this one relies on.
    pub dependencies: Vec<String>,
}

impl ProofStep {
    pub fn new(
        id: impl Into<String>,
        statement: impl Into<String>,
        justification: impl Into<String>,
        is_valid: bool,
    ) -> Self {
        Self {
            id: id.into(),
            statement: statement.into(),
            justification: justification.into(),
            is_valid,
            suggestions: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = suggestions.iter().map(|s| (*s).to_owned()).collect();
        self
    }

    pub fn with_dependencies(mut self, dependencies: &[&str]) -> Self {
        self.dependencies = dependencies.iter().map(|s| (*s).to_owned()).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalContribution {
    pub year: u16,
    pub contributor: String,
    pub contribution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeProof {
    pub title: String,
    pub description: String,
    pub complexity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedProblem {
    pub id: u32,
    pub title: String,
    pub relation: String,
}

/// What the problem listing shows for each entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemSummary {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: String,
    pub contributors: u32,
    pub last_update: NaiveDate,
}

/// A problem detail page: the summary plus the markdown body handed to the content pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    #[serde(flatten)]
    pub summary: ProblemSummary,
    pub historical_chain: Vec<HistoricalContribution>,
    pub content: String,
    pub proof_steps: Vec<ProofStep>,
    pub alternative_proofs: Vec<AlternativeProof>,
    pub related_problems: Vec<RelatedProblem>,
}
