// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Simulated proof-step analysis.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::AssistantConfig;
use crate::model::{Problem, ProofStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofAssistant {
    analysis_delay: Duration,
}

impl Default for ProofAssistant {
    fn default() -> Self {
        Self::new(AssistantConfig::default().analysis_delay)
    }
}

impl ProofAssistant {
    pub fn new(analysis_delay: Duration) -> Self {
        Self { analysis_delay }
    }

    pub fn analysis_delay(&self) -> Duration {
        self.analysis_delay
    }

    /// "Analyze" free-form proof text. The outcome is the same canned outline for any input.
    pub async fn analyze(&self, proof_content: &str) -> ProofAnalysis {
        debug!(len = proof_content.len(), "analyzing proof text");
        tokio::time::sleep(self.analysis_delay).await;
        ProofAnalysis::new(sample_steps())
    }

    /// Analyze a catalog problem, starting from its recorded proof steps.
    pub async fn analyze_problem(&self, problem: &Problem) -> ProofAnalysis {
        debug!(problem = problem.summary.id, "analyzing problem proof");
        tokio::time::sleep(self.analysis_delay).await;
        let analysis = ProofAnalysis::new(problem.proof_steps.clone());
        info!(problem = problem.summary.id, progress = %analysis.progress(), "proof analyzed");
        analysis
    }
}

fn sample_steps() -> Vec<ProofStep> {
    vec![
        ProofStep::new("1", "Let f: ℝ → ℝ be a continuous function", "Given premise", true),
        ProofStep::new(
            "2",
            "Assume f is differentiable on (a,b)",
            "Mean Value Theorem prerequisite",
            true,
        )
        .with_suggestions(&["Consider adding continuity on [a,b]"])
        .with_dependencies(&["1"]),
        ProofStep::new(
            "3",
            "∃c ∈ (a,b) such that f'(c) = (f(b) - f(a))/(b - a)",
            "Mean Value Theorem application",
            false,
        )
        .with_suggestions(&[
            "Need to establish continuity on [a,b]",
            "Verify differentiability condition",
        ])
        .with_dependencies(&["1", "2"]),
    ]
}

/// Analyzed steps plus which of them are expanded in the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofAnalysis {
    steps: Vec<ProofStep>,
    expanded: BTreeSet<String>,
}

impl ProofAnalysis {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps, expanded: BTreeSet::new() }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn step(&self, id: &str) -> Option<&ProofStep> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip a step between collapsed and expanded. Returns the new expansion state; unknown
    /// ids are ignored and report `false`.
    pub fn toggle_step(&mut self, id: &str) -> bool {
        if self.step(id).is_none() {
            return false;
        }
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_owned());
            true
        }
    }

    /// Mark a step valid ("Validate") or invalid ("Flag Issue"). Returns `false` for an
    /// unknown id.
    pub fn validate_step(&mut self, id: &str, is_valid: bool) -> bool {
        match self.steps.iter_mut().find(|step| step.id == id) {
            Some(step) => {
                step.is_valid = is_valid;
                debug!(step = id, is_valid, "proof step validated");
                true
            }
            None => false,
        }
    }

    pub fn progress(&self) -> ProofProgress {
        ProofProgress {
            verified: self.steps.iter().filter(|step| step.is_valid).count(),
            total: self.steps.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProofProgress {
    pub verified: usize,
    pub total: usize,
}

impl ProofProgress {
    /// Rounded completion percentage; an empty outline is 0%.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let percent = (self.verified * 200 + self.total) / (self.total * 2);
        u8::try_from(percent).unwrap_or(100)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.verified == self.total
    }
}

impl fmt::Display for ProofProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} steps verified ({}% complete)", self.verified, self.total, self.percent())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::{ProofAnalysis, ProofAssistant, ProofProgress};
    use crate::catalog;

    #[tokio::test(start_paused = true)]
    async fn analysis_takes_the_configured_delay() {
        let assistant = ProofAssistant::new(Duration::from_millis(2000));
        let started = tokio::time::Instant::now();
        let analysis = assistant.analyze("anything").await;
        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert_eq!(analysis.steps().len(), 3);
        assert_eq!(analysis.progress().to_string(), "2/3 steps verified (67% complete)");
    }

    #[tokio::test(start_paused = true)]
    async fn problem_analysis_uses_recorded_steps() {
        let problem = catalog::find(1).expect("riemann");
        let analysis = ProofAssistant::default().analyze_problem(problem).await;
        assert_eq!(analysis.steps(), problem.proof_steps.as_slice());
        assert!(analysis.progress().is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn validation_updates_progress() {
        let mut analysis = ProofAssistant::default().analyze("").await;
        assert!(analysis.validate_step("3", true));
        assert_eq!(analysis.progress().percent(), 100);
        assert!(analysis.validate_step("1", false));
        assert_eq!(analysis.progress(), ProofProgress { verified: 2, total: 3 });
        assert!(!analysis.validate_step("missing", true));
    }

    #[test]
    fn toggling_expands_and_collapses() {
        let steps = catalog::find(1).expect("riemann").proof_steps.clone();
        let mut analysis = ProofAnalysis::new(steps);
        assert!(analysis.toggle_step("2"));
        assert!(analysis.is_expanded("2"));
        assert!(!analysis.toggle_step("2"));
        assert!(!analysis.is_expanded("2"));
        assert!(!analysis.toggle_step("nope"));
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 2, 50)]
    #[case(3, 3, 100)]
    fn percent_rounds_half_up(#[case] verified: usize, #[case] total: usize, #[case] expected: u8) {
        assert_eq!(ProofProgress { verified, total }.percent(), expected);
    }
}
