// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The built-in problem catalog.

use std::sync::OnceLock;

use chrono::NaiveDate;

use crate::model::{
    AlternativeProof, HistoricalContribution, Problem, ProblemSummary, ProofStep, RelatedProblem,
};

/// Category filters offered by the problem listing, in display order.
pub const CATEGORIES: [&str; 7] =
    ["Foundation", "Geometry", "AI Ethics", "Number Theory", "Topology", "Logic", "Cybernetics"];

const RIEMANN_CONTENT: &str = r#"# The Riemann Hypothesis: A Computational Approach

## Abstract

The Riemann Hypothesis stands as one of the most significant unsolved problems in mathematics. This research presents a distributed computational framework for verifying zeros of the Riemann zeta function on the critical line.

## Mathematical Foundation

Let $\zeta(s)$ be the Riemann zeta function defined for $\text{Re}(s) > 1$ by:

$$\zeta(s) = \sum_{n=1}^{\infty} \frac{1}{n^s}$$

The Riemann Hypothesis conjectures that all non-trivial zeros of $\zeta(s)$ have real part equal to $\frac{1}{2}$.

## Computational Methodology

### Zero Detection Algorithm

We employ the Gram-Schmidt method combined with Turing's technique:

$$G(t) = \arg\left(\zeta\left(\frac{1}{2} + it\right)\right) - \frac{t}{2}\log\frac{t}{2\pi} + \frac{t}{2}$$

### Verification Protocol

For each candidate zero $\rho = \frac{1}{2} + i\gamma$:

1. **Precision Computation**: Calculate $|\zeta(\rho)|$ with arbitrary precision
2. **Distributed Validation**: Multi-node verification using independent algorithms
3. **Consensus Protocol**: Byzantine fault-tolerant agreement on results

```mermaid
flowchart TD
  C[Candidate zero] --> P[Precision computation]
  P --> V1[Validator A]
  P --> V2[Validator B]
  V1 --> Q{Consensus}
  V2 --> Q
  Q -->|agree| R(Recorded)
```

## Results

Our distributed network has verified over $10^{12}$ zeros, all confirming the hypothesis.

| Year | Contributor | Contribution |
|------|-------------|--------------|
| 1859 | Bernhard Riemann | Original conjecture formulation |
| 1914 | G.H. Hardy | Infinitely many zeros on critical line |
| 1986 | A. Odlyzko | Computational verification methods |

## Conclusion

While computational verification cannot constitute a proof, our results provide strong empirical evidence supporting the Riemann Hypothesis.
"#;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn summary(
    id: u32,
    title: &str,
    description: &str,
    tags: [&str; 2],
    status: &str,
    contributors: u32,
    last_update: NaiveDate,
) -> ProblemSummary {
    ProblemSummary {
        id,
        title: title.to_owned(),
        description: description.to_owned(),
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        status: status.to_owned(),
        contributors,
        last_update,
    }
}

/// A listing-only entry: its page is the title and description.
fn outline(summary: ProblemSummary) -> Problem {
    let content = format!("# {}\n\n{}\n", summary.title, summary.description);
    Problem {
        summary,
        historical_chain: Vec::new(),
        content,
        proof_steps: Vec::new(),
        alternative_proofs: Vec::new(),
        related_problems: Vec::new(),
    }
}

fn riemann() -> Problem {
    let contribution = |year, contributor: &str, contribution: &str| HistoricalContribution {
        year,
        contributor: contributor.to_owned(),
        contribution: contribution.to_owned(),
    };

    Problem {
        summary: summary(
            1,
            "Riemann Hypothesis Verification",
            "Computational verification of the Riemann Hypothesis for critical strip zeros using distributed validation networks.",
            ["Foundation", "Number Theory"],
            "Active",
            127,
            date(2024, 1, 15),
        ),
        historical_chain: vec![
            contribution(1859, "Bernhard Riemann", "Original conjecture formulation"),
            contribution(1896, "Hadamard & de la Vallée-Poussin", "Prime Number Theorem proof"),
            contribution(1914, "G.H. Hardy", "Infinitely many zeros on critical line"),
            contribution(1986, "A. Odlyzko", "Computational verification methods"),
        ],
        content: RIEMANN_CONTENT.to_owned(),
        proof_steps: vec![
            ProofStep::new(
                "1",
                "Define the Riemann zeta function ζ(s) for Re(s) > 1",
                "Standard analytic continuation",
                true,
            ),
            ProofStep::new(
                "2",
                "Extend ζ(s) meromorphically to entire complex plane",
                "Riemann's functional equation",
                true,
            )
            .with_dependencies(&["1"]),
            ProofStep::new(
                "3",
                "Apply computational verification to critical strip",
                "Distributed validation network",
                true,
            )
            .with_suggestions(&["Consider higher precision algorithms"])
            .with_dependencies(&["1", "2"]),
        ],
        alternative_proofs: vec![
            AlternativeProof {
                title: "Analytic Approach".to_owned(),
                description: "Direct complex analysis using contour integration".to_owned(),
                complexity: "High".to_owned(),
            },
            AlternativeProof {
                title: "Probabilistic Method".to_owned(),
                description: "Statistical modeling of zero distribution".to_owned(),
                complexity: "Medium".to_owned(),
            },
        ],
        related_problems: vec![
            RelatedProblem {
                id: 2,
                title: "Goldbach Conjecture".to_owned(),
                relation: "Number theory foundation".to_owned(),
            },
            RelatedProblem {
                id: 3,
                title: "Twin Prime Conjecture".to_owned(),
                relation: "Prime distribution".to_owned(),
            },
        ],
    }
}

fn build() -> Vec<Problem> {
    vec![
        riemann(),
        outline(summary(
            2,
            "AI Decision Boundary Ethics",
            "Formal logical framework for ethical decision boundaries in autonomous AI systems operating in complex social environments.",
            ["AI Ethics", "Logic"],
            "Under Review",
            89,
            date(2024, 1, 12),
        )),
        outline(summary(
            3,
            "Quantum Logic Gate Optimization",
            "Mathematical proof of optimal quantum gate sequences for universal quantum computing with minimal decoherence.",
            ["Cybernetics", "Foundation"],
            "Solved",
            203,
            date(2024, 1, 10),
        )),
        outline(summary(
            4,
            "Topological Data Persistence",
            "Persistence homology applications in high-dimensional data analysis with formal convergence guarantees.",
            ["Topology", "AI Ethics"],
            "Active",
            156,
            date(2024, 1, 8),
        )),
    ]
}

pub fn problems() -> &'static [Problem] {
    static PROBLEMS: OnceLock<Vec<Problem>> = OnceLock::new();
    PROBLEMS.get_or_init(build)
}

pub fn find(id: u32) -> Option<&'static Problem> {
    problems().iter().find(|problem| problem.summary.id == id)
}

pub fn summaries() -> impl Iterator<Item = &'static ProblemSummary> {
    problems().iter().map(|problem| &problem.summary)
}

/// Listing filter: an exact tag match (when a category is given) and a case-insensitive
/// substring of the title or description (when the search is not blank).
pub fn filter(category: Option<&str>, search: &str) -> Vec<&'static ProblemSummary> {
    let needle = search.trim().to_lowercase();
    summaries()
        .filter(|summary| category.map_or(true, |cat| summary.tags.iter().any(|tag| tag == cat)))
        .filter(|summary| {
            needle.is_empty()
                || summary.title.to_lowercase().contains(&needle)
                || summary.description.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{filter, find, problems, CATEGORIES};
    use crate::content::render;
    use crate::diagram::render_diagram;

    #[test]
    fn catalog_ids_are_unique_and_ordered() {
        let ids: Vec<u32> = problems().iter().map(|p| p.summary.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn every_tag_is_a_known_category() {
        for problem in problems() {
            for tag in &problem.summary.tags {
                assert!(CATEGORIES.contains(&tag.as_str()), "{tag}");
            }
        }
    }

    #[rstest]
    #[case(None, "", &[1, 2, 3, 4])]
    #[case(Some("AI Ethics"), "", &[2, 4])]
    #[case(None, "QUANTUM", &[3])]
    #[case(Some("Foundation"), "riemann", &[1])]
    #[case(Some("Geometry"), "", &[])]
    #[case(None, "  distributed ", &[1])]
    fn filters_by_category_and_search(
        #[case] category: Option<&str>,
        #[case] search: &str,
        #[case] expected: &[u32],
    ) {
        let ids: Vec<u32> = filter(category, search).iter().map(|s| s.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn riemann_page_renders_with_its_diagram() {
        let problem = find(1).expect("riemann");
        let doc = render(&problem.content);
        let diagrams: Vec<&str> = doc.diagrams().collect();
        assert_eq!(diagrams.len(), 1);
        assert!(render_diagram(diagrams[0]).visual().is_some());
        assert!(doc.blocks().iter().any(|b| b.kind_name() == "table"));
    }

    #[test]
    fn unknown_problem_is_none() {
        assert!(find(99).is_none());
    }
}
