// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use gilc::diagram::{render_diagram, DiagramState, RENDER_FAILED};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join("diagrams")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

fn rendered_text(name: &str) -> String {
    match render_diagram(&read_fixture(name)) {
        DiagramState::Rendered(visual) => visual.text().to_owned(),
        other => panic!("expected {name} to render, got {other:?}"),
    }
}

#[test]
fn supported_flowchart_fixtures_render() {
    for case in [
        "flow_graph_lr_basic.mmd",
        "flow_graph_td_labeled_edges.mmd",
        "flow_graph_lr_chain.mmd",
        "flow_review_loop.mmd",
    ] {
        let text = rendered_text(case);
        assert!(!text.trim().is_empty(), "expected {case} to render non-empty output");
    }
}

#[test]
fn chain_is_drawn_top_down_in_order() {
    let text = rendered_text("flow_graph_lr_chain.mmd");
    let rows: Vec<usize> = ["│ A │", "│ B │", "│ C │", "│ D │"]
        .iter()
        .map(|label| {
            text.lines()
                .position(|line| line.contains(label))
                .unwrap_or_else(|| panic!("missing {label} in\n{text}"))
        })
        .collect();
    assert!(rows.windows(2).all(|pair| pair[0] < pair[1]), "{rows:?}\n{text}");
    assert_eq!(text.matches('▼').count(), 3);
}

#[test]
fn review_loop_lists_its_back_edge() {
    let text = rendered_text("flow_review_loop.mmd");
    assert!(text.contains("╭───────╮"), "{text}");
    assert!(text.ends_with("Review ─revise─▶ Draft"), "{text}");
}

#[test]
fn unsupported_and_broken_fixtures_fail_inline() {
    for (case, detail) in [
        ("seq_simple.mmd", "unsupported diagram type: sequenceDiagram"),
        ("flow_unterminated_label.mmd", "line 2"),
    ] {
        let state = render_diagram(&read_fixture(case));
        let message = state.error_message().unwrap_or_else(|| panic!("{case} rendered"));
        assert!(message.starts_with(RENDER_FAILED), "{message}");
        assert!(message.contains(detail), "{case}: {message}");
    }
}
