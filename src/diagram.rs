// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram sub-renderer.
//!
//! A diagram description compiles into a [`DiagramVisual`] or fails with a message that is
//! shown inline. Failures never leave this module as errors; they become
//! [`DiagramState::Errored`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::DiagramError;
use crate::format::mermaid::{header_keyword, parse_flowchart};
use crate::layout::layout_flowchart;
use crate::render::render_flowchart_unicode;

/// Prefix of every inline diagram error.
pub const RENDER_FAILED: &str = "Failed to render diagram";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramVisual {
    text: String,
    node_count: usize,
    edge_count: usize,
}

impl DiagramVisual {
    pub fn new(text: String, node_count: usize, edge_count: usize) -> Self {
        Self { text, node_count, edge_count }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn width(&self) -> usize {
        self.lines().map(|line| line.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.lines().count()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum DiagramState {
    Loading,
    Rendered(DiagramVisual),
    Errored(String),
}

impl DiagramState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn visual(&self) -> Option<&DiagramVisual> {
        match self {
            Self::Rendered(visual) => Some(visual),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Errored(message) => Some(message),
            _ => None,
        }
    }

    fn from_result(result: Result<DiagramVisual, DiagramError>) -> Self {
        match result {
            Ok(visual) => {
                debug!(
                    nodes = visual.node_count(),
                    edges = visual.edge_count(),
                    "diagram rendered"
                );
                Self::Rendered(visual)
            }
            Err(err) => {
                warn!(error = %err, "diagram failed to render");
                Self::Errored(format!("{RENDER_FAILED}: {err}"))
            }
        }
    }
}

/// The diagramming collaborator: compiles one description into a visual.
#[async_trait]
pub trait DiagramCompiler: Send + Sync {
    async fn compile(&self, description: &str) -> Result<DiagramVisual, DiagramError>;
}

/// Built-in compiler for Mermaid `flowchart`/`graph` descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidCompiler;

impl MermaidCompiler {
    pub fn compile_now(&self, description: &str) -> Result<DiagramVisual, DiagramError> {
        let keyword = header_keyword(description).ok_or(DiagramError::Empty)?;
        if keyword != "flowchart" && keyword != "graph" {
            return Err(DiagramError::UnsupportedKind { keyword: keyword.to_owned() });
        }

        let ast = parse_flowchart(description)?;
        let layout = layout_flowchart(&ast)?;
        let text = render_flowchart_unicode(&ast, &layout)?;
        Ok(DiagramVisual::new(text, ast.nodes().len(), ast.edges().len()))
    }
}

#[async_trait]
impl DiagramCompiler for MermaidCompiler {
    async fn compile(&self, description: &str) -> Result<DiagramVisual, DiagramError> {
        self.compile_now(description)
    }
}

/// Compile `description` with the built-in compiler. Every call compiles afresh.
pub fn render_diagram(description: &str) -> DiagramState {
    DiagramState::from_result(MermaidCompiler.compile_now(description))
}

pub async fn render_diagram_with<C>(compiler: &C, description: &str) -> DiagramState
where
    C: DiagramCompiler + ?Sized,
{
    DiagramState::from_result(compiler.compile(description).await)
}

/// One diagram being compiled in the background.
///
/// Reports [`DiagramState::Loading`] until the compile task settles. Dropping the view
/// aborts the task, so a late result is never observed.
#[derive(Debug)]
pub struct DiagramView {
    rx: watch::Receiver<DiagramState>,
    task: JoinHandle<()>,
}

impl DiagramView {
    /// Start compiling on the current Tokio runtime.
    pub fn spawn(compiler: Arc<dyn DiagramCompiler>, description: impl Into<String>) -> Self {
        let description = description.into();
        let (tx, rx) = watch::channel(DiagramState::Loading);
        let task = tokio::spawn(async move {
            let state = render_diagram_with(compiler.as_ref(), &description).await;
            tx.send_replace(state);
        });
        Self { rx, task }
    }

    pub fn state(&self) -> DiagramState {
        self.rx.borrow().clone()
    }

    /// Wait for the compile to settle. A compile task that died without a result (it
    /// panicked) settles as `Errored`.
    pub async fn settled(&mut self) -> DiagramState {
        match self.rx.wait_for(DiagramState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => DiagramState::Errored(format!("{RENDER_FAILED}: compiler stopped")),
        }
    }
}

impl Drop for DiagramView {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::{
        render_diagram, DiagramCompiler, DiagramState, DiagramView, DiagramVisual, MermaidCompiler,
        RENDER_FAILED,
    };
    use crate::error::DiagramError;

    #[derive(Debug, Default)]
    struct SlowCompiler {
        calls: AtomicUsize,
        finished: AtomicUsize,
    }

    #[async_trait]
    impl DiagramCompiler for SlowCompiler {
        async fn compile(&self, description: &str) -> Result<DiagramVisual, DiagramError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(500)).await;
            self.finished.fetch_add(1, Ordering::SeqCst);
            if description == "boom" {
                return Err(DiagramError::Compile("boom".to_owned()));
            }
            Ok(DiagramVisual::new(description.to_owned(), 0, 0))
        }
    }

    struct PanickingCompiler;

    #[async_trait]
    impl DiagramCompiler for PanickingCompiler {
        async fn compile(&self, _description: &str) -> Result<DiagramVisual, DiagramError> {
            panic!("compiler bug");
        }
    }

    #[test]
    fn flowchart_renders() {
        let state = render_diagram("graph TD\n  A[Start] --> B[End]");
        let visual = state.visual().expect("rendered");
        assert_eq!(visual.node_count(), 2);
        assert_eq!(visual.edge_count(), 1);
        assert!(visual.text().contains("│ Start │"));
        assert!(visual.height() > 0);
    }

    #[rstest]
    #[case("")]
    #[case("   \n%% only a comment\n")]
    #[case("sequenceDiagram\n  Alice->>Bob: hi")]
    #[case("pie title Pets\n  \"Dogs\" : 3")]
    #[case("flowchart TD\nA[unterminated --> B")]
    #[case("flowchart XY\nA --> B")]
    fn failures_become_errored_state(#[case] description: &str) {
        let state = render_diagram(description);
        let message = state.error_message().expect("errored");
        assert!(message.starts_with(RENDER_FAILED), "{message}");
        assert!(message.len() > RENDER_FAILED.len());
    }

    #[test]
    fn unsupported_kind_names_the_keyword() {
        assert_eq!(
            MermaidCompiler.compile_now("sequenceDiagram\nA->>B: x"),
            Err(DiagramError::UnsupportedKind { keyword: "sequenceDiagram".to_owned() })
        );
    }

    #[test]
    fn identical_descriptions_render_identically() {
        let description = "flowchart LR\nA --> B\nB --> A";
        assert_eq!(render_diagram(description), render_diagram(description));
    }

    #[tokio::test(start_paused = true)]
    async fn view_is_loading_until_the_compile_settles() {
        let compiler = Arc::new(SlowCompiler::default());
        let mut view = DiagramView::spawn(compiler.clone(), "graph TD");

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(view.state(), DiagramState::Loading);

        let state = view.settled().await;
        assert_eq!(state.visual().map(DiagramVisual::text), Some("graph TD"));
        assert_eq!(view.state(), state);
    }

    #[tokio::test(start_paused = true)]
    async fn view_reports_compile_failures_inline() {
        let mut view = DiagramView::spawn(Arc::new(SlowCompiler::default()), "boom");
        let state = view.settled().await;
        assert_eq!(
            state.error_message(),
            Some("Failed to render diagram: diagram compiler failed: boom")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn each_view_compiles_again() {
        let compiler = Arc::new(SlowCompiler::default());
        let mut first = DiagramView::spawn(compiler.clone(), "graph TD");
        let mut second = DiagramView::spawn(compiler.clone(), "graph TD");
        first.settled().await;
        second.settled().await;
        assert_eq!(compiler.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_view_abandons_the_compile() {
        let compiler = Arc::new(SlowCompiler::default());
        let view = DiagramView::spawn(compiler.clone(), "graph TD");
        tokio::task::yield_now().await;
        drop(view);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(compiler.calls.load(Ordering::SeqCst), 1);
        assert_eq!(compiler.finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn panicking_compiler_settles_as_errored() {
        let mut view = DiagramView::spawn(Arc::new(PanickingCompiler), "graph TD");
        let state = view.settled().await;
        assert!(state.error_message().is_some_and(|m| m.starts_with(RENDER_FAILED)));
    }
}
