// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::layout::FlowchartLayout;
use crate::model::flow_ast::{FlowchartAst, NodeShape};
use crate::model::ids::ObjectId;

use super::canvas::{Canvas, CanvasError};
use super::text::{canvas_to_string_trimmed, text_len, truncate_with_ellipsis};

const BOX_HEIGHT: usize = 3;
/// Rows between two layers: source stem, horizontal bus, target stem.
const LAYER_GAP: usize = 3;
const COL_GAP: usize = 2;
const MAX_LABEL_LEN: usize = 24;
const MAX_EDGE_LABEL_LEN: usize = 12;
const ARROW_DOWN: char = '▼';
const LISTED_ARROW: &str = "─▶";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowchartRenderError {
    #[error("node {node_id} has no layout placement")]
    MissingPlacement { node_id: ObjectId },
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeRender {
    label: String,
    shape: NodeShape,
    box_x0: usize,
    box_x1: usize,
    box_y0: usize,
    layer: usize,
}

impl NodeRender {
    fn center_x(&self) -> usize {
        self.box_x0 + (self.box_x1 - self.box_x0) / 2
    }

    fn box_y1(&self) -> usize {
        self.box_y0 + BOX_HEIGHT - 1
    }
}

#[derive(Debug, Clone)]
struct FlowchartRenderPlan {
    node_renders: BTreeMap<ObjectId, NodeRender>,
    width: usize,
    height: usize,
}

impl FlowchartRenderPlan {
    fn build(ast: &FlowchartAst, layout: &FlowchartLayout) -> Result<Self, FlowchartRenderError> {
        let mut rows = Vec::with_capacity(layout.layers().len());
        for layer in layout.layers() {
            let mut row = Vec::with_capacity(layer.len());
            for node_id in layer {
                let node = ast
                    .nodes()
                    .get(node_id)
                    .ok_or_else(|| FlowchartRenderError::MissingPlacement {
                        node_id: node_id.clone(),
                    })?;
                let label = truncate_with_ellipsis(node.label(), MAX_LABEL_LEN);
                row.push((node_id.clone(), label, node.shape()));
            }
            rows.push(row);
        }

        let row_width = |row: &[(ObjectId, String, NodeShape)]| -> usize {
            let boxes: usize = row.iter().map(|(_, label, _)| text_len(label) + 4).sum();
            boxes + COL_GAP * row.len().saturating_sub(1)
        };
        let width = rows.iter().map(|row| row_width(row)).max().unwrap_or(0);
        let height = match rows.len() {
            0 => 0,
            n => n * BOX_HEIGHT + (n - 1) * LAYER_GAP,
        };

        let mut node_renders = BTreeMap::new();
        for (layer, row) in rows.into_iter().enumerate() {
            let mut x = (width - row_width(&row)) / 2;
            let box_y0 = layer * (BOX_HEIGHT + LAYER_GAP);
            for (node_id, label, shape) in row {
                let box_x1 = x + text_len(&label) + 3;
                node_renders.insert(
                    node_id,
                    NodeRender { label, shape, box_x0: x, box_x1, box_y0, layer },
                );
                x = box_x1 + 1 + COL_GAP;
            }
        }

        Ok(Self { node_renders, width, height })
    }

    fn node(&self, node_id: &ObjectId) -> Result<&NodeRender, FlowchartRenderError> {
        self.node_renders
            .get(node_id)
            .ok_or_else(|| FlowchartRenderError::MissingPlacement { node_id: node_id.clone() })
    }
}

fn draw_node(canvas: &mut Canvas, node: &NodeRender) -> Result<(), CanvasError> {
    let (x0, x1, y0, y1) = (node.box_x0, node.box_x1, node.box_y0, node.box_y1());
    canvas.draw_box(x0, y0, x1, y1)?;
    let corners = match node.shape {
        NodeShape::Rect => None,
        NodeShape::Round => Some(['╭', '╮', '╰', '╯']),
        NodeShape::Diamond => Some(['╱', '╲', '╲', '╱']),
    };
    if let Some([tl, tr, bl, br]) = corners {
        canvas.set(x0, y0, tl)?;
        canvas.set(x1, y0, tr)?;
        canvas.set(x0, y1, bl)?;
        canvas.set(x1, y1, br)?;
    }
    canvas.write_str(x0 + 2, y0 + 1, &node.label)
}

/// Write `text` only into blank cells, stopping at the first occupied one.
fn write_in_blank(canvas: &mut Canvas, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
    for (offset, ch) in text.chars().enumerate() {
        let cx = x + offset;
        if cx >= canvas.width() || canvas.get(cx, y)? != ' ' {
            break;
        }
        canvas.set(cx, y, ch)?;
    }
    Ok(())
}

/// Draw a flowchart as Unicode boxes stacked by layer.
///
/// Edges between adjacent layers are drawn as stems joined by a horizontal bus, ending in
/// `▼` on the target box. Every other edge (back edges, edges skipping layers) is listed
/// below the drawing as `from ─▶ to`.
pub fn render_flowchart_unicode(
    ast: &FlowchartAst,
    layout: &FlowchartLayout,
) -> Result<String, FlowchartRenderError> {
    let plan = FlowchartRenderPlan::build(ast, layout)?;
    let mut canvas = Canvas::new(plan.width, plan.height)?;

    for node in plan.node_renders.values() {
        draw_node(&mut canvas, node)?;
    }

    let mut drawn = Vec::new();
    let mut listed = Vec::new();
    for (edge_id, edge) in ast.edges() {
        let from = plan.node(edge.from_node_id())?;
        let to = plan.node(edge.to_node_id())?;
        if layout.is_back_edge(edge_id) || to.layer != from.layer + 1 {
            listed.push((from, to, edge.label()));
        } else {
            drawn.push((from, to, edge.label()));
        }
    }

    for (from, to, _) in &drawn {
        let bus_y = from.box_y1() + 2;
        canvas.draw_vline(from.center_x(), from.box_y1(), bus_y)?;
        canvas.draw_hline(from.center_x(), to.center_x(), bus_y)?;
        canvas.draw_vline(to.center_x(), bus_y, bus_y + 1)?;
    }
    for (_, to, _) in &drawn {
        canvas.set(to.center_x(), to.box_y0, ARROW_DOWN)?;
    }
    for (_, to, label) in &drawn {
        if let Some(label) = label {
            let label = truncate_with_ellipsis(label, MAX_EDGE_LABEL_LEN);
            write_in_blank(&mut canvas, to.center_x() + 2, to.box_y0 - 1, &label)?;
        }
    }

    let mut out = canvas_to_string_trimmed(&canvas);
    for (from, to, label) in listed {
        if !out.is_empty() {
            out.push('\n');
        }
        match label {
            Some(label) => {
                out.push_str(&format!("{} ─{label}{LISTED_ARROW} {}", from.label, to.label))
            }
            None => out.push_str(&format!("{} {LISTED_ARROW} {}", from.label, to.label)),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::render_flowchart_unicode;
    use crate::format::mermaid::parse_flowchart;
    use crate::layout::layout_flowchart;
    use crate::model::fixtures::{flowchart_small_dag, flowchart_with_cycle};
    use crate::model::FlowchartAst;

    fn render(ast: &FlowchartAst) -> String {
        let layout = layout_flowchart(ast).expect("layout");
        render_flowchart_unicode(ast, &layout).expect("render")
    }

    #[test]
    fn small_dag_draws_fan_out_and_fan_in() {
        let expected = [
            "   ┌───┐",
            "   │ A │",
            "   └─┬─┘",
            "     │",
            "  ┌──┴───┐",
            "  │      │",
            "┌─▼─┐  ┌─▼─┐",
            "│ B │  │ C │",
            "└─┬─┘  └─┬─┘",
            "  │      │",
            "  └──┬───┘",
            "     │",
            "   ┌─▼─┐",
            "   │ D │",
            "   └───┘",
        ]
        .join("\n");

        assert_eq!(render(&flowchart_small_dag()), expected);
    }

    #[test]
    fn back_edges_are_listed_below_the_drawing() {
        let out = render(&flowchart_with_cycle());
        assert!(out.ends_with("\nB ─▶ A"), "{out}");
    }

    #[test]
    fn straight_edge_with_label() {
        let ast = parse_flowchart("flowchart TD\nA[Start] -->|go| B[End]").expect("parse");
        let expected = [
            "┌───────┐",
            "│ Start │",
            "└───┬───┘",
            "    │",
            "    │",
            "    │ go",
            " ┌──▼──┐",
            " │ End │",
            " └─────┘",
        ]
        .join("\n");
        let out = render(&ast);
        assert_eq!(out, expected, "\n{out}");
    }

    #[test]
    fn skipped_layer_edges_are_listed_with_labels() {
        let ast = parse_flowchart("flowchart TD\nA --> B --> C\nA -->|skip| C").expect("parse");
        let out = render(&ast);
        assert!(out.ends_with("\nA ─skip─▶ C"), "{out}");
    }

    #[test]
    fn round_and_diamond_shapes_use_their_corners() {
        let ast = parse_flowchart("flowchart TD\nA(Round) --> B{Pick}").expect("parse");
        let out = render(&ast);
        assert!(out.contains("╭───────╮"), "{out}");
        assert!(out.contains("╱──▼───╲"), "{out}");
    }

    #[test]
    fn empty_flowchart_renders_nothing() {
        assert_eq!(render(&FlowchartAst::default()), "");
    }
}
