// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

use super::ident::validate_mermaid_ident;
pub use super::ident::MermaidIdentError;

use crate::model::flow_ast::{FlowDirection, FlowEdge, FlowNode, FlowchartAst, NodeShape};
use crate::model::ids::{IdError, ObjectId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MermaidFlowchartParseError {
    #[error("expected 'flowchart' or 'graph' as the first non-empty line")]
    MissingHeader,
    #[error("invalid flowchart direction on line {line_no}: {direction} (expected TD/TB/LR/RL/BT)")]
    InvalidDirection { line_no: usize, direction: String },
    #[error("unsupported Mermaid syntax on line {line_no}: {line}")]
    UnsupportedSyntax { line_no: usize, line: String },
    #[error("invalid node id on line {line_no}: {name} ({reason})")]
    InvalidNodeId { line_no: usize, name: String, reason: MermaidIdentError },
    #[error(
        "invalid node label syntax on line {line_no}: {token} (expected '<id>[<label>]', '<id>(<label>)', or '<id>{{<label>}}')"
    )]
    InvalidNodeLabelSyntax { line_no: usize, token: String },
    #[error("empty node label on line {line_no}: {token}")]
    EmptyNodeLabel { line_no: usize, token: String },
    #[error("empty edge label on line {line_no}: {line}")]
    EmptyEdgeLabel { line_no: usize, line: String },
    #[error(
        "conflicting label for node '{mermaid_id}' on line {line_no}: '{existing_label}' vs '{new_label}'"
    )]
    ConflictingNodeLabel {
        line_no: usize,
        mermaid_id: String,
        existing_label: String,
        new_label: String,
    },
    #[error(transparent)]
    InvalidObjectId(#[from] IdError),
}

fn node_id_from_mermaid_id(name: &str) -> Result<ObjectId, IdError> {
    ObjectId::new(format!("n:{name}"))
}

fn edge_id_from_index(index: usize) -> Result<ObjectId, IdError> {
    ObjectId::new(format!("e:{index:04}"))
}

fn is_edge_op_start_char(ch: char) -> bool {
    matches!(ch, '<' | '-' | '=' | '.')
}

fn is_edge_op_char(ch: char) -> bool {
    matches!(ch, '<' | '>' | '-' | '=' | '.' | 'o' | 'x')
}

fn is_probable_edge_operator(op: &str) -> bool {
    op.chars().filter(|ch| matches!(ch, '-' | '=' | '.')).count() >= 2
}

fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '[' => Some(']'),
        '(' => Some(')'),
        '{' => Some('}'),
        _ => None,
    }
}

/// `(lhs, operator, rhs)` around the first edge operator outside node labels.
fn split_once_edge_operator(line: &str) -> Option<(&str, &str, &str)> {
    let mut in_label: Option<char> = None;
    let mut op_start: Option<usize> = None;

    for (idx, ch) in line.char_indices() {
        if let Some(close) = in_label {
            if ch == close {
                in_label = None;
            }
            continue;
        }
        if let Some(close) = closing_delimiter(ch) {
            in_label = Some(close);
            continue;
        }
        if is_edge_op_start_char(ch) {
            op_start = Some(idx);
            break;
        }
    }

    let start = op_start?;
    let end = line[start..]
        .char_indices()
        .find(|(_, ch)| !is_edge_op_char(*ch))
        .map_or(line.len(), |(idx, _)| start + idx);

    let lhs = &line[..start];
    let op = &line[start..end];
    let rhs = &line[end..];
    if lhs.trim().is_empty() || !is_probable_edge_operator(op) {
        return None;
    }

    Some((lhs, op, rhs))
}

/// Split `raw` on `sep` wherever it is outside a node label.
fn split_outside_labels(raw: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_label: Option<char> = None;
    let mut in_pipe = false;
    let mut start = 0usize;

    for (idx, ch) in raw.char_indices() {
        if let Some(close) = in_label {
            if ch == close {
                in_label = None;
            }
            continue;
        }
        if ch == '|' {
            in_pipe = !in_pipe;
            continue;
        }
        if in_pipe {
            continue;
        }
        if let Some(close) = closing_delimiter(ch) {
            in_label = Some(close);
        } else if ch == sep {
            parts.push(&raw[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    parts.push(&raw[start..]);
    parts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeDirection {
    Forward,
    Reverse,
}

fn edge_direction(op: &str) -> EdgeDirection {
    if op.contains('<') && !op.contains('>') {
        EdgeDirection::Reverse
    } else {
        EdgeDirection::Forward
    }
}

fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("%%")
}

/// Statements accepted for compatibility but without effect on the drawing.
fn is_ignorable_statement(trimmed: &str) -> bool {
    let keyword = trimmed.split_whitespace().next().unwrap_or("");
    matches!(
        keyword,
        "subgraph" | "end" | "direction" | "style" | "class" | "classDef" | "click" | "linkStyle"
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeSpec {
    mermaid_id: String,
    label: Option<String>,
    shape: NodeShape,
}

/// Drop an inner bracket pair (`([stadium])`, `((circle))`, `[[sub]]`) and surrounding quotes.
fn unwrap_label(label: &str) -> &str {
    let mut label = label.trim();
    if let Some(open) = label.chars().next() {
        if let Some(close) = closing_delimiter(open) {
            if label.len() >= 2 && label.ends_with(close) {
                label = label[1..label.len() - 1].trim();
            }
        }
    }
    if label.len() >= 2 && label.starts_with('"') && label.ends_with('"') {
        label = label[1..label.len() - 1].trim();
    }
    label
}

fn parse_node_spec(token: &str, line_no: usize) -> Result<NodeSpec, MermaidFlowchartParseError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(MermaidFlowchartParseError::UnsupportedSyntax {
            line_no,
            line: token.to_owned(),
        });
    }

    let open_delim = trimmed.char_indices().find(|(_, ch)| closing_delimiter(*ch).is_some());
    let Some((open_idx, open_ch)) = open_delim else {
        validate_mermaid_ident(trimmed).map_err(|reason| {
            MermaidFlowchartParseError::InvalidNodeId { line_no, name: trimmed.to_owned(), reason }
        })?;
        return Ok(NodeSpec { mermaid_id: trimmed.to_owned(), label: None, shape: NodeShape::Rect });
    };

    let (close_ch, shape) = match open_ch {
        '(' => (')', NodeShape::Round),
        '{' => ('}', NodeShape::Diamond),
        _ => (']', NodeShape::Rect),
    };

    let id_raw = trimmed[..open_idx].trim();
    validate_mermaid_ident(id_raw).map_err(|reason| MermaidFlowchartParseError::InvalidNodeId {
        line_no,
        name: id_raw.to_owned(),
        reason,
    })?;

    let label_with_close = &trimmed[open_idx + open_ch.len_utf8()..];
    let Some(label_raw) = label_with_close.strip_suffix(close_ch) else {
        return Err(MermaidFlowchartParseError::InvalidNodeLabelSyntax {
            line_no,
            token: trimmed.to_owned(),
        });
    };

    let label = unwrap_label(label_raw);
    if label.is_empty() {
        return Err(MermaidFlowchartParseError::EmptyNodeLabel {
            line_no,
            token: trimmed.to_owned(),
        });
    }

    Ok(NodeSpec { mermaid_id: id_raw.to_owned(), label: Some(label.to_owned()), shape })
}

/// `A & B` on either side of an edge.
fn parse_node_group(
    raw: &str,
    line_no: usize,
) -> Result<Vec<NodeSpec>, MermaidFlowchartParseError> {
    split_outside_labels(raw, '&').into_iter().map(|part| parse_node_spec(part, line_no)).collect()
}

#[derive(Debug, Default)]
struct FlowchartParser {
    ast: FlowchartAst,
    saw_header: bool,
    edge_index: usize,
}

impl FlowchartParser {
    fn header(&mut self, trimmed: &str, line_no: usize) -> Result<(), MermaidFlowchartParseError> {
        let trimmed = trimmed.trim_end_matches(';');
        let mut parts = trimmed.split_whitespace();
        let keyword = parts.next().unwrap_or("");
        if keyword != "flowchart" && keyword != "graph" {
            return Err(MermaidFlowchartParseError::MissingHeader);
        }

        if let Some(direction) = parts.next() {
            let parsed = FlowDirection::from_keyword(direction).ok_or_else(|| {
                MermaidFlowchartParseError::InvalidDirection {
                    line_no,
                    direction: direction.to_owned(),
                }
            })?;
            if parts.next().is_some() {
                return Err(MermaidFlowchartParseError::UnsupportedSyntax {
                    line_no,
                    line: trimmed.to_owned(),
                });
            }
            self.ast.set_direction(parsed);
        }

        self.saw_header = true;
        Ok(())
    }

    fn ensure_node(
        &mut self,
        spec: &NodeSpec,
        line_no: usize,
    ) -> Result<ObjectId, MermaidFlowchartParseError> {
        let node_id = node_id_from_mermaid_id(&spec.mermaid_id)?;

        let Some(label) = spec.label.as_deref() else {
            self.ast
                .nodes_mut()
                .entry(node_id.clone())
                .or_insert_with(|| FlowNode::implicit(spec.mermaid_id.clone()));
            return Ok(node_id);
        };

        if let Some(existing) = self.ast.nodes().get(&node_id) {
            if existing.has_explicit_label()
                && (existing.label() != label || existing.shape() != spec.shape)
            {
                return Err(MermaidFlowchartParseError::ConflictingNodeLabel {
                    line_no,
                    mermaid_id: spec.mermaid_id.clone(),
                    existing_label: existing.label().to_owned(),
                    new_label: label.to_owned(),
                });
            }
        }

        self.ast
            .nodes_mut()
            .insert(node_id.clone(), FlowNode::new(spec.mermaid_id.clone(), label, spec.shape));
        Ok(node_id)
    }

    /// One edge per (from, to) pair; `<--` style operators swap the endpoints.
    fn connect(
        &mut self,
        lhs: &[NodeSpec],
        op: &str,
        rhs: &[NodeSpec],
        label: Option<&str>,
        dotted: bool,
        line_no: usize,
    ) -> Result<(), MermaidFlowchartParseError> {
        let (sources, targets) = match edge_direction(op) {
            EdgeDirection::Forward => (lhs, rhs),
            EdgeDirection::Reverse => (rhs, lhs),
        };

        for source in sources {
            for target in targets {
                let from = self.ensure_node(source, line_no)?;
                let to = self.ensure_node(target, line_no)?;
                self.edge_index += 1;
                let edge_id = edge_id_from_index(self.edge_index)?;
                let edge = FlowEdge::new(from, to)
                    .with_label(label.map(str::to_owned))
                    .with_dotted(dotted);
                self.ast.edges_mut().insert(edge_id, edge);
            }
        }
        Ok(())
    }

    fn statement(
        &mut self,
        statement: &str,
        line_no: usize,
    ) -> Result<(), MermaidFlowchartParseError> {
        // Inline label syntax: `<lhs> -- <label> --> <rhs>` (also `==` and `-.`).
        if let Some((lhs_raw, op1, rest1)) = split_once_edge_operator(statement) {
            if matches!(op1, "--" | "==" | "-.") {
                if let Some((label_raw, op2, rhs_raw)) =
                    split_once_edge_operator(rest1.trim_start())
                {
                    let label = label_raw.trim();
                    if !label.is_empty() {
                        let lhs = parse_node_group(lhs_raw, line_no)?;
                        let rhs = parse_node_group(rhs_raw, line_no)?;
                        let dotted = op1.contains('.') || op2.contains('.');
                        return self.connect(&lhs, op2, &rhs, Some(label), dotted, line_no);
                    }
                }
            }
        }

        let Some((first_raw, first_op, tail)) = split_once_edge_operator(statement) else {
            for spec in parse_node_group(statement, line_no)? {
                self.ensure_node(&spec, line_no)?;
            }
            return Ok(());
        };

        let mut current = parse_node_group(first_raw, line_no)?;
        let mut op = first_op;
        let mut rest = tail;

        loop {
            let mut edge_label: Option<&str> = None;
            let rhs_and_more = rest.trim_start();
            let rhs_and_more = if let Some(after) = rhs_and_more.strip_prefix('|') {
                let Some(end_idx) = after.find('|') else {
                    return Err(MermaidFlowchartParseError::UnsupportedSyntax {
                        line_no,
                        line: statement.to_owned(),
                    });
                };
                let label = after[..end_idx].trim();
                if label.is_empty() {
                    return Err(MermaidFlowchartParseError::EmptyEdgeLabel {
                        line_no,
                        line: statement.to_owned(),
                    });
                }
                edge_label = Some(label);
                after[end_idx + 1..].trim_start()
            } else {
                rhs_and_more
            };

            let next = split_once_edge_operator(rhs_and_more);
            let rhs_raw = next.map_or(rhs_and_more, |(rhs_raw, _, _)| rhs_raw);
            let rhs = parse_node_group(rhs_raw, line_no)?;

            self.connect(&current, op, &rhs, edge_label, op.contains('.'), line_no)?;

            let Some((_, next_op, next_rest)) = next else {
                break;
            };
            current = rhs;
            op = next_op;
            rest = next_rest;
        }

        Ok(())
    }
}

/// Parse a deliberately limited Mermaid `flowchart` subset.
///
/// Supported:
/// - `flowchart`/`graph` header with optional direction (`TD`, `TB`, `LR`, `RL`, `BT`)
/// - comment lines starting with `%%`, and `;` separated statements
/// - node declarations: `<id>`, `<id>[<label>]`, `<id>(<label>)`, `<id>{<label>}`
/// - edges, chains (`a --> b --> c`) and groups (`a & b --> c`)
/// - edge labels: `<lhs> -->|<label>| <rhs>` or `<lhs> -- <label> --> <rhs>`
/// - dotted edges (`-.->`); `subgraph`/`style`/`classDef`/`linkStyle` lines are skipped
pub fn parse_flowchart(input: &str) -> Result<FlowchartAst, MermaidFlowchartParseError> {
    let mut parser = FlowchartParser::default();

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || is_comment_line(trimmed) {
            continue;
        }

        if !parser.saw_header {
            parser.header(trimmed, line_no)?;
            continue;
        }

        for statement in split_outside_labels(trimmed, ';') {
            let statement = statement.trim();
            if statement.is_empty() || is_ignorable_statement(statement) {
                continue;
            }
            parser.statement(statement, line_no)?;
        }
    }

    if !parser.saw_header {
        return Err(MermaidFlowchartParseError::MissingHeader);
    }

    Ok(parser.ast)
}

#[cfg(test)]
mod tests {
    use super::{parse_flowchart, MermaidFlowchartParseError};
    use crate::model::flow_ast::{FlowDirection, NodeShape};
    use crate::model::ids::ObjectId;

    fn oid(value: &str) -> ObjectId {
        ObjectId::new(value).expect("object id")
    }

    fn edge_pairs(ast: &crate::model::FlowchartAst) -> Vec<(&str, &str)> {
        ast.edges()
            .values()
            .map(|edge| (edge.from_node_id().as_str(), edge.to_node_id().as_str()))
            .collect()
    }

    #[test]
    fn parses_header_direction_and_labelled_nodes() {
        let ast =
            parse_flowchart("graph LR\n  A[Start] --> B{Decide}\n  B --> C(Done)").expect("parse");

        assert_eq!(ast.direction(), FlowDirection::LeftRight);
        assert_eq!(ast.nodes().len(), 3);
        let b = &ast.nodes()[&oid("n:B")];
        assert_eq!(b.label(), "Decide");
        assert_eq!(b.shape(), NodeShape::Diamond);
        assert_eq!(ast.nodes()[&oid("n:C")].shape(), NodeShape::Round);
        assert_eq!(edge_pairs(&ast), [("n:A", "n:B"), ("n:B", "n:C")]);
    }

    #[test]
    fn header_without_direction_defaults_to_top_down() {
        let ast = parse_flowchart("flowchart\nA --> B").expect("parse");
        assert_eq!(ast.direction(), FlowDirection::TopDown);
    }

    #[test]
    fn parses_chains_and_groups() {
        let ast = parse_flowchart("flowchart TD\nA --> B --> C\nA & B --> D").expect("parse");
        assert_eq!(
            edge_pairs(&ast),
            [("n:A", "n:B"), ("n:B", "n:C"), ("n:A", "n:D"), ("n:B", "n:D")]
        );
    }

    #[test]
    fn parses_both_edge_label_forms() {
        let ast = parse_flowchart("flowchart TD\nA -->|yes| B\nA -- no --> C").expect("parse");
        let labels: Vec<_> = ast.edges().values().map(|edge| edge.label()).collect();
        assert_eq!(labels, [Some("yes"), Some("no")]);
    }

    #[test]
    fn dotted_and_reverse_edges() {
        let ast = parse_flowchart("flowchart TD\nA -.-> B\nC <-- D").expect("parse");
        let edges: Vec<_> = ast.edges().values().collect();
        assert!(edges[0].is_dotted());
        assert_eq!(edges[1].from_node_id(), &oid("n:D"));
        assert_eq!(edges[1].to_node_id(), &oid("n:C"));
        assert!(!edges[1].is_dotted());
    }

    #[test]
    fn semicolons_comments_and_subgraphs_are_handled() {
        let input = "graph TD;\n%% note\nsubgraph one\nA-->B; B-->C;\nend\nstyle A fill:#f9f";
        let ast = parse_flowchart(input).expect("parse");
        assert_eq!(ast.edges().len(), 2);
    }

    #[test]
    fn stadium_and_quoted_labels_are_unwrapped() {
        let ast =
            parse_flowchart("flowchart TD\nA([Begin]) --> B[\"Quoted text\"]").expect("parse");
        assert_eq!(ast.nodes()[&oid("n:A")].label(), "Begin");
        assert_eq!(ast.nodes()[&oid("n:B")].label(), "Quoted text");
    }

    #[test]
    fn implicit_reference_then_label_upgrades_node() {
        let ast = parse_flowchart("flowchart TD\nA --> B\nB[Second]").expect("parse");
        assert_eq!(ast.nodes()[&oid("n:B")].label(), "Second");
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(parse_flowchart("A --> B"), Err(MermaidFlowchartParseError::MissingHeader));
        assert_eq!(parse_flowchart(""), Err(MermaidFlowchartParseError::MissingHeader));
    }

    #[test]
    fn rejects_invalid_direction() {
        assert_eq!(
            parse_flowchart("flowchart XY\nA --> B"),
            Err(MermaidFlowchartParseError::InvalidDirection {
                line_no: 1,
                direction: "XY".to_owned()
            })
        );
    }

    #[test]
    fn rejects_conflicting_labels() {
        let err = parse_flowchart("flowchart TD\nA[One] --> B\nA[Two]").expect_err("conflict");
        assert!(matches!(err, MermaidFlowchartParseError::ConflictingNodeLabel { line_no: 3, .. }));
    }

    #[test]
    fn rejects_empty_labels_and_bad_ids() {
        assert!(matches!(
            parse_flowchart("flowchart TD\nA[] --> B"),
            Err(MermaidFlowchartParseError::EmptyNodeLabel { .. })
        ));
        assert!(matches!(
            parse_flowchart("flowchart TD\nA -->|| B"),
            Err(MermaidFlowchartParseError::EmptyEdgeLabel { .. })
        ));
        assert!(matches!(
            parse_flowchart("flowchart TD\nthis is prose"),
            Err(MermaidFlowchartParseError::InvalidNodeId { .. })
        ));
    }
}
