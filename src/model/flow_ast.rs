// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::ObjectId;

/// Compiled form of a `flowchart`/`graph` diagram description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowchartAst {
    direction: FlowDirection,
    nodes: BTreeMap<ObjectId, FlowNode>,
    edges: BTreeMap<ObjectId, FlowEdge>,
}

impl FlowchartAst {
    pub fn direction(&self) -> FlowDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: FlowDirection) {
        self.direction = direction;
    }

    pub fn nodes(&self) -> &BTreeMap<ObjectId, FlowNode> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut BTreeMap<ObjectId, FlowNode> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &BTreeMap<ObjectId, FlowEdge> {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut BTreeMap<ObjectId, FlowEdge> {
        &mut self.edges
    }
}

/// Declared direction. Rendering always stacks layers top-down; the direction is kept so
/// callers can show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    #[default]
    TopDown,
    BottomUp,
    LeftRight,
    RightLeft,
}

impl FlowDirection {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "TD" | "TB" => Some(Self::TopDown),
            "BT" => Some(Self::BottomUp),
            "LR" => Some(Self::LeftRight),
            "RL" => Some(Self::RightLeft),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeShape {
    #[default]
    Rect,
    Round,
    Diamond,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    mermaid_id: String,
    label: String,
    shape: NodeShape,
    explicit_label: bool,
}

impl FlowNode {
    /// A node only referenced by id so far; its label defaults to the id.
    pub fn implicit(mermaid_id: impl Into<String>) -> Self {
        let mermaid_id = mermaid_id.into();
        Self {
            label: mermaid_id.clone(),
            mermaid_id,
            shape: NodeShape::Rect,
            explicit_label: false,
        }
    }

    pub fn new(mermaid_id: impl Into<String>, label: impl Into<String>, shape: NodeShape) -> Self {
        Self { mermaid_id: mermaid_id.into(), label: label.into(), shape, explicit_label: true }
    }

    pub fn mermaid_id(&self) -> &str {
        &self.mermaid_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    pub fn has_explicit_label(&self) -> bool {
        self.explicit_label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    from_node_id: ObjectId,
    to_node_id: ObjectId,
    label: Option<String>,
    dotted: bool,
}

impl FlowEdge {
    pub fn new(from_node_id: ObjectId, to_node_id: ObjectId) -> Self {
        Self { from_node_id, to_node_id, label: None, dotted: false }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_dotted(mut self, dotted: bool) -> Self {
        self.dotted = dotted;
        self
    }

    pub fn from_node_id(&self) -> &ObjectId {
        &self.from_node_id
    }

    pub fn to_node_id(&self) -> &ObjectId {
        &self.to_node_id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_dotted(&self) -> bool {
        self.dotted
    }
}
