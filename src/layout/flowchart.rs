// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

use crate::model::flow_ast::FlowchartAst;
use crate::model::ids::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowchartLayout {
    layers: Vec<Vec<ObjectId>>,
    node_placements: BTreeMap<ObjectId, FlowNodePlacement>,
    back_edges: BTreeSet<ObjectId>,
}

impl FlowchartLayout {
    pub fn layers(&self) -> &[Vec<ObjectId>] {
        &self.layers
    }

    pub fn placement(&self, node_id: &ObjectId) -> Option<&FlowNodePlacement> {
        self.node_placements.get(node_id)
    }

    /// Edges that point against the layer order (cycles, self-loops). They do not affect layering.
    pub fn back_edges(&self) -> &BTreeSet<ObjectId> {
        &self.back_edges
    }

    pub fn is_back_edge(&self, edge_id: &ObjectId) -> bool {
        self.back_edges.contains(edge_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowNodePlacement {
    layer: usize,
    index_in_layer: usize,
}

impl FlowNodePlacement {
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn index_in_layer(&self) -> usize {
        self.index_in_layer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEdgeEndpoint {
    From,
    To,
}

impl fmt::Display for FlowEdgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::From => "from",
            Self::To => "to",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowchartLayoutError {
    #[error("edge {edge_id} references unknown {endpoint} node {node_id}")]
    UnknownNode { edge_id: ObjectId, endpoint: FlowEdgeEndpoint, node_id: ObjectId },
}

#[derive(Debug, Default)]
struct Adjacency {
    outgoing: BTreeMap<ObjectId, Vec<(ObjectId, ObjectId)>>,
    predecessors: BTreeMap<ObjectId, Vec<ObjectId>>,
    /// Position of each node's first mention, walking edges in id (declaration) order.
    first_seen: BTreeMap<ObjectId, usize>,
}

impl Adjacency {
    fn first_seen(&self, node_id: &ObjectId) -> usize {
        self.first_seen.get(node_id).copied().unwrap_or(usize::MAX)
    }
}

fn adjacency(ast: &FlowchartAst) -> Result<Adjacency, FlowchartLayoutError> {
    let mut adj = Adjacency::default();
    for node_id in ast.nodes().keys() {
        adj.outgoing.insert(node_id.clone(), Vec::new());
        adj.predecessors.insert(node_id.clone(), Vec::new());
    }

    for (edge_id, edge) in ast.edges() {
        let from = edge.from_node_id();
        let to = edge.to_node_id();
        let Some(outgoing) = adj.outgoing.get_mut(from) else {
            return Err(FlowchartLayoutError::UnknownNode {
                edge_id: edge_id.clone(),
                endpoint: FlowEdgeEndpoint::From,
                node_id: from.clone(),
            });
        };
        outgoing.push((edge_id.clone(), to.clone()));
        let Some(preds) = adj.predecessors.get_mut(to) else {
            return Err(FlowchartLayoutError::UnknownNode {
                edge_id: edge_id.clone(),
                endpoint: FlowEdgeEndpoint::To,
                node_id: to.clone(),
            });
        };
        preds.push(from.clone());

        for endpoint in [from, to] {
            let next = adj.first_seen.len();
            adj.first_seen.entry(endpoint.clone()).or_insert(next);
        }
    }

    for tos in adj.outgoing.values_mut() {
        tos.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    }
    for preds in adj.predecessors.values_mut() {
        preds.sort();
    }
    Ok(adj)
}

/// Deterministic topological order that tolerates cycles.
///
/// When no node is ready, the remaining node with the fewest unresolved incoming edges is
/// forced next, ties going to the node mentioned first in the source. Every edge pointing at
/// an already ordered node becomes a back edge.
fn order_nodes(adj: &Adjacency) -> (Vec<ObjectId>, BTreeSet<ObjectId>) {
    let mut indegree = BTreeMap::<ObjectId, usize>::new();
    let mut back_edges = BTreeSet::<ObjectId>::new();
    for node_id in adj.outgoing.keys() {
        indegree.insert(node_id.clone(), 0);
    }
    for (from, tos) in &adj.outgoing {
        for (edge_id, to) in tos {
            if from == to {
                back_edges.insert(edge_id.clone());
            } else if let Some(degree) = indegree.get_mut(to) {
                *degree += 1;
            }
        }
    }

    let mut remaining: BTreeSet<ObjectId> = indegree.keys().cloned().collect();
    let mut ready: BTreeSet<ObjectId> =
        indegree.iter().filter(|(_, degree)| **degree == 0).map(|(id, _)| id.clone()).collect();
    let mut topo = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let next = match ready.pop_first() {
            Some(next) => next,
            None => {
                let forced = remaining
                    .iter()
                    .min_by_key(|id| {
                        let unresolved = indegree.get(*id).copied().unwrap_or(0);
                        (unresolved, adj.first_seen(id), (*id).clone())
                    })
                    .cloned();
                let Some(forced) = forced else {
                    break;
                };
                forced
            }
        };
        if !remaining.remove(&next) {
            continue;
        }
        topo.push(next.clone());

        for (edge_id, to) in adj.outgoing.get(&next).map(Vec::as_slice).unwrap_or(&[]) {
            if to == &next {
                continue;
            }
            if !remaining.contains(to) {
                back_edges.insert(edge_id.clone());
                continue;
            }
            if let Some(degree) = indegree.get_mut(to) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    ready.insert(to.clone());
                }
            }
        }
    }

    (topo, back_edges)
}

/// Longest-path layering over forward edges.
fn assign_layers(
    topo: &[ObjectId],
    adj: &Adjacency,
    back_edges: &BTreeSet<ObjectId>,
) -> BTreeMap<ObjectId, usize> {
    let mut layers: BTreeMap<ObjectId, usize> = topo.iter().map(|id| (id.clone(), 0)).collect();

    for from in topo {
        let from_layer = layers.get(from).copied().unwrap_or(0);
        for (edge_id, to) in adj.outgoing.get(from).map(Vec::as_slice).unwrap_or(&[]) {
            if back_edges.contains(edge_id) {
                continue;
            }
            let to_layer = layers.get(to).copied().unwrap_or(0);
            layers.insert(to.clone(), to_layer.max(from_layer + 1));
        }
    }

    layers
}

fn barycenter(
    node: &ObjectId,
    prev_positions: &BTreeMap<ObjectId, usize>,
    adj: &Adjacency,
) -> Option<(usize, usize)> {
    let preds = adj.predecessors.get(node)?;
    let (sum, count) = preds
        .iter()
        .filter_map(|p| prev_positions.get(p).copied())
        .fold((0usize, 0usize), |(sum, count), pos| (sum + pos, count + 1));
    (count > 0).then_some((sum, count))
}

fn sort_layer_by_barycenter(
    layer_nodes: &mut [ObjectId],
    prev_positions: &BTreeMap<ObjectId, usize>,
    adj: &Adjacency,
) {
    layer_nodes.sort_by(|a, b| {
        match (barycenter(a, prev_positions, adj), barycenter(b, prev_positions, adj)) {
            (None, None) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some((sum_a, count_a)), Some((sum_b, count_b))) => {
                // sum_a/count_a vs sum_b/count_b without floats.
                let left = (sum_a as u128) * (count_b as u128);
                let right = (sum_b as u128) * (count_a as u128);
                left.cmp(&right).then_with(|| a.cmp(b))
            }
        }
    });
}

/// Deterministic layered layout for flowcharts.
///
/// - Cycles are broken by demoting edges to back edges instead of failing.
/// - Node layers come from longest-path layering over the remaining forward edges.
/// - Nodes within each layer are ordered by one downward barycenter sweep.
pub fn layout_flowchart(ast: &FlowchartAst) -> Result<FlowchartLayout, FlowchartLayoutError> {
    let adj = adjacency(ast)?;
    let (topo, back_edges) = order_nodes(&adj);
    let node_layers = assign_layers(&topo, &adj, &back_edges);

    let layer_count = node_layers.values().copied().max().map_or(0, |max| max + 1);
    let mut layers = vec![Vec::<ObjectId>::new(); layer_count];
    for (node_id, layer) in &node_layers {
        layers[*layer].push(node_id.clone());
    }

    for layer_idx in 1..layers.len() {
        let prev_positions = layers[layer_idx - 1]
            .iter()
            .enumerate()
            .map(|(idx, node_id)| (node_id.clone(), idx))
            .collect::<BTreeMap<_, _>>();
        sort_layer_by_barycenter(&mut layers[layer_idx], &prev_positions, &adj);
    }

    let mut node_placements = BTreeMap::new();
    for (layer, nodes) in layers.iter().enumerate() {
        for (index_in_layer, node_id) in nodes.iter().enumerate() {
            node_placements.insert(node_id.clone(), FlowNodePlacement { layer, index_in_layer });
        }
    }

    Ok(FlowchartLayout { layers, node_placements, back_edges })
}
