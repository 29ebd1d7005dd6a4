// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::flow_ast::{FlowEdge, FlowNode, FlowchartAst, NodeShape};
use super::ids::ObjectId;

fn oid(value: &str) -> ObjectId {
    ObjectId::new(value).expect("object id")
}

fn insert_node(ast: &mut FlowchartAst, name: &str) -> ObjectId {
    let id = oid(&format!("n:{name}"));
    ast.nodes_mut().insert(id.clone(), FlowNode::new(name, name, NodeShape::Rect));
    id
}

/// A -> B, A -> C, B -> D, C -> D
pub(crate) fn flowchart_small_dag() -> FlowchartAst {
    let mut ast = FlowchartAst::default();

    let n_a = insert_node(&mut ast, "A");
    let n_b = insert_node(&mut ast, "B");
    let n_c = insert_node(&mut ast, "C");
    let n_d = insert_node(&mut ast, "D");

    ast.edges_mut().insert(oid("e:0001"), FlowEdge::new(n_a.clone(), n_b.clone()));
    ast.edges_mut().insert(oid("e:0002"), FlowEdge::new(n_a, n_c.clone()));
    ast.edges_mut().insert(oid("e:0003"), FlowEdge::new(n_b, n_d.clone()));
    ast.edges_mut().insert(oid("e:0004"), FlowEdge::new(n_c, n_d));

    ast
}

/// A -> B -> A, plus A -> C
pub(crate) fn flowchart_with_cycle() -> FlowchartAst {
    let mut ast = FlowchartAst::default();

    let n_a = insert_node(&mut ast, "A");
    let n_b = insert_node(&mut ast, "B");
    let n_c = insert_node(&mut ast, "C");

    ast.edges_mut().insert(oid("e:0001"), FlowEdge::new(n_a.clone(), n_b.clone()));
    ast.edges_mut().insert(oid("e:0002"), FlowEdge::new(n_b, n_a.clone()));
    ast.edges_mut().insert(oid("e:0003"), FlowEdge::new(n_a, n_c));

    ast
}

pub(crate) const PROBLEM_CONTENT_SAMPLE: &str = r#"# Title

Intro with inline math $a^2 + b^2 = c^2$.

```mermaid
graph TD
  A[Start] --> B[End]
```

```python
print("hi")
```
"#;
