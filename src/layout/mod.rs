// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout algorithms for diagrams.

pub mod flowchart;

pub use flowchart::{
    layout_flowchart, FlowEdgeEndpoint, FlowNodePlacement, FlowchartLayout, FlowchartLayoutError,
};
