// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal rendering.
//!
//! [`flowchart`] draws laid-out flowcharts onto a [`Canvas`] as Unicode box art; [`document`]
//! turns a parsed content document into styled ratatui text with diagrams drawn inline.

pub mod canvas;
pub mod document;
pub mod flowchart;
mod text;
pub mod theme;

pub use canvas::{Canvas, CanvasError};
pub use document::{plain_text, DocumentRenderer};
pub use flowchart::{render_flowchart_unicode, FlowchartRenderError};
pub use theme::{DocumentTheme, PALETTE_ENV};
