// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

use crate::config::RenderConfig;
use crate::content::math::{in_math, math_spans};
use crate::diagram::{render_diagram, DiagramState};
use crate::model::{Block, ContentDocument};

use super::text::{text_len, wrap_words};
use super::theme::DocumentTheme;

const BULLET: &str = "• ";
const QUOTE_BAR: &str = "▌ ";
const CODE_INDENT: &str = "    ";
const DIAGRAM_INDENT: &str = "  ";
const ERROR_MARK: &str = "⚠ ";

/// Turns a [`ContentDocument`] into styled terminal lines. Diagram blocks go through
/// [`render_diagram`] every time they are drawn.
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    theme: DocumentTheme,
    config: RenderConfig,
}

impl DocumentRenderer {
    pub fn new(theme: DocumentTheme, config: RenderConfig) -> Self {
        Self { theme, config }
    }

    pub fn theme(&self) -> &DocumentTheme {
        &self.theme
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render_text(&self, document: &ContentDocument) -> Text<'static> {
        let mut lines = Vec::new();
        for (idx, block) in document.blocks().iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            self.push_block(block, &mut lines);
        }
        Text::from(lines)
    }

    pub fn render_plain(&self, document: &ContentDocument) -> String {
        plain_text(&self.render_text(document))
    }

    fn width(&self) -> usize {
        usize::from(self.config.width)
    }

    fn push_block(&self, block: &Block, out: &mut Vec<Line<'static>>) {
        match block {
            Block::Heading { level, text } => {
                let style = self.theme.heading_style(*level);
                out.push(Line::from(Span::styled(text.clone(), style)));
                let rule = match level {
                    1 => Some('═'),
                    2 => Some('─'),
                    _ => None,
                };
                if let Some(rule) = rule {
                    let rule: String =
                        std::iter::repeat(rule).take(text_len(text).max(1)).collect();
                    out.push(Line::from(Span::styled(rule, style)));
                }
            }
            Block::Paragraph { text } => {
                for line in text.split('\n') {
                    for wrapped in wrap_preserving_math(line, self.width()) {
                        out.push(self.prose_line(Vec::new(), &wrapped, self.theme.text_style()));
                    }
                }
            }
            Block::List { ordered, items } => {
                for (idx, item) in items.iter().enumerate() {
                    let marker =
                        if *ordered { format!("{}. ", idx + 1) } else { BULLET.to_owned() };
                    let hang = " ".repeat(text_len(&marker));
                    let width = self.width().saturating_sub(text_len(&marker));
                    let mut first = true;
                    for line in item.split('\n') {
                        for wrapped in wrap_preserving_math(line, width) {
                            let lead = if first {
                                Span::styled(marker.clone(), self.theme.marker_style())
                            } else {
                                Span::raw(hang.clone())
                            };
                            first = false;
                            let style = self.theme.text_style();
                            out.push(self.prose_line(vec![lead], &wrapped, style));
                        }
                    }
                }
            }
            Block::Table { headers, rows } => self.push_table(headers, rows, out),
            Block::Code { language, text } => {
                if !language.is_empty() {
                    out.push(Line::from(Span::styled(
                        format!("[{language}]"),
                        self.theme.muted_style(),
                    )));
                }
                for line in text.split('\n') {
                    out.push(Line::from(Span::styled(
                        format!("{CODE_INDENT}{line}"),
                        self.theme.code_style(),
                    )));
                }
            }
            Block::Diagram { description } => self.push_diagram(description, out),
            Block::Quote { text } => {
                let width = self.width().saturating_sub(text_len(QUOTE_BAR));
                for line in text.split('\n') {
                    for wrapped in wrap_preserving_math(line, width) {
                        let bar = Span::styled(QUOTE_BAR, self.theme.muted_style());
                        out.push(self.prose_line(vec![bar], &wrapped, self.theme.quote_style()));
                    }
                }
            }
        }
    }

    /// `lead` spans followed by `text`, with math segments in the math style.
    fn prose_line(&self, mut spans: Vec<Span<'static>>, text: &str, style: Style) -> Line<'static> {
        let mut cursor = 0usize;
        for math in math_spans(text) {
            if math.range.start > cursor {
                spans.push(Span::styled(text[cursor..math.range.start].to_owned(), style));
            }
            spans.push(Span::styled(text[math.range.clone()].to_owned(), self.theme.math_style()));
            cursor = math.range.end;
        }
        if cursor < text.len() || spans.is_empty() {
            spans.push(Span::styled(text[cursor..].to_owned(), style));
        }
        Line::from(spans)
    }

    fn push_table(&self, headers: &[String], rows: &[Vec<String>], out: &mut Vec<Line<'static>>) {
        let mut widths: Vec<usize> = headers.iter().map(|h| text_len(h)).collect();
        for row in rows {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(idx) {
                    *width = (*width).max(text_len(cell));
                }
            }
        }

        let render_row = |cells: &[String], style: Style| -> Line<'static> {
            let mut spans = Vec::with_capacity(cells.len() * 2);
            for (idx, width) in widths.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::styled(" │ ", self.theme.muted_style()));
                }
                let cell = cells.get(idx).map(String::as_str).unwrap_or("");
                let pad = width.saturating_sub(text_len(cell));
                spans.push(Span::styled(format!("{cell}{}", " ".repeat(pad)), style));
            }
            Line::from(spans)
        };

        out.push(render_row(headers, self.theme.table_header_style()));
        let rule = widths.iter().map(|w| "─".repeat(*w)).collect::<Vec<_>>().join("─┼─");
        out.push(Line::from(Span::styled(rule, self.theme.muted_style())));
        for row in rows {
            out.push(render_row(row, self.theme.text_style()));
        }
    }

    fn push_diagram(&self, description: &str, out: &mut Vec<Line<'static>>) {
        match render_diagram(description) {
            DiagramState::Rendered(visual) => {
                for line in visual.lines() {
                    out.push(Line::from(Span::styled(
                        format!("{DIAGRAM_INDENT}{line}"),
                        self.theme.diagram_style(),
                    )));
                }
            }
            DiagramState::Errored(message) => {
                out.push(Line::from(Span::styled(
                    format!("{ERROR_MARK}{message}"),
                    self.theme.error_style(),
                )));
                if self.config.show_diagram_source_on_error {
                    for line in description.lines() {
                        out.push(Line::from(Span::styled(
                            format!("{CODE_INDENT}{line}"),
                            self.theme.muted_style(),
                        )));
                    }
                }
            }
            DiagramState::Loading => {}
        }
    }
}

/// Word wrap that treats every `$...$`/`$$...$$` span as a single unbreakable word.
fn wrap_preserving_math(line: &str, width: usize) -> Vec<String> {
    let spans = math_spans(line);
    if spans.is_empty() {
        return wrap_words(line, width);
    }

    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    for (pos, ch) in line.char_indices() {
        let separator = ch.is_whitespace() && !in_math(&spans, pos);
        match (separator, start) {
            (true, Some(s)) => {
                words.push(&line[s..pos]);
                start = None;
            }
            (false, None) => start = Some(pos),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push(&line[s..]);
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in words {
        if !current.is_empty() && width > 0 && text_len(&current) + 1 + text_len(word) > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);
    lines
}

/// Concatenated span contents, one line per [`Line`].
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{plain_text, wrap_preserving_math, DocumentRenderer};
    use crate::config::RenderConfig;
    use crate::content::render;
    use crate::render::theme::DocumentTheme;

    fn renderer(width: u16) -> DocumentRenderer {
        DocumentRenderer::new(
            DocumentTheme::default(),
            RenderConfig { width, ..RenderConfig::default() },
        )
    }

    #[test]
    fn headings_lists_and_code_render_as_plain_lines() {
        let doc = render("# Zeta\n\n- one\n- two\n\n```python\nprint(1)\n```");
        let out = renderer(80).render_plain(&doc);
        assert_eq!(out, "Zeta\n════\n\n• one\n• two\n\n[python]\n    print(1)");
    }

    #[test]
    fn math_is_never_split_by_wrapping() {
        let wrapped = wrap_preserving_math(r"where $\zeta(s) = \sum n^{-s}$ holds", 12);
        assert_eq!(wrapped, ["where", r"$\zeta(s) = \sum n^{-s}$", "holds"]);
    }

    #[test]
    fn math_spans_get_their_own_span() {
        let doc = render("Let $x^2$ be.");
        let text = renderer(80).render_text(&doc);
        let contents: Vec<_> = text.lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, ["Let ", "$x^2$", " be."]);
    }

    #[test]
    fn tables_align_columns() {
        let doc = render("| Year | Contributor |\n|---|---|\n| 1859 | Riemann |");
        let out = renderer(80).render_plain(&doc);
        assert_eq!(out, "Year │ Contributor\n─────┼────────────\n1859 │ Riemann    ");
    }

    #[test]
    fn diagrams_render_inline() {
        let doc = render("```mermaid\ngraph TD\nA[Start] --> B[End]\n```");
        let out = renderer(80).render_plain(&doc);
        assert!(out.starts_with("  ┌───────┐\n  │ Start │"), "{out}");
    }

    #[test]
    fn broken_diagram_shows_inline_error_and_optional_source() {
        let doc = render("```mermaid\nsequenceDiagram\nA->>B: hi\n```");
        let out = renderer(80).render_plain(&doc);
        assert_eq!(out, "⚠ Failed to render diagram: unsupported diagram type: sequenceDiagram");

        let verbose = DocumentRenderer::new(
            DocumentTheme::default(),
            RenderConfig { show_diagram_source_on_error: true, ..RenderConfig::default() },
        );
        assert!(verbose.render_plain(&doc).ends_with("\n    sequenceDiagram\n    A->>B: hi"));
    }

    #[test]
    fn quotes_and_ordered_lists_wrap_with_prefixes() {
        let doc = render("> a b c d\n\n1. alpha beta gamma");
        let out = renderer(8).render_plain(&doc);
        assert_eq!(out, "▌ a b c\n▌ d\n\n1. alpha\n   beta\n   gamma");
    }

    #[test]
    fn plain_text_of_empty_document_is_empty() {
        let text = renderer(80).render_text(&render(""));
        assert_eq!(plain_text(&text), "");
    }
}
