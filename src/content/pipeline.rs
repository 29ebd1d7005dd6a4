// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::math::{display_delimiter_count, in_math, math_spans};
use crate::model::{Block, ContentDocument, DIAGRAM_LANGUAGE};

/// Parse a markdown-with-math content string into blocks.
///
/// Never fails: malformed input (including an unterminated code fence) degrades to
/// paragraph text. `mermaid` fences become [`Block::Diagram`], every other fence becomes
/// [`Block::Code`] with its body verbatim minus one trailing newline.
pub fn render(content: &str) -> ContentDocument {
    let mut blocks = Vec::new();

    for segment in split_fenced(content) {
        match segment {
            Segment::Text(text) => scan_blocks(text, &mut blocks),
            Segment::Fence { language, body } => blocks.push(fence_block(language, body)),
            Segment::Unterminated(text) => {
                let text = text.trim_end();
                if !text.is_empty() {
                    blocks.push(Block::Paragraph { text: text.to_owned() });
                }
            }
        }
    }

    debug!(blocks = blocks.len(), "content rendered");
    ContentDocument::new(blocks)
}

fn fence_block(language: &str, body: &str) -> Block {
    if language == DIAGRAM_LANGUAGE {
        Block::Diagram { description: body.to_owned() }
    } else {
        Block::Code { language: language.to_owned(), text: body.to_owned() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Fence { language: &'a str, body: &'a str },
    Unterminated(&'a str),
}

#[derive(Debug, Clone, Copy)]
struct OpenFence<'a> {
    marker: u8,
    len: usize,
    language: &'a str,
    start: usize,
    body_start: usize,
}

fn split_fenced(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut open: Option<OpenFence<'_>> = None;
    let mut text_start = 0usize;
    let mut offset = 0usize;

    for line in input.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let trimmed = line.trim_start();

        match open {
            None => {
                if let Some((marker, len, language)) = fence_opening(trimmed) {
                    if text_start < line_start {
                        segments.push(Segment::Text(&input[text_start..line_start]));
                    }
                    open = Some(OpenFence {
                        marker,
                        len,
                        language,
                        start: line_start,
                        body_start: offset,
                    });
                }
            }
            Some(fence) => {
                if is_fence_close(trimmed, fence.marker, fence.len) {
                    let body = strip_trailing_newline(&input[fence.body_start..line_start]);
                    segments.push(Segment::Fence { language: fence.language, body });
                    open = None;
                    text_start = offset;
                }
            }
        }
    }

    match open {
        Some(fence) => segments.push(Segment::Unterminated(&input[fence.start..])),
        None if text_start < input.len() => segments.push(Segment::Text(&input[text_start..])),
        None => {}
    }

    segments
}

/// `(marker, run length, language)` when `trimmed` opens a fence.
fn fence_opening(trimmed: &str) -> Option<(u8, usize, &str)> {
    let marker = *trimmed.as_bytes().first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }
    let len = trimmed.bytes().take_while(|b| *b == marker).count();
    if len < 3 {
        return None;
    }
    let info = trimmed[len..].trim();
    if marker == b'`' && info.contains('`') {
        return None;
    }
    let language = info.split_whitespace().next().unwrap_or("");
    Some((marker, len, language))
}

fn is_fence_close(trimmed: &str, marker: u8, open_len: usize) -> bool {
    let len = trimmed.bytes().take_while(|b| *b == marker).count();
    len >= open_len && trimmed[len..].trim().is_empty()
}

fn strip_trailing_newline(body: &str) -> &str {
    match body.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => body,
    }
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$").expect("heading regex")
    })
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*+][ \t]+(.*)$").expect("bullet regex"))
}

fn ordinal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,9}[.)][ \t]+(.*)$").expect("ordinal regex"))
}

fn rule_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^ {0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$")
            .expect("rule regex")
    })
}

fn table_separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)*\|?$")
            .expect("table separator regex")
    })
}

#[derive(Debug)]
struct ListBuilder {
    ordered: bool,
    items: Vec<String>,
}

#[derive(Debug, Default)]
struct BlockScanner {
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    list: Option<ListBuilder>,
    in_display_math: bool,
}

impl BlockScanner {
    fn flush(&mut self) {
        if !self.paragraph.is_empty() {
            let text = self.paragraph.join("\n");
            self.paragraph.clear();
            self.blocks.push(Block::Paragraph { text });
        }
        if let Some(list) = self.list.take() {
            self.blocks.push(Block::List { ordered: list.ordered, items: list.items });
        }
        self.in_display_math = false;
    }
}

fn list_item(line: &str) -> Option<(bool, &str)> {
    let trimmed = line.trim_start();
    if let Some(caps) = bullet_re().captures(trimmed) {
        return caps.get(1).map(|m| (false, m.as_str().trim_end()));
    }
    ordinal_re()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| (true, m.as_str().trim_end()))
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn scan_blocks(text: &str, out: &mut Vec<Block>) {
    let lines: Vec<&str> = text.lines().collect();
    let mut scanner = BlockScanner::default();
    let mut idx = 0usize;

    while idx < lines.len() {
        let line = lines[idx];

        if scanner.in_display_math {
            scanner.paragraph.push(line.trim_end().to_owned());
            if display_delimiter_count(line) % 2 == 1 {
                scanner.in_display_math = false;
            }
            idx += 1;
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            let keep_list = scanner.list.as_ref().is_some_and(|list| {
                next_non_blank(&lines, idx + 1)
                    .and_then(|next| list_item(next).filter(|_| indent_of(next) < 2))
                    .is_some_and(|(ordered, _)| ordered == list.ordered)
            });
            if keep_list {
                // Loose list: the blank line separates items of the same list.
                if !scanner.paragraph.is_empty() {
                    let text = scanner.paragraph.join("\n");
                    scanner.paragraph.clear();
                    scanner.blocks.push(Block::Paragraph { text });
                }
            } else {
                scanner.flush();
            }
            idx += 1;
            continue;
        }

        if rule_re().is_match(line) {
            scanner.flush();
            idx += 1;
            continue;
        }

        if let Some(caps) = heading_re().captures(line) {
            scanner.flush();
            let level = caps.get(1).map_or(1, |m| m.as_str().len()) as u8;
            let text = caps.get(2).map_or("", |m| m.as_str()).trim().to_owned();
            scanner.blocks.push(Block::Heading { level, text });
            idx += 1;
            continue;
        }

        if trimmed.starts_with('>') {
            scanner.flush();
            let mut quoted = Vec::new();
            while let Some(next) = lines.get(idx) {
                let Some(rest) = next.trim_start().strip_prefix('>') else {
                    break;
                };
                quoted.push(rest.strip_prefix(' ').unwrap_or(rest).trim_end());
                idx += 1;
            }
            scanner.blocks.push(Block::Quote { text: quoted.join("\n") });
            continue;
        }

        if let Some((headers, consumed)) = table_header(&lines, idx) {
            scanner.flush();
            idx += consumed;
            let mut rows = Vec::new();
            while let Some(next) = lines.get(idx) {
                if next.trim().is_empty() || !next.contains('|') {
                    break;
                }
                let mut cells = split_row(next);
                cells.resize(headers.len(), String::new());
                rows.push(cells);
                idx += 1;
            }
            scanner.blocks.push(Block::Table { headers, rows });
            continue;
        }

        if let Some((ordered, item)) = list_item(line) {
            let nested = scanner.list.is_some() && indent_of(line) >= 2;
            if !nested {
                let same_list = scanner.list.as_ref().is_some_and(|list| list.ordered == ordered);
                if !same_list {
                    scanner.flush();
                    scanner.list = Some(ListBuilder { ordered, items: Vec::new() });
                }
                if let Some(list) = scanner.list.as_mut() {
                    list.items.push(item.to_owned());
                }
                idx += 1;
                continue;
            }
        }

        if let Some(last) = scanner.list.as_mut().and_then(|list| list.items.last_mut()) {
            last.push('\n');
            last.push_str(trimmed);
            idx += 1;
            continue;
        }

        scanner.paragraph.push(trimmed.to_owned());
        if display_delimiter_count(line) % 2 == 1 {
            scanner.in_display_math = true;
        }
        idx += 1;
    }

    scanner.flush();
    out.append(&mut scanner.blocks);
}

fn next_non_blank<'a>(lines: &[&'a str], from: usize) -> Option<&'a str> {
    lines.iter().skip(from).copied().find(|line| !line.trim().is_empty())
}

/// Header cells and the number of lines (header plus separator) when a table starts at `idx`.
fn table_header(lines: &[&str], idx: usize) -> Option<(Vec<String>, usize)> {
    let header = lines.get(idx)?;
    let separator = lines.get(idx + 1)?.trim();
    if !header.contains('|')
        || !separator.contains('|')
        || !table_separator_re().is_match(separator)
    {
        return None;
    }
    let headers = split_row(header);
    if headers.len() != split_row(separator).len() {
        return None;
    }
    Some((headers, 2))
}

/// Split a pipe-table row into trimmed cells. Pipes inside math, inside backtick code, or
/// escaped as `\|` stay in the cell.
fn split_row(line: &str) -> Vec<String> {
    let mut inner = line.trim();
    inner = inner.strip_prefix('|').unwrap_or(inner);
    if inner.ends_with('|') && !inner.ends_with("\\|") {
        inner = &inner[..inner.len() - 1];
    }

    let spans = math_spans(inner);
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_code = false;
    let mut chars = inner.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '\\' if chars.peek().is_some_and(|(_, next)| *next == '|') => {
                cell.push('|');
                chars.next();
            }
            '`' => {
                in_code = !in_code;
                cell.push(ch);
            }
            '|' if !in_code && !in_math(&spans, pos) => {
                cells.push(cell.trim().to_owned());
                cell.clear();
            }
            _ => cell.push(ch),
        }
    }
    cells.push(cell.trim().to_owned());
    cells
}
