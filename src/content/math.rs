// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Locating TeX-style math so block splitting and styling never cut through it.
//!
//! Nothing here rewrites math; callers only get byte ranges back.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    /// Byte range including the `$` delimiters.
    pub range: Range<usize>,
    pub display: bool,
}

/// Find `$...$` and `$$...$$` spans in `text`. `\$` is never a delimiter and an opening
/// delimiter without a partner is plain text.
pub fn math_spans(text: &str) -> Vec<MathSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut idx = 0usize;

    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b'$' if bytes.get(idx + 1) == Some(&b'$') => {
                match find_unescaped(bytes, idx + 2, b"$$") {
                    Some(close) => {
                        spans.push(MathSpan { range: idx..close + 2, display: true });
                        idx = close + 2;
                    }
                    None => idx += 2,
                }
            }
            b'$' => match find_unescaped(bytes, idx + 1, b"$") {
                Some(close) if close > idx + 1 => {
                    spans.push(MathSpan { range: idx..close + 1, display: false });
                    idx = close + 1;
                }
                _ => idx += 1,
            },
            _ => idx += 1,
        }
    }

    spans
}

/// Number of unescaped `$$` delimiters in `line`. An odd count opens (or closes) a display
/// block that continues on following lines.
pub fn display_delimiter_count(line: &str) -> usize {
    let bytes = line.as_bytes();
    let mut count = 0usize;
    let mut idx = 0usize;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b'$' if bytes.get(idx + 1) == Some(&b'$') => {
                count += 1;
                idx += 2;
            }
            _ => idx += 1,
        }
    }
    count
}

/// True when byte offset `pos` is inside one of `spans` (delimiters included).
pub fn in_math(spans: &[MathSpan], pos: usize) -> bool {
    spans.iter().any(|span| span.range.contains(&pos))
}

fn find_unescaped(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    let mut idx = from;
    while idx + needle.len() <= bytes.len() {
        if bytes[idx] == b'\\' {
            idx += 2;
            continue;
        }
        if &bytes[idx..idx + needle.len()] == needle {
            return Some(idx);
        }
        idx += 1;
    }
    None
}
