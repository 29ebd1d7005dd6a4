// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use thiserror::Error;

pub const UNICODE_BOX_HORIZONTAL: char = '─';
pub const UNICODE_BOX_VERTICAL: char = '│';
pub const UNICODE_BOX_TOP_LEFT: char = '┌';
pub const UNICODE_BOX_TOP_RIGHT: char = '┐';
pub const UNICODE_BOX_BOTTOM_LEFT: char = '└';
pub const UNICODE_BOX_BOTTOM_RIGHT: char = '┘';
pub const UNICODE_BOX_TEE_RIGHT: char = '├';
pub const UNICODE_BOX_TEE_LEFT: char = '┤';
pub const UNICODE_BOX_TEE_DOWN: char = '┬';
pub const UNICODE_BOX_TEE_UP: char = '┴';
pub const UNICODE_BOX_CROSS: char = '┼';

/// Which sides of a cell a box-drawing stroke touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Strokes(u8);

impl Strokes {
    const NONE: Self = Self(0);
    const LEFT: Self = Self(1);
    const RIGHT: Self = Self(2);
    const UP: Self = Self(4);
    const DOWN: Self = Self(8);

    fn has(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn of(ch: char) -> Option<Self> {
        let (l, r, u, d) = (Self::LEFT, Self::RIGHT, Self::UP, Self::DOWN);
        Some(match ch {
            UNICODE_BOX_HORIZONTAL => l.with(r),
            UNICODE_BOX_VERTICAL => u.with(d),
            UNICODE_BOX_TOP_LEFT => r.with(d),
            UNICODE_BOX_TOP_RIGHT => l.with(d),
            UNICODE_BOX_BOTTOM_LEFT => r.with(u),
            UNICODE_BOX_BOTTOM_RIGHT => l.with(u),
            UNICODE_BOX_TEE_RIGHT => u.with(d).with(r),
            UNICODE_BOX_TEE_LEFT => u.with(d).with(l),
            UNICODE_BOX_TEE_DOWN => l.with(r).with(d),
            UNICODE_BOX_TEE_UP => l.with(r).with(u),
            UNICODE_BOX_CROSS => l.with(r).with(u).with(d),
            _ => return None,
        })
    }

    fn glyph(self) -> char {
        match self.0 {
            0 => ' ',
            1..=3 => UNICODE_BOX_HORIZONTAL,
            4 | 8 | 12 => UNICODE_BOX_VERTICAL,
            10 => UNICODE_BOX_TOP_LEFT,
            9 => UNICODE_BOX_TOP_RIGHT,
            6 => UNICODE_BOX_BOTTOM_LEFT,
            5 => UNICODE_BOX_BOTTOM_RIGHT,
            14 => UNICODE_BOX_TEE_RIGHT,
            13 => UNICODE_BOX_TEE_LEFT,
            11 => UNICODE_BOX_TEE_DOWN,
            7 => UNICODE_BOX_TEE_UP,
            _ => UNICODE_BOX_CROSS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

/// Fixed-size character grid used to draw diagrams.
///
/// Plain characters overwrite whatever is in a cell. Box-drawing characters accumulate
/// strokes instead, so a line crossing a box edge renders as the matching junction
/// (`┬`, `┴`, `┼`, ...) once neighbouring strokes agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    strokes: Vec<Strokes>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self { width, height, cells: vec![' '; len], strokes: vec![Strokes::NONE; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.glyph_at(x, y, idx))
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        match Strokes::of(ch) {
            Some(strokes) => self.strokes[idx] = self.strokes[idx].with(strokes),
            None => {
                self.cells[idx] = ch;
                self.strokes[idx] = Strokes::NONE;
            }
        }
        Ok(())
    }

    /// Write `text` starting at `(x, y)`, clipped at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        self.index_of(0, y)?;
        for (offset, ch) in text.chars().enumerate() {
            if x + offset >= self.width {
                break;
            }
            self.set(x + offset, y, ch)?;
        }
        Ok(())
    }

    pub fn draw_hline(&mut self, x0: usize, x1: usize, y: usize) -> Result<(), CanvasError> {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        self.index_of(max_x, y)?;
        for x in min_x..=max_x {
            self.set(x, y, UNICODE_BOX_HORIZONTAL)?;
        }
        Ok(())
    }

    pub fn draw_vline(&mut self, x: usize, y0: usize, y1: usize) -> Result<(), CanvasError> {
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));
        self.index_of(x, max_y)?;
        for y in min_y..=max_y {
            self.set(x, y, UNICODE_BOX_VERTICAL)?;
        }
        Ok(())
    }

    /// Single-line box with corners at `(x0, y0)` and `(x1, y1)`; nothing is drawn when any
    /// part would fall outside the canvas.
    pub fn draw_box(
        &mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> Result<(), CanvasError> {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));
        self.index_of(max_x, max_y)?;

        self.draw_hline(min_x, max_x, min_y)?;
        self.draw_hline(min_x, max_x, max_y)?;
        self.draw_vline(min_x, min_y, max_y)?;
        self.draw_vline(max_x, min_y, max_y)
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(y * self.width + x)
    }

    /// Keep only the strokes a neighbour connects to; a lone stroke keeps its own shape.
    fn glyph_at(&self, x: usize, y: usize, idx: usize) -> char {
        let strokes = self.strokes[idx];
        if strokes == Strokes::NONE {
            return self.cells[idx];
        }

        let mut connected = Strokes::NONE;
        if strokes.has(Strokes::LEFT) && x > 0 && self.strokes[idx - 1].has(Strokes::RIGHT) {
            connected = connected.with(Strokes::LEFT);
        }
        if strokes.has(Strokes::RIGHT)
            && x + 1 < self.width
            && self.strokes[idx + 1].has(Strokes::LEFT)
        {
            connected = connected.with(Strokes::RIGHT);
        }
        if strokes.has(Strokes::UP) && y > 0 && self.strokes[idx - self.width].has(Strokes::DOWN) {
            connected = connected.with(Strokes::UP);
        }
        if strokes.has(Strokes::DOWN)
            && y + 1 < self.height
            && self.strokes[idx + self.width].has(Strokes::UP)
        {
            connected = connected.with(Strokes::DOWN);
        }

        if connected == Strokes::NONE {
            strokes.glyph()
        } else {
            connected.glyph()
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            if y > 0 {
                f.write_char('\n')?;
            }
            for x in 0..self.width {
                f.write_char(self.glyph_at(x, y, y * self.width + x))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasError};

    #[test]
    fn set_out_of_bounds_is_an_error() {
        let mut canvas = Canvas::new(2, 2).expect("canvas");
        assert_eq!(
            canvas.set(2, 0, 'X'),
            Err(CanvasError::OutOfBounds { x: 2, y: 0, width: 2, height: 2 })
        );
    }

    #[test]
    fn area_overflow_is_rejected() {
        assert_eq!(
            Canvas::new(usize::MAX, 2),
            Err(CanvasError::AreaOverflow { width: usize::MAX, height: 2 })
        );
    }

    #[test]
    fn write_str_clips() {
        let mut canvas = Canvas::new(4, 1).expect("canvas");
        canvas.write_str(2, 0, "abcdef").expect("write");
        assert_eq!(canvas.to_string(), "  ab");
    }

    #[test]
    fn box_with_stem_merges_into_tee() {
        let mut canvas = Canvas::new(5, 5).expect("canvas");
        canvas.draw_box(0, 0, 4, 2).expect("box");
        canvas.draw_vline(2, 2, 4).expect("stem");
        assert_eq!(canvas.to_string(), "┌───┐\n│   │\n└─┬─┘\n  │  \n  │  ");
    }

    #[test]
    fn crossing_lines_form_a_cross() {
        let mut canvas = Canvas::new(3, 3).expect("canvas");
        canvas.draw_hline(0, 2, 1).expect("h");
        canvas.draw_vline(1, 0, 2).expect("v");
        assert_eq!(canvas.to_string(), " │ \n─┼─\n │ ");
    }

    #[test]
    fn plain_characters_break_strokes() {
        let mut canvas = Canvas::new(5, 3).expect("canvas");
        canvas.draw_box(0, 0, 4, 2).expect("box");
        canvas.set(2, 0, '▼').expect("arrow");
        assert_eq!(canvas.to_string(), "┌─▼─┐\n│   │\n└───┘");
    }

    #[test]
    fn oversized_box_draws_nothing() {
        let mut canvas = Canvas::new(3, 3).expect("canvas");
        assert!(canvas.draw_box(0, 0, 3, 2).is_err());
        assert_eq!(canvas.to_string(), "   \n   \n   ");
    }
}
