//! An off-screen character buffer and the diff frames sent to a driver.

use pathviz_core::{Point, Range};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// The terminal's default colour.
    pub const DEFAULT: Self = Self(0);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

// ---------------------------------------------------------------------------
// Glyph
// ---------------------------------------------------------------------------

/// One terminal cell: a character with foreground and background colours.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const BLANK: Self = Self {
        ch: ' ',
        fg: Color::DEFAULT,
        bg: Color::DEFAULT,
    };

    /// A blank cell painted with `bg`.
    #[inline]
    pub const fn block(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::DEFAULT,
            bg,
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A `width` × `height` buffer of [`Glyph`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    glyphs: Vec<Glyph>,
    bounds: Range,
}

impl Screen {
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Glyph::BLANK)
    }

    pub fn filled(width: i32, height: i32, glyph: Glyph) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            glyphs: vec![glyph; bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Read the glyph at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Glyph> {
        self.bounds.index(p).map(|i| self.glyphs[i])
    }

    /// Set the glyph at `p`. No-op if `p` is outside bounds.
    #[inline]
    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = self.bounds.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` left to right starting at `p`, clipped to the screen.
    /// Returns the number of columns written.
    pub fn print(&mut self, p: Point, text: &str, fg: Color, bg: Color) -> i32 {
        let mut x = p.x;
        for ch in text.chars() {
            let q = Point::new(x, p.y);
            if !self.bounds.contains(q) {
                break;
            }
            self.set(q, Glyph { ch, fg, bg });
            x += 1;
        }
        x - p.x
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between two screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub pos: Point,
    pub glyph: Glyph,
}

/// The changes a driver has to draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
    /// Clear the whole display before drawing `cells`.
    pub clear: bool,
}

/// Compute the difference between two screens of the same size.
///
/// If the sizes differ, every glyph of `curr` is included and the frame is
/// marked for clearing.
pub fn compute_frame(prev: &Screen, curr: &Screen) -> Frame {
    let clear = prev.bounds() != curr.bounds();
    let cells = curr
        .bounds()
        .iter()
        .zip(curr.glyphs.iter())
        .filter(|&(p, g)| clear || prev.at(p) != Some(*g))
        .map(|(pos, &glyph)| FrameCell { pos, glyph })
        .collect();
    Frame {
        cells,
        width: curr.width(),
        height: curr.height(),
        clear,
    }
}
