//! Pure placement math for centering rendered text.
//!
//! All functions here are pure and testable without fonts or images.

/// Tight pixel box of drawn glyphs. `max_*` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn union(self, other: TextBounds) -> TextBounds {
        TextBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn translate(self, (dx, dy): (i32, i32)) -> TextBounds {
        TextBounds {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

/// Union of glyph boxes. `None` when nothing is drawn (e.g. only spaces).
pub fn union_bounds(boxes: impl IntoIterator<Item = TextBounds>) -> Option<TextBounds> {
    boxes.into_iter().reduce(TextBounds::union)
}

/// Offset that moves `bounds` to the center of a `canvas` (width, height).
///
/// The leading margin is `floor((canvas - extent) / 2)`, so the two margins
/// on an axis differ by at most one pixel. Text wider than the canvas gets
/// negative margins.
pub fn centered_offset(canvas: (u32, u32), bounds: &TextBounds) -> (i32, i32) {
    let left = (canvas.0 as i32 - bounds.width()).div_euclid(2);
    let top = (canvas.1 as i32 - bounds.height()).div_euclid(2);
    (left - bounds.min_x, top - bounds.min_y)
}

/// Distance from each side of `placed` to the matching canvas edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

pub fn margins(canvas: (u32, u32), placed: &TextBounds) -> Margins {
    Margins {
        left: placed.min_x,
        right: canvas.0 as i32 - placed.max_x,
        top: placed.min_y,
        bottom: canvas.1 as i32 - placed.max_y,
    }
}

/// Convert an em size in pixels to a rasterizer scale.
///
/// The rasterizer scales so that ascent-to-descent spans the given height,
/// while font sizes are conventionally em sizes. `ascent` and `descent` are
/// in font units (descent negative).
pub fn em_to_extent_scale(em_px: f32, units_per_em: f32, ascent: f32, descent: f32) -> f32 {
    let extent = ascent - descent;
    if units_per_em <= 0.0 || extent <= 0.0 {
        return em_px;
    }
    em_px * extent / units_per_em
}
