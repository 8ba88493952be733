//! Drawing seam between the game logic and the browser canvas.
//!
//! Scenes only ever talk to a [`Surface`]; the wasm runner plugs in
//! [`crate::canvas::CanvasSurface`] and the tests plug in a recorder.

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub const fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }
}

/// A resizable drawable area with one bitmap bound to it.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Changes the pixel dimensions. Resizing wipes the current contents.
    fn resize(&mut self, width: u32, height: u32);
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn stroke_rect(&mut self, rect: Rect, line_width: f64, color: &str);
    /// Blits the `src` region of the bitmap scaled into `dst`.
    fn draw_bitmap(&mut self, src: Rect, dst: Rect);
    /// Natural size of the bound bitmap.
    fn bitmap_size(&self) -> (u32, u32);

    fn clear(&mut self) {
        let full = Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64);
        self.clear_rect(full);
    }
}

/// Test double that records every call.
#[cfg(test)]
pub(crate) mod recording {
    use super::{Rect, Surface};

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Resize(u32, u32),
        Clear(Rect),
        Fill(Rect, String),
        Stroke(Rect, f64, String),
        Bitmap { src: Rect, dst: Rect },
    }

    pub struct RecordingSurface {
        pub width: u32,
        pub height: u32,
        pub bitmap: (u32, u32),
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                bitmap: (900, 900),
                ops: Vec::new(),
            }
        }

        pub fn bitmaps(&self) -> Vec<(Rect, Rect)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Bitmap { src, dst } => Some((*src, *dst)),
                    _ => None,
                })
                .collect()
        }

        pub fn strokes(&self) -> Vec<(Rect, f64)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Stroke(r, w, _) => Some((*r, *w)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
            self.ops.push(Op::Resize(width, height));
        }
        fn clear_rect(&mut self, rect: Rect) {
            self.ops.push(Op::Clear(rect));
        }
        fn fill_rect(&mut self, rect: Rect, color: &str) {
            self.ops.push(Op::Fill(rect, color.to_string()));
        }
        fn stroke_rect(&mut self, rect: Rect, line_width: f64, color: &str) {
            self.ops.push(Op::Stroke(rect, line_width, color.to_string()));
        }
        fn draw_bitmap(&mut self, src: Rect, dst: Rect) {
            self.ops.push(Op::Bitmap { src, dst });
        }
        fn bitmap_size(&self) -> (u32, u32) {
            self.bitmap
        }
    }
}
