//! A single compositor layer

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::LayerId;

/// An independently drawn region of the screen
pub struct Layer {
    /// Identifier assigned by the compositor
    pub id: LayerId,
    /// Position and size in screen coordinates
    pub bounds: Rect,
    /// Stacking order; higher is drawn later (on top)
    pub z_index: i32,
    /// Layer-local buffer, origin at (0, 0)
    pub buffer: Buffer,
    /// Hidden layers are skipped when compositing
    pub visible: bool,
}

impl Layer {
    /// Create a visible, empty layer
    pub fn new(id: LayerId, bounds: Rect, z_index: i32) -> Self {
        Self {
            id,
            bounds,
            z_index,
            buffer: Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height)),
            visible: true,
        }
    }

    /// Whether a screen position falls inside this layer
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.bounds.x
            && x < self.bounds.x.saturating_add(self.bounds.width)
            && y >= self.bounds.y
            && y < self.bounds.y.saturating_add(self.bounds.height)
    }
}
