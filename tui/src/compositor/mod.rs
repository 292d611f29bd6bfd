//! Layered Compositor
//!
//! The showroom screen is built from z-ordered layers: the page body at the
//! back, sparkles over the hero, the navigation bar, and toasts on top. Each
//! layer draws into its own buffer; [`Compositor::composite`] stacks them.
//!
//! Blank cells are transparent, so a sparkle layer only covers the cells it
//! actually draws.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// Owns every layer and the composited output
pub struct Compositor {
    layers: HashMap<LayerId, Layer>,
    /// Back to front
    render_order: Vec<LayerId>,
    next_id: u32,
    output: Buffer,
    area: Rect,
}

impl Compositor {
    /// Create a compositor covering `area`
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Screen area
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        self.layers.insert(id, Layer::new(id, bounds, z_index));
        self.update_render_order();

        id
    }

    /// Layer buffer for drawing, origin at (0, 0)
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Current screen bounds of a layer
    pub fn layer_bounds(&self, id: LayerId) -> Option<Rect> {
        self.layers.get(&id).map(|l| l.bounds)
    }

    /// Move and resize a layer; its buffer is cleared if the size changes
    pub fn place_layer(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(&id) {
            let resized =
                layer.bounds.width != bounds.width || layer.bounds.height != bounds.height;
            layer.bounds = bounds;
            if resized {
                layer.buffer = Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height));
            }
        }
    }

    /// Set a layer's z-index
    pub fn set_z_index(&mut self, id: LayerId, z_index: i32) {
        if let Some(layer) = self.layers.get_mut(&id) {
            if layer.z_index != z_index {
                layer.z_index = z_index;
                self.update_render_order();
            }
        }
    }

    /// Show or hide a layer
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Resize the whole screen
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Stack all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, self.area, layer);
                }
            }
        }

        &self.output
    }

    /// Copy a layer's non-blank cells onto the output
    fn blit_layer(output: &mut Buffer, area: Rect, layer: &Layer) {
        let lb = layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x.saturating_add(lx);
                let dst_y = lb.y.saturating_add(ly);
                if dst_x >= area.width || dst_y >= area.height {
                    continue;
                }

                let Some(src_cell) = layer.buffer.cell((lx, ly)) else {
                    continue;
                };
                if src_cell.symbol() == " " && src_cell.bg == ratatui::style::Color::Reset {
                    continue;
                }
                if let Some(dst) = output.cell_mut((dst_x, dst_y)) {
                    *dst = src_cell.clone();
                }
            }
        }
    }

    /// Topmost visible layer at a screen position
    pub fn layer_at(&self, x: u16, y: u16) -> Option<LayerId> {
        self.render_order.iter().rev().copied().find(|id| {
            self.layers
                .get(id)
                .is_some_and(|layer| layer.visible && layer.contains(x, y))
        })
    }

    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order.sort_by_key(|id| {
            self.layers
                .get(id)
                .map_or((0, id.0), |l| (l.z_index, id.0))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn test_higher_layer_wins() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 10, 2));
        let back = compositor.create_layer(Rect::new(0, 0, 10, 2), 0);
        let front = compositor.create_layer(Rect::new(2, 0, 3, 1), 10);

        compositor
            .layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 0, "aaaaaaaaaa", Style::default());
        compositor
            .layer_buffer_mut(front)
            .unwrap()
            .set_string(0, 0, "b b", Style::default());

        let out = compositor.composite();
        let row: String = (0..10).map(|x| out[(x, 0)].symbol().to_string()).collect();
        assert_eq!(row, "aababaaaaa");
    }

    #[test]
    fn test_hidden_layer_skipped_and_hit_testing() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 10, 5));
        let body = compositor.create_layer(Rect::new(0, 0, 10, 5), 0);
        let toast = compositor.create_layer(Rect::new(5, 0, 5, 2), 100);

        assert_eq!(compositor.layer_at(6, 1), Some(toast));
        compositor.set_visible(toast, false);
        assert_eq!(compositor.layer_at(6, 1), Some(body));
        assert_eq!(compositor.layer_at(20, 20), None);
    }

    #[test]
    fn test_place_layer_moves_and_resizes() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 20, 10));
        let id = compositor.create_layer(Rect::new(0, 0, 5, 5), 0);
        compositor.place_layer(id, Rect::new(3, 4, 8, 2));
        assert_eq!(compositor.layer_bounds(id), Some(Rect::new(3, 4, 8, 2)));
        assert_eq!(compositor.layer_buffer_mut(id).unwrap().area.width, 8);
    }
}
