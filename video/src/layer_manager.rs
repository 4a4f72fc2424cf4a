//! Z-ordered layer stack and the compose-then-present redraw path.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use strata_abi::draw::Canvas;
use strata_abi::{DisplayInfo, Point, Rect, VideoResult};
use strata_gfx::FrameBuffer;
use strata_lib::{klog_info, klog_warn};

use crate::layer::{Layer, LayerId};

/// Owns every layer and decides what reaches the output surface.
///
/// `stack` lists the visible layers bottom to top. A layer that exists in
/// `layers` but not in `stack` is hidden. Every redraw is composed into the
/// back buffer first and only the touched region is copied to `output`.
pub struct LayerManager<S: Canvas> {
    output: Option<S>,
    back_buffer: Option<FrameBuffer>,
    layers: BTreeMap<LayerId, Layer>,
    stack: Vec<LayerId>,
    latest_id: LayerId,
}

impl<S: Canvas> Default for LayerManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Canvas> LayerManager<S> {
    pub const fn new() -> Self {
        Self {
            output: None,
            back_buffer: None,
            layers: BTreeMap::new(),
            stack: Vec::new(),
            latest_id: 0,
        }
    }

    /// Bind the physical output and allocate a back buffer of the same
    /// geometry and pixel format.
    pub fn set_output(&mut self, output: S) -> VideoResult {
        let info = DisplayInfo::new(output.width(), output.height(), output.pixel_format());
        let back_buffer = FrameBuffer::new(info).inspect_err(|err| {
            klog_warn!(
                "compositor: back buffer {}x{} failed: {}",
                info.width,
                info.height,
                err
            );
        })?;

        klog_info!(
            "compositor: output bound {}x{} {:?}",
            info.width,
            info.height,
            info.format
        );
        self.back_buffer = Some(back_buffer);
        self.output = Some(output);
        Ok(())
    }

    #[inline]
    pub fn output(&self) -> Option<&S> {
        self.output.as_ref()
    }

    #[inline]
    pub fn output_mut(&mut self) -> Option<&mut S> {
        self.output.as_mut()
    }

    /// Output size, or zero before an output is bound.
    pub fn screen_size(&self) -> Point {
        self.output
            .as_ref()
            .map(|o| Point::new(o.width() as i32, o.height() as i32))
            .unwrap_or(Point::ORIGIN)
    }

    /// Allocate a hidden layer with a fresh id. Ids are never reused.
    pub fn new_layer(&mut self) -> &mut Layer {
        self.latest_id += 1;
        let id = self.latest_id;
        self.layers.entry(id).or_insert_with(|| Layer::new(id))
    }

    /// Forget a layer entirely.
    pub fn remove_layer(&mut self, id: LayerId) {
        if self.layers.remove(&id).is_none() {
            klog_warn!("compositor: remove of unknown layer {}", id);
            return;
        }
        self.stack.retain(|&l| l != id);
    }

    #[inline]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    #[inline]
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    /// Visible layers, bottom first.
    #[inline]
    pub fn stack(&self) -> &[LayerId] {
        &self.stack
    }

    /// Stack index of `id`, `None` while hidden.
    pub fn layer_height(&self, id: LayerId) -> Option<usize> {
        self.stack.iter().position(|&l| l == id)
    }

    /// Reposition `id` in the stack. Negative heights hide the layer, heights
    /// past the end put it on top. Nothing is redrawn.
    pub fn up_down(&mut self, id: LayerId, new_height: i32) {
        if !self.layers.contains_key(&id) {
            klog_warn!("compositor: up_down on unknown layer {}", id);
            return;
        }
        if new_height < 0 {
            self.hide(id);
            return;
        }

        if let Some(old) = self.layer_height(id) {
            self.stack.remove(old);
        }
        let height = (new_height as usize).min(self.stack.len());
        self.stack.insert(height, id);
    }

    pub fn hide(&mut self, id: LayerId) {
        if !self.layers.contains_key(&id) {
            klog_warn!("compositor: hide of unknown layer {}", id);
            return;
        }
        if let Some(old) = self.layer_height(id) {
            self.stack.remove(old);
        }
    }

    /// Place `id` at `pos` and repaint the union of the area it left and the
    /// area it now covers.
    pub fn move_to(&mut self, id: LayerId, pos: Point) {
        let Some(layer) = self.layers.get_mut(&id) else {
            klog_warn!("compositor: move of unknown layer {}", id);
            return;
        };
        let old_area = layer.bounds();
        layer.move_to(pos);
        let new_area = layer.bounds();

        let area = match (old_area, new_area) {
            (Some(old), Some(new)) => old.union(&new),
            (old, new) => old.or(new).unwrap_or(Rect::EMPTY),
        };
        self.draw_area(area);
    }

    pub fn move_relative(&mut self, id: LayerId, delta: Point) {
        let Some(layer) = self.layers.get(&id) else {
            klog_warn!("compositor: move of unknown layer {}", id);
            return;
        };
        let pos = layer.position() + delta;
        self.move_to(id, pos);
    }

    /// Recompose `area` from every visible layer and present it.
    pub fn draw_area(&mut self, area: Rect) {
        let (Some(back), Some(output)) = (self.back_buffer.as_mut(), self.output.as_mut()) else {
            return;
        };
        let area = area.intersect(&back.bounds());
        if area.is_empty() {
            return;
        }

        for id in &self.stack {
            if let Some(layer) = self.layers.get(id) {
                layer.draw_to(back, area);
            }
        }
        back.copy_to(output, area.pos, area);
    }

    /// Repaint the screen region covered by `id`, including layers above and
    /// below it.
    pub fn draw_layer(&mut self, id: LayerId) {
        let Some(layer) = self.layers.get(&id) else {
            klog_warn!("compositor: draw of unknown layer {}", id);
            return;
        };
        if let Some(area) = layer.bounds() {
            self.draw_area(area);
        }
    }

    pub fn draw(&mut self) {
        let size = self.screen_size();
        self.draw_area(Rect::with_size(size));
    }

    /// Topmost visible layer whose window contains `pos`, skipping
    /// `exclude_id`.
    pub fn find_layer_by_position(&self, pos: Point, exclude_id: LayerId) -> Option<&Layer> {
        self.stack
            .iter()
            .rev()
            .filter(|&&id| id != exclude_id)
            .filter_map(|id| self.layers.get(id))
            .find(|layer| layer.bounds().is_some_and(|b| b.contains(pos)))
    }

    /// Raise `id` to the top if it is visible and draggable.
    pub fn set_to_front(&mut self, id: LayerId) {
        let Some(layer) = self.layers.get(&id) else {
            klog_warn!("compositor: set_to_front on unknown layer {}", id);
            return;
        };
        if !layer.is_draggable() || self.layer_height(id).is_none() {
            return;
        }
        self.up_down(id, i32::MAX);
    }
}
