//! A positioned, stackable handle onto a shared window.

use alloc::sync::Arc;

use spin::Mutex;
use strata_abi::{Point, Rect};
use strata_gfx::{FrameBuffer, Window};

pub type LayerId = u32;

/// Window storage shared between the code that paints into it and the layer
/// that presents it.
pub type SharedWindow = Arc<Mutex<Window>>;

/// Wrap a window for attaching to a layer.
#[inline]
pub fn share_window(window: Window) -> SharedWindow {
    Arc::new(Mutex::new(window))
}

/// Layers are only created through `LayerManager::new_layer`.
pub struct Layer {
    id: LayerId,
    position: Point,
    window: Option<SharedWindow>,
    draggable: bool,
}

impl Layer {
    pub(crate) fn new(id: LayerId) -> Self {
        Self {
            id,
            position: Point::ORIGIN,
            window: None,
            draggable: false,
        }
    }

    #[inline]
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Attach `window`. Nothing is redrawn.
    pub fn set_window(&mut self, window: SharedWindow) -> &mut Self {
        self.window = Some(window);
        self
    }

    #[inline]
    pub fn window(&self) -> Option<&SharedWindow> {
        self.window.as_ref()
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn move_to(&mut self, pos: Point) -> &mut Self {
        self.position = pos;
        self
    }

    pub fn move_relative(&mut self, delta: Point) -> &mut Self {
        self.position += delta;
        self
    }

    pub fn set_draggable(&mut self, draggable: bool) -> &mut Self {
        self.draggable = draggable;
        self
    }

    #[inline]
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Screen rectangle covered by the attached window.
    pub fn bounds(&self) -> Option<Rect> {
        let window = self.window.as_ref()?;
        Some(Rect::from_parts(self.position, window.lock().size()))
    }

    /// Composite the window at its position, limited to `area`.
    pub fn draw_to(&self, screen: &mut FrameBuffer, area: Rect) {
        if let Some(window) = &self.window {
            window.lock().draw_to(screen, self.position, area);
        }
    }
}
