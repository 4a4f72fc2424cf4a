//! Desktop bring-up: background, cursor and the pointer gesture loop.

use strata_abi::draw::Canvas;
use strata_abi::{Point, PointerEvent, VideoResult};
use strata_gfx::Window;
use strata_gfx::cursor::new_cursor_window;
use strata_gfx::desktop::{draw_desktop, draw_window_frame};
use strata_lib::{klog_info, klog_set_level, klog_warn};

use crate::config::CompositorConfig;
use crate::layer::{LayerId, SharedWindow, share_window};
use crate::layer_manager::LayerManager;
use crate::pointer::PointerController;

/// A running desktop on one output surface.
///
/// The background layer sits at height 0 and is never draggable; the cursor
/// layer is kept above everything else.
pub struct Desktop<S: Canvas> {
    layers: LayerManager<S>,
    pointer: PointerController,
    background_layer: LayerId,
    mouse_layer: LayerId,
    config: CompositorConfig,
}

impl<S: Canvas> Desktop<S> {
    pub fn new(screen: S, config: CompositorConfig) -> VideoResult<Self> {
        klog_set_level(config.log_level);

        let format = screen.pixel_format();
        let mut layers = LayerManager::new();
        layers.set_output(screen)?;
        let size = layers.screen_size();

        let mut background = Window::new(size.x as u32, size.y as u32, format)
            .inspect_err(|err| klog_warn!("desktop: background window failed: {}", err))?;
        draw_desktop(&mut background, config.desktop_bg);
        let cursor = new_cursor_window(format)
            .inspect_err(|err| klog_warn!("desktop: cursor window failed: {}", err))?;

        let background_layer = layers
            .new_layer()
            .set_window(share_window(background))
            .move_to(Point::ORIGIN)
            .id();
        let mouse_layer = layers
            .new_layer()
            .set_window(share_window(cursor))
            .move_to(config.mouse_position)
            .id();
        layers.up_down(background_layer, 0);
        layers.up_down(mouse_layer, 1);

        let pointer = PointerController::new(mouse_layer, size, config.mouse_position);
        layers.move_to(mouse_layer, pointer.position());
        layers.draw();

        klog_info!("desktop: up at {}x{}", size.x, size.y);
        Ok(Self {
            layers,
            pointer,
            background_layer,
            mouse_layer,
            config,
        })
    }

    /// Build a framed window ready to be painted into and shown with
    /// [`Desktop::add_window`].
    pub fn new_window(&self, width: u32, height: u32) -> VideoResult<SharedWindow> {
        let format = self
            .layers
            .output()
            .map(|o| o.pixel_format())
            .unwrap_or_default();
        let mut window = Window::new(width, height, format)?;
        draw_window_frame(&mut window);
        Ok(share_window(window))
    }

    /// Show `window` at `pos` as a draggable layer just below the cursor.
    pub fn add_window(&mut self, window: SharedWindow, pos: Point) -> LayerId {
        let id = self
            .layers
            .new_layer()
            .set_window(window)
            .move_to(pos)
            .set_draggable(true)
            .id();
        let below_cursor = self
            .layers
            .layer_height(self.mouse_layer)
            .unwrap_or(self.layers.stack().len());
        self.layers.up_down(id, below_cursor as i32);
        self.layers.draw_layer(id);
        id
    }

    /// Feed one pointer report through the gesture state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.pointer.on_event(&mut self.layers, event);
        if self.layers.stack().last() != Some(&self.mouse_layer) {
            self.layers.up_down(self.mouse_layer, i32::MAX);
            self.layers.draw_layer(self.mouse_layer);
        }
    }

    /// Feed a raw report from the mouse driver: button bits, then motion.
    pub fn handle_mouse_report(&mut self, buttons: u8, dx: i8, dy: i8) {
        self.handle_pointer(PointerEvent::from_raw(buttons, dx, dy));
    }

    /// Repaint the whole screen.
    pub fn redraw(&mut self) {
        self.layers.draw();
    }

    #[inline]
    pub fn layers(&self) -> &LayerManager<S> {
        &self.layers
    }

    #[inline]
    pub fn layers_mut(&mut self) -> &mut LayerManager<S> {
        &mut self.layers
    }

    #[inline]
    pub fn pointer(&self) -> &PointerController {
        &self.pointer
    }

    #[inline]
    pub fn background_layer(&self) -> LayerId {
        self.background_layer
    }

    #[inline]
    pub fn mouse_layer(&self) -> LayerId {
        self.mouse_layer
    }

    #[inline]
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }
}
