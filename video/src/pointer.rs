//! Cursor tracking and the press-drag-release gesture.

use strata_abi::draw::Canvas;
use strata_abi::{MouseButtons, Point, PointerEvent};
use strata_lib::klog_debug;

use crate::layer::LayerId;
use crate::layer_manager::LayerManager;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(LayerId),
}

/// Turns relative pointer reports into cursor moves and window drags.
///
/// The cursor is an ordinary layer referred to by id; every lookup goes
/// through the `LayerManager` passed to [`PointerController::on_event`].
pub struct PointerController {
    position: Point,
    screen_size: Point,
    previous_buttons: MouseButtons,
    drag: DragState,
    mouse_layer: LayerId,
}

impl PointerController {
    pub fn new(mouse_layer: LayerId, screen_size: Point, initial: Point) -> Self {
        let mut controller = Self {
            position: Point::ORIGIN,
            screen_size,
            previous_buttons: MouseButtons::empty(),
            drag: DragState::Idle,
            mouse_layer,
        };
        controller.position = controller.clamp(initial);
        controller
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    #[inline]
    pub fn mouse_layer(&self) -> LayerId {
        self.mouse_layer
    }

    fn clamp(&self, pos: Point) -> Point {
        let max = (self.screen_size - Point::new(1, 1)).max(Point::ORIGIN);
        pos.clamp(Point::ORIGIN, max)
    }

    /// Apply one pointer report. Out-of-range motion is absorbed by clamping.
    pub fn on_event<S: Canvas>(&mut self, layers: &mut LayerManager<S>, event: PointerEvent) {
        let old_pos = self.position;
        self.position = self.clamp(old_pos + event.displacement());
        let delta = self.position - old_pos;

        layers.move_to(self.mouse_layer, self.position);

        let was_down = self.previous_buttons.contains(MouseButtons::LEFT);
        let is_down = event.buttons.contains(MouseButtons::LEFT);

        match (was_down, is_down) {
            (false, true) => {
                let hit = layers
                    .find_layer_by_position(self.position, self.mouse_layer)
                    .filter(|layer| layer.is_draggable())
                    .map(|layer| layer.id());
                if let Some(id) = hit {
                    klog_debug!("pointer: drag start layer {} at {:?}", id, self.position);
                    self.drag = DragState::Dragging(id);
                    layers.set_to_front(id);
                    layers.draw_layer(id);
                }
            }
            (true, true) => {
                if let DragState::Dragging(id) = self.drag {
                    layers.move_relative(id, delta);
                }
            }
            (true, false) => {
                if let DragState::Dragging(id) = self.drag {
                    klog_debug!("pointer: drag end layer {}", id);
                }
                self.drag = DragState::Idle;
            }
            (false, false) => {}
        }

        self.previous_buttons = event.buttons;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::share_window;
    use strata_abi::draw::PixelColor;
    use strata_abi::PixelFormat;
    use strata_gfx::{FrameBuffer, Window};

    fn manager() -> LayerManager<FrameBuffer> {
        let Ok(screen) = FrameBuffer::with_size(64, 48, PixelFormat::Rgbx8888) else {
            panic!("screen alloc");
        };
        let mut lm = LayerManager::new();
        assert!(lm.set_output(screen).is_ok());
        lm
    }

    fn add(
        lm: &mut LayerManager<FrameBuffer>,
        pos: Point,
        size: u32,
        draggable: bool,
    ) -> LayerId {
        let Ok(mut window) = Window::new(size, size, PixelFormat::Rgbx8888) else {
            panic!("window alloc");
        };
        window.clear(PixelColor::WHITE);
        let layer = lm.new_layer();
        layer
            .set_window(share_window(window))
            .move_to(pos)
            .set_draggable(draggable);
        let id = layer.id();
        lm.up_down(id, i32::MAX);
        id
    }

    const PRESS: MouseButtons = MouseButtons::LEFT;
    const NONE: MouseButtons = MouseButtons::empty();

    #[test]
    fn test_position_is_clamped() {
        let mut lm = manager();
        let mouse = add(&mut lm, Point::ORIGIN, 2, false);
        let mut pc = PointerController::new(mouse, lm.screen_size(), Point::new(2, 40));

        pc.on_event(&mut lm, PointerEvent::new(NONE, -5, 20));
        assert_eq!(pc.position(), Point::new(0, 47));
        assert_eq!(lm.layer(mouse).map(|l| l.position()), Some(Point::new(0, 47)));

        pc.on_event(&mut lm, PointerEvent::new(NONE, 127, -128));
        assert_eq!(pc.position(), Point::new(63, 0));
    }

    #[test]
    fn test_press_on_background_does_not_drag() {
        let mut lm = manager();
        let bg = add(&mut lm, Point::ORIGIN, 48, false);
        let mouse = add(&mut lm, Point::ORIGIN, 2, false);
        let mut pc = PointerController::new(mouse, lm.screen_size(), Point::new(5, 5));

        pc.on_event(&mut lm, PointerEvent::new(PRESS, 0, 0));
        assert_eq!(pc.drag_state(), DragState::Idle);
        assert_eq!(lm.stack(), &[bg, mouse]);
    }

    #[test]
    fn test_drag_gesture_moves_layer() {
        let mut lm = manager();
        let bg = add(&mut lm, Point::ORIGIN, 48, false);
        let win = add(&mut lm, Point::new(10, 10), 8, true);
        let other = add(&mut lm, Point::new(30, 30), 8, true);
        let mouse = add(&mut lm, Point::ORIGIN, 2, false);
        let mut pc = PointerController::new(mouse, lm.screen_size(), Point::new(12, 12));

        pc.on_event(&mut lm, PointerEvent::new(PRESS, 0, 0));
        assert_eq!(pc.drag_state(), DragState::Dragging(win));
        assert_eq!(lm.stack(), &[bg, other, mouse, win]);

        pc.on_event(&mut lm, PointerEvent::new(PRESS, 5, -3));
        assert_eq!(lm.layer(win).map(|l| l.position()), Some(Point::new(15, 7)));

        pc.on_event(&mut lm, PointerEvent::new(NONE, 4, 4));
        assert_eq!(pc.drag_state(), DragState::Idle);
        assert_eq!(lm.layer(win).map(|l| l.position()), Some(Point::new(15, 7)));
    }

    #[test]
    fn test_click_repaints_raised_layer() {
        let mut lm = manager();
        let low = add(&mut lm, Point::new(10, 10), 20, true);
        let high = add(&mut lm, Point::new(20, 20), 20, true);
        let mouse = add(&mut lm, Point::ORIGIN, 2, false);
        let green = PixelColor::rgb(1, 200, 1);
        let red = PixelColor::rgb(200, 1, 1);
        for (id, color) in [(low, green), (high, red)] {
            if let Some(window) = lm.layer(id).and_then(|l| l.window()) {
                window.lock().clear(color);
            }
        }
        lm.draw();
        let overlap = Point::new(25, 25);
        assert_eq!(lm.output().and_then(|o| o.pixel(overlap)), Some(red));

        let mut pc = PointerController::new(mouse, lm.screen_size(), Point::new(12, 12));
        pc.on_event(&mut lm, PointerEvent::new(PRESS, 0, 0));
        pc.on_event(&mut lm, PointerEvent::new(NONE, 0, 0));

        let hit = lm.find_layer_by_position(overlap, mouse).map(|l| l.id());
        assert_eq!(hit, Some(low));
        assert_eq!(lm.output().and_then(|o| o.pixel(overlap)), Some(green));
    }

    #[test]
    fn test_drag_uses_clamped_motion() {
        let mut lm = manager();
        let win = add(&mut lm, Point::new(0, 0), 8, true);
        let mouse = add(&mut lm, Point::ORIGIN, 2, false);
        let mut pc = PointerController::new(mouse, lm.screen_size(), Point::new(2, 2));

        pc.on_event(&mut lm, PointerEvent::new(PRESS, 0, 0));
        pc.on_event(&mut lm, PointerEvent::new(PRESS, -10, 1));

        assert_eq!(pc.position(), Point::new(0, 3));
        assert_eq!(lm.layer(win).map(|l| l.position()), Some(Point::new(-2, 1)));
    }
}
