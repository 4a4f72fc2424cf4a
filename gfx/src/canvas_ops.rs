use strata_abi::draw::{Canvas, PixelColor};
use strata_abi::{Point, Rect};

/// Clip `rect` to the target, returning the region that was actually touched.
#[inline]
fn touched<T: Canvas + ?Sized>(target: &T, rect: Rect) -> Option<Rect> {
    let clipped = rect.intersect(&target.bounds());
    if clipped.is_empty() { None } else { Some(clipped) }
}

/// Fill a solid rectangle. Returns the on-canvas area that changed.
pub fn fill_rectangle<T: Canvas + ?Sized>(
    target: &mut T,
    pos: Point,
    size: Point,
    color: PixelColor,
) -> Option<Rect> {
    let rect = Rect::from_parts(pos, size);
    let damage = touched(target, rect)?;
    target.fill_rect(damage, color);
    Some(damage)
}

/// Draw a one-pixel rectangle outline. Returns the on-canvas bounding area.
pub fn draw_rectangle<T: Canvas + ?Sized>(
    target: &mut T,
    pos: Point,
    size: Point,
    color: PixelColor,
) -> Option<Rect> {
    if size.x <= 0 || size.y <= 0 {
        return None;
    }
    let x1 = pos.x.saturating_add(size.x - 1);
    let y1 = pos.y.saturating_add(size.y - 1);
    target.hline(pos.x, x1, pos.y, color);
    target.hline(pos.x, x1, y1, color);
    target.vline(pos.x, pos.y, y1, color);
    target.vline(x1, pos.y, y1, color);

    touched(target, Rect::from_parts(pos, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameBuffer;
    use strata_abi::PixelFormat;

    const FG: PixelColor = PixelColor::rgb(1, 2, 3);

    fn buffer() -> FrameBuffer {
        match FrameBuffer::with_size(8, 8, PixelFormat::Rgbx8888) {
            Ok(fb) => fb,
            Err(err) => panic!("alloc: {}", err),
        }
    }

    #[test]
    fn test_fill_rectangle_reports_clipped_area() {
        let mut fb = buffer();
        let damage = fill_rectangle(&mut fb, Point::new(6, -2), Point::new(5, 4), FG);
        assert_eq!(damage, Some(Rect::new(6, 0, 2, 2)));
        assert_eq!(fb.pixel(Point::new(7, 1)), Some(FG));
        assert_eq!(fb.pixel(Point::new(5, 1)), Some(PixelColor::BLACK));
    }

    #[test]
    fn test_fill_rectangle_off_canvas_is_noop() {
        let mut fb = buffer();
        assert_eq!(fill_rectangle(&mut fb, Point::new(20, 20), Point::new(2, 2), FG), None);
    }

    #[test]
    fn test_draw_rectangle_outline_only() {
        let mut fb = buffer();
        draw_rectangle(&mut fb, Point::new(1, 1), Point::new(4, 4), FG);
        assert_eq!(fb.pixel(Point::new(1, 1)), Some(FG));
        assert_eq!(fb.pixel(Point::new(4, 4)), Some(FG));
        assert_eq!(fb.pixel(Point::new(4, 2)), Some(FG));
        assert_eq!(fb.pixel(Point::new(2, 2)), Some(PixelColor::BLACK));
    }

    #[test]
    fn test_draw_rectangle_extreme_extent_saturates() {
        let mut fb = buffer();
        let huge = Point::new(i32::MAX, i32::MAX);
        let damage = draw_rectangle(&mut fb, Point::new(2, 2), huge, FG);
        assert_eq!(damage, Some(Rect::new(2, 2, 6, 6)));
        assert_eq!(fb.pixel(Point::new(2, 7)), Some(FG));
        assert_eq!(fb.pixel(Point::new(7, 2)), Some(FG));
        assert_eq!(fb.pixel(Point::new(3, 3)), Some(PixelColor::BLACK));

        let far = Point::new(i32::MAX - 1, i32::MAX - 1);
        assert_eq!(draw_rectangle(&mut fb, far, huge, FG), None);
    }
}
