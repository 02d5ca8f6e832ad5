//! Raster rendering for overlays using tiny-skia
//!
//! `Pixmap` is the surface hosts draw onto. `draw_overlay_on_image` composites
//! an overlay over an existing `RgbaImage`, e.g. a host canvas snapshot.

use image::RgbaImage;
use tiny_skia::{ColorU8, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::pixel_center;
use super::{StrokeStyle, Surface};
use crate::config::ShapeColor;
use crate::domain::Point;
use crate::overlay::CanvasOverlay;

impl Surface for Pixmap {
    fn stroke_segment(&mut self, start: Point, end: Point, color: ShapeColor, stroke: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(pixel_center(start.x), pixel_center(start.y));
        pb.line_to(pixel_center(end.x), pixel_center(end.y));
        let Some(path) = pb.finish() else {
            return;
        };

        let [r, g, b, a] = color.to_rgba_u8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = stroke.anti_alias;

        let stroke = Stroke {
            width: stroke.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
///
/// The image holds straight alpha while the pixmap is premultiplied, so
/// pixels are converted both ways.
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(size) = IntSize::from_wh(img.width(), img.height()) else {
        return;
    };

    let mut data = Vec::with_capacity(img.as_raw().len());
    for px in img.pixels() {
        let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let Some(mut pixmap) = Pixmap::from_vec(data, size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
}

/// Draw an overlay on top of an image
pub fn draw_overlay_on_image<O: CanvasOverlay + ?Sized>(img: &mut RgbaImage, overlay: &O) {
    with_pixmap(img, |pixmap| overlay.draw(pixmap));
}

/// Render an overlay onto a fresh transparent image
pub fn render_overlay<O: CanvasOverlay + ?Sized>(
    overlay: &O,
    width: u32,
    height: u32,
) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    draw_overlay_on_image(&mut img, overlay);
    img
}
