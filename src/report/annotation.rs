use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};

use crate::Region;

pub const SEAM_HIGHLIGHT: Rgb<u8> = Rgb([255, 0, 0]);
pub const GLYPH_OUTLINE: Rgb<u8> = Rgb([0, 0, 255]);

/// Single owned working copy of the input image. Detectors mark it in a fixed
/// sequence; the caller's image is never touched.
pub struct AnnotationSurface {
    canvas: RgbImage,
}

impl AnnotationSurface {
    pub fn new(original: &RgbImage) -> Self {
        Self {
            canvas: original.clone(),
        }
    }

    pub fn highlight(&mut self, region: &Region, color: Rgb<u8>, opacity: f32) {
        let (width, height) = self.canvas.dimensions();
        let alpha = opacity.clamp(0.0, 1.0);

        for y in region.y..(region.y + region.height).min(height) {
            for x in region.x..(region.x + region.width).min(width) {
                let original = self.canvas.get_pixel(x, y);
                let blended = Rgb([
                    ((1.0 - alpha) * original[0] as f32 + alpha * color[0] as f32) as u8,
                    ((1.0 - alpha) * original[1] as f32 + alpha * color[1] as f32) as u8,
                    ((1.0 - alpha) * original[2] as f32 + alpha * color[2] as f32) as u8,
                ]);
                self.canvas.put_pixel(x, y, blended);
            }
        }

        self.outline(region, color);
    }

    pub fn outline(&mut self, region: &Region, color: Rgb<u8>) {
        if region.width == 0 || region.height == 0 {
            return;
        }

        draw_hollow_rect_mut(
            &mut self.canvas,
            Rect::at(region.x as i32, region.y as i32).of_size(region.width, region.height),
            color,
        );
    }

    pub fn image(&self) -> &RgbImage {
        &self.canvas
    }

    pub fn into_image(self) -> RgbImage {
        self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_blends_toward_the_overlay_color() {
        let original = RgbImage::from_pixel(20, 20, Rgb([100, 100, 100]));
        let mut surface = AnnotationSurface::new(&original);

        let region = Region {
            x: 5,
            y: 5,
            width: 8,
            height: 8,
        };
        surface.highlight(&region, SEAM_HIGHLIGHT, 0.4);

        let marked = surface.into_image();
        let inside = marked.get_pixel(8, 8);
        assert!(inside[0] > 100);
        assert!(inside[1] < 100);
        assert_eq!(*marked.get_pixel(1, 1), Rgb([100, 100, 100]));
    }

    #[test]
    fn outline_leaves_the_interior_untouched() {
        let original = RgbImage::from_pixel(20, 20, Rgb([200, 200, 200]));
        let mut surface = AnnotationSurface::new(&original);

        let region = Region {
            x: 2,
            y: 2,
            width: 10,
            height: 10,
        };
        surface.outline(&region, GLYPH_OUTLINE);

        let marked = surface.into_image();
        assert_eq!(*marked.get_pixel(2, 2), GLYPH_OUTLINE);
        assert_eq!(*marked.get_pixel(7, 7), Rgb([200, 200, 200]));
    }
}
