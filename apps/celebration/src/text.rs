//! Text silhouettes: rasterize a string, then sample particles from its lit pixels.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use rand::Rng;

use crate::shapes;

pub const CANVAS_WIDTH: u32 = 1000;
pub const CANVAS_HEIGHT: u32 = 1000;
pub const DEFAULT_FONT_SIZE: f32 = 300.0;

/// Pixel stride of the lit-pixel scan, both axes.
const SCAN_STRIDE: usize = 4;
/// Red channel threshold for a pixel to count as lit.
const LIT_THRESHOLD: u8 = 128;
/// World units per canvas pixel.
const WORLD_SCALE: f32 = 0.08;
/// Radius of the sphere used when nothing was drawn.
const FALLBACK_RADIUS: f32 = 10.0;

/// Source glyphs are 8×8 cells.
const GLYPH_CELLS: u32 = 8;
/// Canvas pixels per glyph cell for a 1px font size.
const CELL_PER_FONT_PX: f32 = 0.1;
/// Extra stroke width for the bold face, as a share of one cell.
const BOLD_WIDEN: f32 = 0.25;

/// Offscreen RGBA canvas, white text on black.
pub struct TextRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextRaster {
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; (width * height * 4) as usize];
        // Opaque black background
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn red(&self, x: u32, y: u32) -> u8 {
        self.pixels[((y * self.width + x) * 4) as usize]
    }

    /// Fill an axis-aligned rectangle with white, clipped to the canvas.
    fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let cx0 = x0.round().max(0.0) as u32;
        let cy0 = y0.round().max(0.0) as u32;
        let cx1 = (x1.round().max(0.0) as u32).min(self.width);
        let cy1 = (y1.round().max(0.0) as u32).min(self.height);
        for y in cy0..cy1 {
            for x in cx0..cx1 {
                let i = ((y * self.width + x) * 4) as usize;
                self.pixels[i..i + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
    }

    /// Draw `text` centered on the canvas in a bold bitmap face.
    /// Characters without a glyph leave a blank cell.
    pub fn fill_text_centered(&mut self, text: &str, font_size: f32) {
        if !font_size.is_finite() || font_size <= 0.0 {
            return;
        }
        let cell = font_size * CELL_PER_FONT_PX;
        let advance = GLYPH_CELLS as f32 * cell;
        let glyph_count = text.chars().count() as f32;

        let origin_x = self.width as f32 * 0.5 - glyph_count * advance * 0.5;
        let origin_y = self.height as f32 * 0.5 - advance * 0.5;

        for (i, c) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(c) else {
                continue;
            };
            let gx = origin_x + i as f32 * advance;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_CELLS {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let x0 = gx + col as f32 * cell;
                    let y0 = origin_y + row as f32 * cell;
                    self.fill_rect(x0, y0, x0 + cell * (1.0 + BOLD_WIDEN), y0 + cell);
                }
            }
        }
    }

    /// Lit pixels on the scan grid, row by row.
    pub fn lit_pixels(&self) -> Vec<(u32, u32)> {
        let mut lit = Vec::new();
        for y in (0..self.height).step_by(SCAN_STRIDE) {
            for x in (0..self.width).step_by(SCAN_STRIDE) {
                if self.red(x, y) > LIT_THRESHOLD {
                    lit.push((x, y));
                }
            }
        }
        lit
    }
}

/// Point cloud shaped like `text`. Each point takes a random lit pixel (with
/// replacement) plus a little depth. Falls back to a small sphere when the
/// text draws nothing.
pub fn text_silhouette(rng: &mut impl Rng, text: &str, count: usize, font_size: f32) -> Vec<[f32; 3]> {
    let mut raster = TextRaster::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    raster.fill_text_centered(text, font_size);
    let lit = raster.lit_pixels();

    if lit.is_empty() {
        log::debug!("text {:?} drew no pixels, using sphere", text);
        return shapes::sphere(rng, count, FALLBACK_RADIUS);
    }

    let half_w = CANVAS_WIDTH as f32 * 0.5;
    let half_h = CANVAS_HEIGHT as f32 * 0.5;
    (0..count)
        .map(|_| {
            let (x, y) = lit[rng.gen_range(0..lit.len())];
            [
                (x as f32 - half_w) * WORLD_SCALE,
                -(y as f32 - half_h) * WORLD_SCALE,
                rng.gen_range(-1.0..=1.0),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn blank_canvas_has_no_lit_pixels() {
        let raster = TextRaster::new(64, 64);
        assert!(raster.lit_pixels().is_empty());
    }

    #[test]
    fn digit_lights_the_center() {
        let mut raster = TextRaster::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        raster.fill_text_centered("8", DEFAULT_FONT_SIZE);
        let lit = raster.lit_pixels();
        assert!(lit.len() > 100);
        // Glyph box is 240px wide, centered on 500
        assert!(lit.iter().all(|&(x, y)| (370..=640).contains(&x) && (370..=630).contains(&y)));
    }

    #[test]
    fn silhouette_lies_on_the_text_plane() {
        let mut rng = SmallRng::seed_from_u64(11);
        let points = text_silhouette(&mut rng, "2026", 2000, 200.0);
        assert_eq!(points.len(), 2000);
        for p in &points {
            assert!(p.iter().all(|v| v.is_finite()));
            assert!(p[0].abs() <= 40.0 && p[1].abs() <= 40.0);
            assert!(p[2] >= -1.0 && p[2] <= 1.0);
        }
    }

    #[test]
    fn wider_text_spreads_wider() {
        let mut rng = SmallRng::seed_from_u64(12);
        let one = text_silhouette(&mut rng, "1", 3000, 200.0);
        let year = text_silhouette(&mut rng, "2026", 3000, 200.0);
        let span = |pts: &[[f32; 3]]| {
            let (lo, hi) = pts.iter().fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
            hi - lo
        };
        assert!(span(&year) > span(&one) * 2.0);
    }

    #[test]
    fn blank_text_falls_back_to_sphere() {
        let mut rng = SmallRng::seed_from_u64(13);
        for text in ["", "   ", "\u{1F384}"] {
            let points = text_silhouette(&mut rng, text, 500, DEFAULT_FONT_SIZE);
            assert_eq!(points.len(), 500);
            assert!(points.iter().all(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt() <= 10.0 + 1e-4));
        }
    }

    #[test]
    fn degenerate_font_size_falls_back() {
        let mut rng = SmallRng::seed_from_u64(14);
        let points = text_silhouette(&mut rng, "5", 100, 0.0);
        assert_eq!(points.len(), 100);
        assert!(points.iter().all(|p| p.iter().all(|v| v.is_finite())));
    }
}
