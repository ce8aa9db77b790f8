use super::{CornerRadii, Surface};
use crate::{
    color::Color,
    geometry::{Point, Rect},
};
use itertools::Itertools;
use std::path::Path;

/// A software-rasterized RGB surface.
///
/// Output is hard-edged (a pixel is painted when its center falls inside the
/// shape), which keeps rendering deterministic and pixel comparisons exact.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let pixels = vec![background; (width * height) as usize];
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// The same image mirrored about its vertical centerline.
    pub fn flipped_horizontal(&self) -> Self {
        let mut flipped = self.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                flipped.pixels[(y * self.width + x) as usize] = self.pixel(self.width - 1 - x, y);
            }
        }
        flipped
    }

    pub fn save_png(&self, path: &Path) -> Result<(), image::ImageError> {
        let mut output = image::RgbImage::new(self.width, self.height);
        for (x, y, pixel) in output.enumerate_pixels_mut() {
            let color = self.pixel(x, y);
            *pixel = image::Rgb([color.r, color.g, color.b]);
        }
        output.save_with_format(path, image::ImageFormat::Png)
    }

    fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Pixel index range whose centers may fall within `[min, max]`.
    fn pixel_range(min: f32, max: f32, limit: u32) -> (u32, u32) {
        let start = (min - 0.5).floor().max(0.0) as u32;
        let end = ((max + 0.5).ceil().max(0.0) as u32).min(limit);
        (start.min(limit), end)
    }

    fn stamp_segment(&mut self, a: Point, b: Point, radius: f32, color: Color) {
        let (min_x, max_x) = (a.x.min(b.x) - radius, a.x.max(b.x) + radius);
        let (min_y, max_y) = (a.y.min(b.y) - radius, a.y.max(b.y) + radius);
        let (x_start, x_end) = Self::pixel_range(min_x, max_x, self.width);
        let (y_start, y_end) = Self::pixel_range(min_y, max_y, self.height);
        for y in y_start..y_end {
            for x in x_start..x_end {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if segment_distance(center, a, b) <= radius {
                    self.set(x, y, color);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn fill_rounded_rect(&mut self, rect: Rect, radii: CornerRadii, color: Color) {
        if rect.is_empty() {
            return;
        }
        let (x_start, x_end) = Self::pixel_range(rect.left(), rect.right(), self.width);
        let (y_start, y_end) = Self::pixel_range(rect.top(), rect.bottom(), self.height);
        for y in y_start..y_end {
            for x in x_start..x_end {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if rounded_rect_contains(rect, radii, center) {
                    self.set(x, y, color);
                }
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Color) {
        let radius = width / 2.0;
        if radius <= 0.0 {
            return;
        }
        match points {
            [] => {}
            // a degenerate polyline strokes a single round cap
            [point] => self.stamp_segment(*point, *point, radius, color),
            _ => {
                // stamping each segment with clamped projection yields round
                // caps and round joins
                for (a, b) in points.iter().tuple_windows() {
                    self.stamp_segment(*a, *b, radius, color);
                }
            }
        }
    }
}

fn rounded_rect_contains(rect: Rect, radii: CornerRadii, point: Point) -> bool {
    if !rect.contains(point) {
        return false;
    }
    let corners = [
        (radii.top_left, rect.left() + radii.top_left, rect.top() + radii.top_left, point.x < rect.left() + radii.top_left && point.y < rect.top() + radii.top_left),
        (radii.top_right, rect.right() - radii.top_right, rect.top() + radii.top_right, point.x > rect.right() - radii.top_right && point.y < rect.top() + radii.top_right),
        (radii.bottom_right, rect.right() - radii.bottom_right, rect.bottom() - radii.bottom_right, point.x > rect.right() - radii.bottom_right && point.y > rect.bottom() - radii.bottom_right),
        (radii.bottom_left, rect.left() + radii.bottom_left, rect.bottom() - radii.bottom_left, point.x < rect.left() + radii.bottom_left && point.y > rect.bottom() - radii.bottom_left),
    ];
    for (radius, cx, cy, in_corner_zone) in corners {
        if radius > 0.0 && in_corner_zone {
            let (dx, dy) = (point.x - cx, point.y - cy);
            if dx * dx + dy * dy > radius * radius {
                return false;
            }
        }
    }
    true
}

// computed in segment-relative deltas so mirrored geometry rasterizes to
// mirrored pixels bit-for-bit
fn segment_distance(point: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let (px, py) = (point.x - a.x, point.y - a.y);
    let length_squared = dx * dx + dy * dy;
    let t = if length_squared == 0.0 {
        0.0
    } else {
        ((px * dx + py * dy) / length_squared).clamp(0.0, 1.0)
    };
    let (ox, oy) = (px - t * dx, py - t * dy);
    (ox * ox + oy * oy).sqrt()
}
