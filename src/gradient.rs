//! Diagonal gradient canvas.
//!
//! The background of every icon is a three-segment piecewise-linear ramp laid
//! along the top-left to bottom-right diagonal. The segment boundaries sit at
//! 0.33 and 0.66 while the last segment is rescaled by 0.34, which leaves a
//! small step at 0.66. Generated icons depend on that exact step.

use image::{ImageBuffer, Rgb, RgbImage};

/// `(start, width)` of each ramp segment on the normalized diagonal axis.
const SEGMENTS: [(f64, f64); 3] = [(0.0, 0.33), (0.33, 0.33), (0.66, 0.34)];

/// Ordered 4-stop color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRamp {
    stops: [[u8; 3]; 4],
}

impl ColorRamp {
    pub const fn new(stops: [[u8; 3]; 4]) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[[u8; 3]; 4] {
        &self.stops
    }

    /// Color at `distance` along the diagonal, `distance` in `[0, 1)`.
    ///
    /// Segment selection uses strict `<`, so a distance that lands exactly on
    /// a breakpoint belongs to the upper segment at local ratio 0.
    pub fn sample(&self, distance: f64) -> Rgb<u8> {
        let segment = if distance < SEGMENTS[1].0 {
            0
        } else if distance < SEGMENTS[2].0 {
            1
        } else {
            2
        };

        let (start, width) = SEGMENTS[segment];
        let local_ratio = ((distance - start) / width).clamp(0.0, 1.0);

        let from = self.stops[segment];
        let to = self.stops[segment + 1];
        Rgb([
            lerp_channel(from[0], to[0], local_ratio),
            lerp_channel(from[1], to[1], local_ratio),
            lerp_channel(from[2], to[2], local_ratio),
        ])
    }
}

/// Truncating linear interpolation of a single channel.
fn lerp_channel(from: u8, to: u8, ratio: f64) -> u8 {
    let from = f64::from(from);
    let value = from + (f64::from(to) - from) * ratio;
    value.trunc().clamp(0.0, 255.0) as u8
}

/// Normalized diagonal distance of pixel `(x, y)` on a `size`×`size` canvas.
pub fn diagonal_distance(x: u32, y: u32, size: u32) -> f64 {
    (f64::from(x) + f64::from(y)) / (f64::from(size) * 2.0)
}

/// Fill a `size`×`size` canvas with the diagonal gradient of `ramp`.
pub fn build_canvas(size: u32, ramp: &ColorRamp) -> RgbImage {
    ImageBuffer::from_fn(size, size, |x, y| {
        ramp.sample(diagonal_distance(x, y, size))
    })
}
