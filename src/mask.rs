//! Rounded-corner alpha mask.
//!
//! Icons are cut to an iOS-style rounded square: a hard 0/255 mask built
//! from the canvas size, then merged with the opaque canvas as its alpha.

use anyhow::Result;
use image::{GrayImage, ImageBuffer, Luma, Rgba, RgbaImage, RgbImage};

/// iOS-style corner radius as a fraction of the icon edge.
pub const CORNER_RADIUS_RATIO: f64 = 0.215;

pub fn corner_radius(size: u32) -> u32 {
    (f64::from(size) * CORNER_RADIUS_RATIO).round() as u32
}

/// Build a hard-edged rounded-rectangle mask covering the whole canvas.
///
/// A pixel is opaque unless it sits in one of the four corner boxes and lies
/// further than `radius` from that corner's circle center. Corner centers are
/// placed symmetrically at `radius` from the first and last pixel rows/columns.
pub fn rounded_mask(size: u32, radius: u32) -> GrayImage {
    let r = f64::from(radius);
    let far = f64::from(size.saturating_sub(1)) - r;

    ImageBuffer::from_fn(size, size, |x, y| {
        let px = f64::from(x);
        let py = f64::from(y);

        // Nearest corner circle center, if the pixel is inside a corner box
        let cx = if px < r {
            Some(r)
        } else if px > far {
            Some(far)
        } else {
            None
        };
        let cy = if py < r {
            Some(r)
        } else if py > far {
            Some(far)
        } else {
            None
        };

        match (cx, cy) {
            (Some(cx), Some(cy)) => {
                let dx = px - cx;
                let dy = py - cy;
                if (dx * dx + dy * dy).sqrt() > r {
                    Luma([0])
                } else {
                    Luma([255])
                }
            }
            _ => Luma([255]),
        }
    })
}

/// Combine an opaque canvas with an alpha mask into an RGBA icon.
///
/// Masked-out pixels keep their canvas color with zero alpha.
pub fn apply_mask(canvas: &RgbImage, mask: &GrayImage) -> Result<RgbaImage> {
    anyhow::ensure!(
        canvas.dimensions() == mask.dimensions(),
        "Mask is {}x{} but canvas is {}x{}",
        mask.width(),
        mask.height(),
        canvas.width(),
        canvas.height()
    );

    Ok(ImageBuffer::from_fn(canvas.width(), canvas.height(), |x, y| {
        let [r, g, b] = canvas.get_pixel(x, y).0;
        let [alpha] = mask.get_pixel(x, y).0;
        Rgba([r, g, b, alpha])
    }))
}
