//! Wordmark overlay.
//!
//! Draws the app name in the bottom-left corner of a canvas, sized to the
//! largest font that fits the padded width, with a soft drop shadow. The
//! overlay is decoration: every failure degrades to a smaller font or to no
//! text at all and is reported through [`Overlay`], never as an error.

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::{
    ops::RangeInclusive,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

pub const WORDMARK: &str = "XKAILive";

/// Canvases smaller than this get no text.
pub const MIN_OVERLAY_SIZE: u32 = 128;
pub const PADDING_RATIO: f64 = 0.16;
pub const MAX_FONT_RATIO: f64 = 0.3;
pub const MIN_FONT_SIZE: u32 = 10;
pub const SHADOW_RATIO: f64 = 0.008;
pub const MIN_SHADOW_OFFSET: u32 = 3;
pub const SHADOW_ALPHA: u8 = 150;

/// Monospace faces tried in order; the first one that parses wins.
pub const FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Courier New Bold.ttf",
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
    "/System/Library/Fonts/Supplemental/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "/System/Library/Fonts/Supplemental/Andale Mono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    /// White text with a dark shadow, for saturated or dark backgrounds.
    White,
    /// Black text with a light shadow, for light backgrounds.
    Black,
}

impl TextColor {
    pub fn fill(self) -> Rgb<u8> {
        match self {
            TextColor::White => Rgb([255, 255, 255]),
            TextColor::Black => Rgb([0, 0, 0]),
        }
    }

    pub fn shadow(self) -> Rgb<u8> {
        match self {
            TextColor::White => Rgb([0, 0, 0]),
            TextColor::Black => Rgb([255, 255, 255]),
        }
    }
}

/// What the overlay ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Drawn { font: PathBuf, font_size: u32 },
    TooSmall,
    NoFont,
    /// The chosen size could not be measured for placement.
    MeasureFailed,
}

/// Size-derived placement parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayMetrics {
    pub padding: u32,
    pub max_text_width: u32,
    pub shadow_offset: u32,
    pub min_font_size: u32,
    pub max_font_size: u32,
}

impl OverlayMetrics {
    pub fn for_size(size: u32) -> Self {
        let size_f = f64::from(size);
        let padding = (size_f * PADDING_RATIO).round() as u32;
        let shadow_offset = ((size_f * SHADOW_RATIO).round() as u32).max(MIN_SHADOW_OFFSET);
        let max_font = (size_f * MAX_FONT_RATIO).floor() as u32;

        Self {
            padding,
            max_text_width: size.saturating_sub(padding * 2),
            shadow_offset,
            min_font_size: MIN_FONT_SIZE,
            max_font_size: max_font,
        }
    }

    pub fn font_size_range(&self) -> RangeInclusive<u32> {
        self.min_font_size..=self.max_font_size
    }
}

/// Ink bounds of a laid-out string, relative to its ascender-line origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }
}

pub struct LoadedFont {
    pub path: PathBuf,
    pub font: Font<'static>,
}

/// Load the first candidate that can be read and parsed.
pub fn load_first_font<P: AsRef<Path>>(candidates: &[P]) -> Option<LoadedFont> {
    candidates.iter().find_map(|candidate| {
        let path = candidate.as_ref();
        match load_font(path) {
            Ok(font) => Some(LoadedFont {
                path: path.to_path_buf(),
                font,
            }),
            Err(err) => {
                debug!(path = %path.display(), "Skipping font candidate: {err:#}");
                None
            }
        }
    })
}

fn load_font(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path).context("Failed to read font file")?;
    Font::try_from_vec(data).context("Not a usable TrueType font")
}

/// Scale that renders `font` at an em size of `px` pixels.
fn em_scale(font: &Font, px: u32) -> Result<Scale> {
    let units_per_em = f32::from(font.units_per_em());
    anyhow::ensure!(units_per_em > 0.0, "Font reports zero units per em");

    let v_metrics = font.v_metrics_unscaled();
    let height = v_metrics.ascent - v_metrics.descent;
    Ok(Scale::uniform(px as f32 * height / units_per_em))
}

fn layout(
    font: &Font<'static>,
    px: u32,
    text: &str,
    x: f32,
    y: f32,
) -> Result<Vec<PositionedGlyph<'static>>> {
    let scale = em_scale(font, px)?;
    let ascent = font.v_metrics(scale).ascent;
    Ok(font.layout(text, scale, point(x, y + ascent)).collect())
}

/// Measure `text` at `px` with the origin on the ascender line.
pub fn measure_text(font: &Font<'static>, px: u32, text: &str) -> Result<TextBounds> {
    let glyphs = layout(font, px, text, 0.0, 0.0)?;

    glyphs
        .iter()
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .fold(None, |acc: Option<TextBounds>, bb| {
            Some(match acc {
                None => TextBounds {
                    min_x: bb.min.x,
                    min_y: bb.min.y,
                    max_x: bb.max.x,
                    max_y: bb.max.y,
                },
                Some(b) => TextBounds {
                    min_x: b.min_x.min(bb.min.x),
                    min_y: b.min_y.min(bb.min.y),
                    max_x: b.max_x.max(bb.max.x),
                    max_y: b.max_y.max(bb.max.y),
                },
            })
        })
        .with_context(|| format!("No visible glyphs for {text:?} at {px}px"))
}

/// Binary search the largest size in `sizes` whose measured width fits in
/// `max_width`. A size that cannot be measured counts as too large. Falls
/// back to the lower bound when nothing fits.
pub fn fit_font_size<F>(max_width: u32, sizes: RangeInclusive<u32>, mut measure: F) -> u32
where
    F: FnMut(u32) -> Result<u32>,
{
    let mut best = *sizes.start();
    let mut low = i64::from(*sizes.start());
    let mut high = i64::from(*sizes.end());

    while low <= high {
        let mid = (low + high) / 2;
        match measure(mid as u32) {
            Ok(width) if width <= max_width => {
                best = mid as u32;
                low = mid + 1;
            }
            Ok(_) => high = mid - 1,
            Err(err) => {
                debug!(font_size = mid, "Measurement failed, treating as too large: {err:#}");
                high = mid - 1;
            }
        }
    }

    best
}

/// Alpha-blend `glyphs` onto `canvas` in `color`, scaling coverage by `opacity`.
fn blit(canvas: &mut RgbImage, glyphs: &[PositionedGlyph], color: Rgb<u8>, opacity: f32) {
    let (width, height) = canvas.dimensions();

    for glyph in glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x + gx as i32;
            let y = bb.min.y + gy as i32;
            if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                return;
            }

            let alpha = (coverage * opacity).clamp(0.0, 1.0);
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            for (dst, src) in pixel.0.iter_mut().zip(color.0) {
                let blended = f32::from(*dst) * (1.0 - alpha) + f32::from(src) * alpha;
                *dst = blended.round().clamp(0.0, 255.0) as u8;
            }
        });
    }
}

/// Draw `text` bottom-left on `canvas` with a drop shadow.
pub fn draw_wordmark<P: AsRef<Path>>(
    canvas: &mut RgbImage,
    text: &str,
    color: TextColor,
    candidates: &[P],
) -> Overlay {
    let size = canvas.width().min(canvas.height());
    if size < MIN_OVERLAY_SIZE {
        return Overlay::TooSmall;
    }

    let Some(loaded) = load_first_font(candidates) else {
        warn!("No usable font found, skipping wordmark");
        return Overlay::NoFont;
    };
    let font = &loaded.font;

    let metrics = OverlayMetrics::for_size(size);
    let font_size = fit_font_size(metrics.max_text_width, metrics.font_size_range(), |px| {
        measure_text(font, px, text).map(|bounds| bounds.width())
    });

    let placed = measure_text(font, font_size, text).and_then(|bounds| {
        let x = metrics.padding as f32;
        let y = size as f32 - bounds.height() as f32 - metrics.padding as f32;
        let offset = metrics.shadow_offset as f32;

        let shadow = layout(font, font_size, text, x + offset, y + offset)?;
        let body = layout(font, font_size, text, x, y)?;
        Ok((shadow, body))
    });

    match placed {
        Ok((shadow, body)) => {
            blit(canvas, &shadow, color.shadow(), f32::from(SHADOW_ALPHA) / 255.0);
            blit(canvas, &body, color.fill(), 1.0);
            debug!(font = %loaded.path.display(), font_size, "Drew wordmark");
            Overlay::Drawn {
                font: loaded.path.clone(),
                font_size,
            }
        }
        Err(err) => {
            warn!(font_size, "Skipping wordmark: {err:#}");
            Overlay::MeasureFailed
        }
    }
}
