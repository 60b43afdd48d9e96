use crate::{
    contents_json::{ContentsFile, ImageEntry},
    gradient::build_canvas,
    mask::{apply_mask, corner_radius, rounded_mask},
    variants::{Variant, ICON_SIZE, VARIANTS},
    wordmark::{draw_wordmark, Overlay, FONT_CANDIDATES, WORDMARK},
};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, ImageFormat, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::error;

/// Output directory, relative to the working directory.
pub const OUTPUT_DIR: &str = "AppIcon_Generated";

/// Fail early when the imaging library was built without PNG encoding.
pub fn ensure_png_support() -> Result<()> {
    if !ImageFormat::Png.can_write() {
        anyhow::bail!(
            "PNG encoding is not available in this build.\n\
             Rebuild with the `png` feature of the `image` crate enabled:\n  \
             image = {{ version = \"0.24\", features = [\"png\"] }}"
        );
    }
    Ok(())
}

#[derive(Debug)]
pub struct RenderedIcon {
    pub image: RgbaImage,
    pub overlay: Overlay,
}

/// Render one variant: gradient, wordmark, then the rounded mask.
pub fn render_icon<P: AsRef<Path>>(
    size: u32,
    variant: &Variant,
    fonts: &[P],
) -> Result<RenderedIcon> {
    let mut canvas = build_canvas(size, &variant.ramp);
    let overlay = draw_wordmark(&mut canvas, WORDMARK, variant.text_color, fonts);

    let mask = rounded_mask(size, corner_radius(size));
    let image = apply_mask(&canvas, &mask)
        .with_context(|| format!("Failed to mask {} icon", variant.name))?;

    Ok(RenderedIcon { image, overlay })
}

pub fn generate_icons(out_dir: &Path) -> Result<()> {
    generate_icons_with_fonts(out_dir, FONT_CANDIDATES)
}

/// Generate every variant into `out_dir`, trying `fonts` in order for the wordmark.
///
/// Variants are independent: a failed variant is reported and the rest are
/// still written. The run fails at the end if any variant failed.
pub fn generate_icons_with_fonts<P: AsRef<Path>>(out_dir: &Path, fonts: &[P]) -> Result<()> {
    println!("Generating XKAILive app icons...");

    create_dir_all(out_dir).context("Can't create output directory")?;

    let mut contents = ContentsFile::new("xkailive-icon-gen".to_string());
    let mut failed = Vec::new();

    for variant in &VARIANTS {
        println!("Generating {ICON_SIZE}x{ICON_SIZE} icon ({})...", variant.name);

        match generate_variant(out_dir, variant, fonts) {
            Ok(path) => {
                println!("  ✓ Generated {}", path.display());

                let mut entry =
                    ImageEntry::ios_universal(variant.file_name.to_string(), ICON_SIZE);
                if let Some(luminosity) = variant.luminosity {
                    entry = entry.with_luminosity(luminosity);
                }
                contents.add_image(entry);
            }
            Err(err) => {
                error!(variant = variant.name, "Failed to generate icon: {err:#}");
                failed.push(variant.name);
            }
        }
    }

    // Rewritten even when empty: it lists exactly the icons written by this run
    let path = contents.write_to_dir(out_dir)?;
    println!("  ✓ Generated {}", path.display());

    if !failed.is_empty() {
        anyhow::bail!(
            "Failed to generate {} of {} icons: {}",
            failed.len(),
            VARIANTS.len(),
            failed.join(", ")
        );
    }

    println!("\n✓ Done! All icons saved to {}/", out_dir.display());
    println!("\nNext steps:");
    println!("  Copy {} into Assets.xcassets as AppIcon.appiconset, or", out_dir.display());
    println!("  drag each PNG into the matching slot of Assets.xcassets > AppIcon:");
    for variant in &VARIANTS {
        println!("    {} -> '{}'", variant.file_name, variant.name);
    }

    Ok(())
}

fn generate_variant<P: AsRef<Path>>(
    out_dir: &Path,
    variant: &Variant,
    fonts: &[P],
) -> Result<PathBuf> {
    let icon = render_icon(ICON_SIZE, variant, fonts)?;

    match &icon.overlay {
        Overlay::Drawn { font, font_size } => {
            println!("  Wordmark at {font_size}px using {}", font.display())
        }
        Overlay::TooSmall => {}
        Overlay::NoFont | Overlay::MeasureFailed => println!("  Wordmark skipped"),
    }

    let output_path = out_dir.join(variant.file_name);
    save_png(&icon.image, &output_path)?;
    Ok(output_path)
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(image.as_raw(), &mut out_file, image.width(), image.height())
        .context("Failed to write PNG")?;
    out_file.flush()?;
    Ok(())
}

// Encode RGBA data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgba8)?;
    Ok(())
}
