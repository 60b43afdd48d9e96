use image::{ImageBuffer, Rgb, RgbImage};
use std::io::Write;
use tempfile::NamedTempFile;
use xkailive_icon_gen::wordmark::{
    draw_wordmark, fit_font_size, load_first_font, measure_text, Overlay, OverlayMetrics,
    TextColor, FONT_CANDIDATES, WORDMARK,
};

fn purple_canvas(size: u32) -> RgbImage {
    ImageBuffer::from_pixel(size, size, Rgb([128, 51, 230]))
}

#[test]
fn test_metrics_for_full_size_icon() {
    let metrics = OverlayMetrics::for_size(1024);

    assert_eq!(metrics.padding, 164);
    assert_eq!(metrics.max_text_width, 696);
    assert_eq!(metrics.shadow_offset, 8);
    assert_eq!(metrics.min_font_size, 10);
    assert_eq!(metrics.max_font_size, 307);
    assert_eq!(metrics.font_size_range(), 10..=307);
}

#[test]
fn test_metrics_shadow_has_a_floor() {
    let metrics = OverlayMetrics::for_size(128);

    assert_eq!(metrics.padding, 20);
    assert_eq!(metrics.max_text_width, 88);
    assert_eq!(metrics.shadow_offset, 3);
}

#[test]
fn test_fit_picks_largest_size_that_fits() {
    // Monospace-like: 8 glyphs, each 0.6em wide
    let best = fit_font_size(696, 10..=307, |px| Ok(px * 48 / 10));
    assert_eq!(best, 145);
}

#[test]
fn test_fit_uses_whole_range_when_everything_fits() {
    let best = fit_font_size(696, 10..=307, |px| Ok(px));
    assert_eq!(best, 307);
}

#[test]
fn test_fit_treats_measure_errors_as_too_large() {
    let best = fit_font_size(696, 10..=307, |px| {
        if px > 100 {
            anyhow::bail!("cannot measure at {px}px");
        }
        Ok(px * 2)
    });
    assert_eq!(best, 100);
}

#[test]
fn test_fit_falls_back_to_minimum() {
    let best = fit_font_size(5, 10..=307, |px| Ok(px * 10));
    assert_eq!(best, 10);
}

#[test]
fn test_no_font_candidates_skips_overlay() {
    let mut canvas = purple_canvas(256);
    let before = canvas.clone();
    let none: [&str; 0] = [];

    let overlay = draw_wordmark(&mut canvas, WORDMARK, TextColor::White, &none);

    assert_eq!(overlay, Overlay::NoFont);
    assert_eq!(canvas, before);
}

#[test]
fn test_missing_and_invalid_fonts_skip_overlay() {
    let mut garbage = NamedTempFile::new().expect("temp file");
    garbage.write_all(b"definitely not a font").expect("write temp file");

    let candidates = [
        garbage.path().to_path_buf(),
        "/nonexistent/fonts/Mono.ttf".into(),
    ];
    assert!(load_first_font(&candidates).is_none());

    let mut canvas = purple_canvas(256);
    let before = canvas.clone();
    let overlay = draw_wordmark(&mut canvas, WORDMARK, TextColor::Black, &candidates);

    assert_eq!(overlay, Overlay::NoFont);
    assert_eq!(canvas, before);
}

#[test]
fn test_small_canvas_gets_no_text() {
    let mut canvas = purple_canvas(64);
    let before = canvas.clone();

    let overlay = draw_wordmark(&mut canvas, WORDMARK, TextColor::White, FONT_CANDIDATES);

    assert_eq!(overlay, Overlay::TooSmall);
    assert_eq!(canvas, before);
}

#[test]
fn test_text_colors_are_inverse() {
    assert_eq!(TextColor::White.fill(), TextColor::Black.shadow());
    assert_eq!(TextColor::Black.fill(), TextColor::White.shadow());
    assert_ne!(TextColor::White.fill(), TextColor::White.shadow());
}

/// Exercises real text layout when the host has one of the candidate fonts.
#[test]
fn test_host_font_fits_wordmark() {
    let Some(loaded) = load_first_font(FONT_CANDIDATES) else {
        println!("No candidate font on this host, skipping");
        return;
    };

    let metrics = OverlayMetrics::for_size(1024);
    let best = fit_font_size(metrics.max_text_width, metrics.font_size_range(), |px| {
        measure_text(&loaded.font, px, WORDMARK).map(|b| b.width())
    });

    let width = measure_text(&loaded.font, best, WORDMARK).expect("measure").width();
    assert!(width <= 696, "{best}px is {width}px wide");
    if best < 307 {
        let next = measure_text(&loaded.font, best + 1, WORDMARK).expect("measure").width();
        assert!(next > 696, "{}px would still fit", best + 1);
    }

    let mut canvas = purple_canvas(1024);
    let before = canvas.clone();
    let overlay = draw_wordmark(&mut canvas, WORDMARK, TextColor::White, FONT_CANDIDATES);

    assert_eq!(
        overlay,
        Overlay::Drawn {
            font: loaded.path.clone(),
            font_size: best
        }
    );
    assert_ne!(canvas, before);
    // Text stays in the lower-left band
    assert_eq!(canvas.get_pixel(512, 20), before.get_pixel(512, 20));
    assert_eq!(canvas.get_pixel(1000, 1000), before.get_pixel(1000, 1000));

    // Changed-pixel box: body ink anchored at (padding, size - height - padding),
    // shadow shifted right and down by the shadow offset
    let bounds = measure_text(&loaded.font, best, WORDMARK).expect("measure");
    let (left, top, right, bottom) = changed_box(&before, &canvas).expect("text was drawn");

    let padding = i64::from(metrics.padding);
    let offset = i64::from(metrics.shadow_offset);
    let origin_y = 1024 - i64::from(bounds.height()) - padding;

    let ink_left = padding + i64::from(bounds.min_x);
    let ink_right = padding + i64::from(bounds.max_x);
    let ink_top = origin_y + i64::from(bounds.min_y);
    let ink_bottom = origin_y + i64::from(bounds.max_y);

    assert!((ink_left..=ink_left + 2).contains(&left), "left edge {left}, ink at {ink_left}");
    assert!((ink_top - 1..=ink_top + 2).contains(&top), "top edge {top}, ink at {ink_top}");
    assert!(
        right > ink_right && right <= ink_right + offset,
        "right edge {right}, ink ends at {ink_right}, shadow offset {offset}"
    );
    assert!(
        bottom > ink_bottom && bottom <= ink_bottom + offset + 1,
        "bottom edge {bottom}, ink ends at {ink_bottom}, shadow offset {offset}"
    );

    // Shadow is a partial-opacity blend: darker than the background, never pure black
    let background = before.get_pixel(0, 0).0;
    let shadow = TextColor::White.shadow().0;
    assert!(canvas.pixels().all(|p| p.0 != shadow));
    assert!(canvas.pixels().any(|p| {
        p.0 != background && p.0.iter().zip(background).all(|(c, b)| *c < b)
    }));
}

/// Unmeasurable text degrades to no overlay instead of failing.
#[test]
fn test_unmeasurable_text_skips_overlay() {
    if load_first_font(FONT_CANDIDATES).is_none() {
        println!("No candidate font on this host, skipping");
        return;
    }

    let mut canvas = purple_canvas(1024);
    let before = canvas.clone();

    let overlay = draw_wordmark(&mut canvas, "    ", TextColor::White, FONT_CANDIDATES);

    assert_eq!(overlay, Overlay::MeasureFailed);
    assert_eq!(canvas, before);
}

/// Inclusive-exclusive `(left, top, right, bottom)` of pixels that differ.
fn changed_box(before: &RgbImage, after: &RgbImage) -> Option<(i64, i64, i64, i64)> {
    before
        .enumerate_pixels()
        .filter(|(x, y, pixel)| after.get_pixel(*x, *y) != *pixel)
        .fold(None::<(i64, i64, i64, i64)>, |acc, (x, y, _)| {
            let (x, y) = (i64::from(x), i64::from(y));
            Some(match acc {
                None => (x, y, x + 1, y + 1),
                Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x + 1), b.max(y + 1)),
            })
        })
}
