//! The fixed set of icon appearances.

use crate::{gradient::ColorRamp, wordmark::TextColor};

/// Edge length of every generated icon.
pub const ICON_SIZE: u32 = 1024;

/// One named appearance of the app icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    /// Short name used in console output and error reports
    pub name: &'static str,
    pub file_name: &'static str,
    pub ramp: ColorRamp,
    pub text_color: TextColor,
    /// Asset-catalog `luminosity` appearance, `None` for the default slot
    pub luminosity: Option<&'static str>,
}

pub const STANDARD: Variant = Variant {
    name: "Any Appearance",
    file_name: "AppIcon_1024x1024.png",
    ramp: ColorRamp::new([
        [128, 51, 230], // deep purple
        [230, 77, 153], // pink
        [255, 128, 77], // orange
        [255, 179, 51], // gold
    ]),
    text_color: TextColor::White,
    luminosity: None,
};

pub const DARK: Variant = Variant {
    name: "Dark",
    file_name: "AppIcon_1024x1024_Dark.png",
    ramp: ColorRamp::new([
        [64, 25, 115],
        [115, 38, 77],
        [128, 64, 38],
        [128, 90, 25],
    ]),
    text_color: TextColor::White,
    luminosity: Some("dark"),
};

/// Neutral grays; the system applies the user's tint on top.
pub const TINTED: Variant = Variant {
    name: "Tinted",
    file_name: "AppIcon_1024x1024_Tinted.png",
    ramp: ColorRamp::new([
        [200, 200, 200],
        [180, 180, 180],
        [160, 160, 160],
        [140, 140, 140],
    ]),
    text_color: TextColor::Black,
    luminosity: Some("tinted"),
};

pub const VARIANTS: [Variant; 3] = [STANDARD, DARK, TINTED];
