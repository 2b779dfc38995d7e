use std::collections::HashMap;
use std::sync::OnceLock;

use palette::{FromColor, Lch, Srgb};

use crate::engine::tile::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Rgb {
    color: Srgb<u8>,
}

impl Rgb {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Srgb::new(r, g, b),
        }
    }

    /// Convert a color given in LCh space (lightness 0-100, chroma, hue in degrees).
    pub(crate) fn from_lch(lightness: f32, chroma: f32, hue: f32) -> Self {
        let lch: Lch = Lch::new(lightness, chroma, hue);
        let rgb: Srgb = Srgb::from_color(lch);
        Self {
            color: rgb.into_format::<u8>(),
        }
    }

    #[inline(always)]
    pub(crate) fn r(&self) -> u8 {
        self.color.red
    }

    #[inline(always)]
    pub(crate) fn g(&self) -> u8 {
        self.color.green
    }

    #[inline(always)]
    pub(crate) fn b(&self) -> u8 {
        self.color.blue
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(f: Rgb) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: f.r(),
            g: f.g(),
            b: f.b(),
        }
    }
}

/// Number of distinct hues tiles cycle through.
const TILE_HUES: u32 = 11;
const TILE_BG_HUE_OFFSET: f32 = 28.0;
const LARGEST_EXPONENT: u32 = 17;

pub(crate) struct TileColors {
    pub(crate) background: Rgb,
    pub(crate) foreground: Rgb,
}

static TILE_COLORS: OnceLock<HashMap<Value, (Rgb, Rgb)>> = OnceLock::new();

fn tile_colors() -> &'static HashMap<Value, (Rgb, Rgb)> {
    TILE_COLORS.get_or_init(|| {
        let fg_hue = TILE_BG_HUE_OFFSET + 180.0;
        (1..=LARGEST_EXPONENT)
            .map(|i| {
                let hue = TILE_BG_HUE_OFFSET + (i % TILE_HUES) as f32 * 360.0 / TILE_HUES as f32;
                (
                    2u64.pow(i),
                    (
                        Rgb::from_lch(80.0, 90.0, hue),
                        Rgb::from_lch(20.0, 50.0, fg_hue),
                    ),
                )
            })
            .collect()
    })
}

/// Colors for a tile of the given value. Values without an entry get white on dark red.
pub(crate) fn colors_from_value(value: Value) -> TileColors {
    let (background, foreground) = tile_colors()
        .get(&value)
        .copied()
        .unwrap_or((Rgb::new(255, 255, 255), Rgb::new(90, 0, 0)));
    TileColors {
        background,
        foreground,
    }
}

pub(crate) fn board_background() -> Rgb {
    Rgb::from_lch(30.0, 10.0, 40.0)
}

pub(crate) fn board_foreground() -> Rgb {
    Rgb::from_lch(75.0, 30.0, 70.0)
}

pub(crate) fn empty_slot() -> Rgb {
    Rgb::from_lch(42.0, 8.0, 40.0)
}
