use super::theme::Theme;

/// Theme-indexed colors for the reference scene, as 0xRRGGBB sRGB values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: u32,
    pub secondary: u32,
    pub accent: u32,
    pub particles: u32,
    pub ambient_light: u32,
    pub directional_light: u32,
    pub back_light: u32,
}

pub const LIGHT_PALETTE: Palette = Palette {
    primary: 0x4a9eff,
    secondary: 0x00d4aa,
    accent: 0xff6b6b,
    particles: 0x4a9eff,
    ambient_light: 0xffffff,
    directional_light: 0xffffff,
    back_light: 0x4a9eff,
};

pub const DARK_PALETTE: Palette = Palette {
    primary: 0x6bb6ff,
    secondary: 0x00ffcc,
    accent: 0xff8888,
    particles: 0x6bb6ff,
    ambient_light: 0xffffff,
    directional_light: 0xffffff,
    back_light: 0x6bb6ff,
};

pub fn palette_for(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT_PALETTE,
        Theme::Dark => &DARK_PALETTE,
    }
}

/// Decode a hex color into linear RGB for a sRGB render target.
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
