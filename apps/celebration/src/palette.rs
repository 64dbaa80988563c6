//! Colors used by the particle shapes, as 0xRRGGBB.

pub type Rgb = [f32; 3];

pub const GOLD: u32 = 0xFFD700;
pub const LEMON_CHIFFON: u32 = 0xFFFACD;
pub const WHITE: u32 = 0xFFFFFF;

pub const TREE_DARK: u32 = 0x0F5E2D;
pub const TREE_LIGHT: u32 = 0x3FC973;
pub const ORNAMENT_RED: u32 = 0xFF0000;
pub const ORNAMENT_BLUE: u32 = 0x00BFFF;

pub const GALAXY_CENTER: u32 = 0xFFAA00;
pub const GALAXY_EDGE: u32 = 0xAA00FF;
pub const GALAXY_STARS: [u32; 5] = [0xFF0000, 0xFFFF00, 0x00FFFF, 0xFF00FF, 0xFFFFFF];

/// Convert a packed 0xRRGGBB value to normalized rgb.
pub fn rgb(hex: u32) -> Rgb {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// A buffer of `count` copies of one color.
pub fn solid(hex: u32, count: usize) -> Vec<Rgb> {
    vec![rgb(hex); count]
}
