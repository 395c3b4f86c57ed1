use rand::Rng;
use crate::math::Rgb;

/// Ornament palette, dominant light pink with gold and white accents.
///
/// Pastel pink is listed twice, which doubles its chance of being picked.
pub const PALETTE: [u32; 6] = [
    0xFFD1DC, // pastel pink
    0xFFD1DC, // pastel pink
    0xFFC0CB, // pink
    0xFFB7C5, // sakura pink
    0xFFD700, // gold
    0xFFFFFF, // white
];

/// Uniform pick over the palette entries.
///
/// The index is drawn as `u32` so a seed picks the same colours on wasm32
/// and 64-bit hosts.
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let index = rng.gen_range(0..PALETTE.len() as u32) as usize;
    Rgb::from_u32(PALETTE[index])
}
