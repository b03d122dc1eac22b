//! Glow texture model

use crate::backend::TextureFormat;

/// Side length of the glow texture in pixels.
pub const TEXTURE_SIZE: u32 = 128;
/// Center column/row of the glow texture.
pub const HALF_TEXTURE_SIZE: u32 = TEXTURE_SIZE / 2;

/// Square RGBA8 bitmap whose alpha encodes a sharp line core plus a broad halo.
///
/// RGB is always white; only alpha carries the falloff. Texture coordinates
/// emitted by the tessellator address this bitmap in pixel units before
/// normalization, so the center column (`HALF_TEXTURE_SIZE`) is the line core
/// and the edges are the faint halo.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowTexture {
    pub size: u32,
    pub format: TextureFormat,
    pub data: Vec<u8>,
}

impl GlowTexture {
    /// Generate the glow texture.
    pub fn generate() -> Self {
        let size = TEXTURE_SIZE;
        let mut data = vec![0xff_u8; (size * size * 4) as usize];

        for y in 0..size {
            for x in 0..size {
                let index = ((x + y * size) * 4 + 3) as usize;
                data[index] = glow_alpha(x, y);
            }
        }

        Self {
            size,
            format: TextureFormat::Rgba8Unorm,
            data,
        }
    }

    /// Alpha of the pixel at column `x`, row `y`.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.data[((x + y * self.size) * 4 + 3) as usize]
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.size * self.format.bytes_per_pixel()
    }
}

/// Radial falloff: `12^(-15d) * 246/256 + 2^(-5d) * 10/256`, with `d` the
/// distance from the center normalized by half the texture size and clamped
/// to 1. The very center is forced to full alpha.
pub fn glow_alpha(x: u32, y: u32) -> u8 {
    let half = HALF_TEXTURE_SIZE as f64;
    let dx = x as f64 - half;
    let dy = y as f64 - half;
    let distance = ((dx * dx + dy * dy).sqrt() / half).min(1.0);

    if distance < 0.01 {
        return 0xff;
    }

    let line = 12.0_f64.powf(-15.0 * distance) * 246.0 / 256.0;
    let glow = 2.0_f64.powf(-5.0 * distance) * 10.0 / 256.0;
    let value = ((line + glow) * 256.0).round();
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_dimensions() {
        let texture = GlowTexture::generate();
        assert_eq!(texture.size, 128);
        assert_eq!(texture.data.len(), 128 * 128 * 4);
        assert_eq!(texture.bytes_per_row(), 512);
    }

    #[test]
    fn test_rgb_is_white() {
        let texture = GlowTexture::generate();
        assert!(texture
            .data
            .chunks_exact(4)
            .all(|px| px[0] == 0xff && px[1] == 0xff && px[2] == 0xff));
    }

    #[test]
    fn test_center_is_opaque() {
        let texture = GlowTexture::generate();
        assert_eq!(texture.alpha_at(HALF_TEXTURE_SIZE, HALF_TEXTURE_SIZE), 0xff);
    }

    #[test]
    fn test_falloff_is_monotonic_along_row() {
        let texture = GlowTexture::generate();
        let row = HALF_TEXTURE_SIZE;
        for x in HALF_TEXTURE_SIZE..TEXTURE_SIZE - 1 {
            assert!(texture.alpha_at(x, row) >= texture.alpha_at(x + 1, row));
        }
    }

    #[test]
    fn test_halo_floor_at_edge() {
        // d clamps to 1: line term ~0, glow term 2^-5 * 10 = 0.3125 -> rounds to 0
        assert_eq!(glow_alpha(0, 0), 0);
        // halfway out the halo still contributes
        let mid = glow_alpha(HALF_TEXTURE_SIZE + 32, HALF_TEXTURE_SIZE);
        assert_eq!(mid, 2);
    }

    #[test]
    fn test_symmetric() {
        for d in 1..HALF_TEXTURE_SIZE {
            assert_eq!(
                glow_alpha(HALF_TEXTURE_SIZE + d, HALF_TEXTURE_SIZE),
                glow_alpha(HALF_TEXTURE_SIZE, HALF_TEXTURE_SIZE + d)
            );
        }
    }
}
