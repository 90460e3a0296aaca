use std::sync::Arc;

use anyhow::Context;

use crate::{
    assets::frame_set::DecodedFrame,
    foundation::error::{AniError, AniResult},
};

/// Decode encoded image bytes into a premultiplied frame ready for drawing.
pub fn decode_frame(bytes: &[u8]) -> AniResult<DecodedFrame> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(AniError::validation("decoded image has zero size"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    let pixmap = pixmap_from_premul_bytes(&rgba8_premul, width, height)?;

    Ok(DecodedFrame::new(width, height, Arc::new(pixmap)))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> AniResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AniError::validation(format!("frame width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AniError::validation(format!("frame height {height} exceeds u16")))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(AniError::validation("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
