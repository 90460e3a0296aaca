use crate::{
    assets::frame_set::DecodedFrame,
    foundation::core::Rect,
    foundation::error::AniResult,
};

/// A read-back of a surface's backing store.
///
/// Pixels are **premultiplied alpha**; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in backing-store pixels.
    pub width: u32,
    /// Height in backing-store pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight-alpha RGBA8, suitable for PNG encoding.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Image scaling quality, the `imageSmoothingEnabled` / `imageSmoothingQuality` pair.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Smoothing {
    /// Nearest-neighbour sampling.
    Disabled,
    /// Cheapest filtered sampling.
    Low,
    /// Bilinear sampling.
    Medium,
    /// Best available filter.
    #[default]
    High,
}

impl Smoothing {
    pub(crate) fn quality(self) -> vello_cpu::peniko::ImageQuality {
        use vello_cpu::peniko::ImageQuality;
        match self {
            Self::Disabled => ImageQuality::Low,
            Self::Low | Self::Medium => ImageQuality::Medium,
            Self::High => ImageQuality::High,
        }
    }
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, cleared pixels are filled with this straight-alpha RGBA8 color instead of
    /// transparent black.
    pub clear_rgba: Option<[u8; 4]>,
}

/// A 2D raster drawing target.
///
/// All rectangles are in logical units. `configure` allocates the backing store and sets the
/// logical-to-backing scale (the device pixel ratio); it also resets drawing state, so scales
/// never accumulate across resizes.
pub trait RenderSurface {
    /// Allocate a `backing_width x backing_height` store and set the logical scale.
    fn configure(&mut self, backing_width: u32, backing_height: u32, scale: f64) -> AniResult<()>;

    /// Current backing-store size, `(0, 0)` before the first `configure`.
    fn backing_size(&self) -> (u32, u32);

    /// Clear the pixels covered by `rect`.
    fn clear_rect(&mut self, rect: Rect);

    /// Select the filter used by subsequent `draw_image` calls.
    fn set_smoothing(&mut self, smoothing: Smoothing);

    /// Draw `frame` scaled into `dest`, source-over.
    fn draw_image(&mut self, frame: &DecodedFrame, dest: Rect) -> AniResult<()>;

    /// Read back the backing store.
    fn snapshot(&self) -> FrameRGBA;
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
