use crate::foundation::error::{AniError, AniResult};

pub use kurbo::{Affine, Point, Rect, Size};

/// 0-based index into a frame sequence.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub usize);

/// Host viewport in logical (CSS) pixels plus the display's device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Physical pixels per logical pixel.
    pub dpr: f64,
}

impl Viewport {
    /// Create a validated viewport.
    ///
    /// The device pixel ratio is not validated here; see [`Viewport::effective_dpr`].
    pub fn new(width: f64, height: f64, dpr: f64) -> AniResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(AniError::validation(format!(
                "viewport must have positive finite size, got {width}x{height}"
            )));
        }
        Ok(Self { width, height, dpr })
    }

    /// Logical size.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Device pixel ratio with the host fallback applied: anything non-finite or `<= 0` is `1`.
    pub fn effective_dpr(self) -> f64 {
        effective_dpr(self.dpr)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            dpr: 1.0,
        }
    }
}

pub(crate) fn effective_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// Clamp a progress value into `[0, 1]`. NaN maps to `0`.
pub fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
