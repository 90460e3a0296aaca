use crate::foundation::core::{Point, Rect, Size, effective_dpr};
use crate::foundation::error::{AniError, AniResult};

/// Render-target dimensions for one container size.
///
/// Drawing math uses `display` (logical units); allocation uses the backing size, which is
/// `display * dpr` truncated to whole pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    /// Logical size of the rendered image. Covers the container on both axes.
    pub display: Size,
    /// Backing-store width in device pixels.
    pub backing_width: u32,
    /// Backing-store height in device pixels.
    pub backing_height: u32,
    /// Device pixel ratio the backing store was sized for.
    pub dpr: f64,
    /// Where the display rectangle sits relative to the container when centered. Components are
    /// `<= 0`: the overflowing axis is cropped evenly on both sides.
    pub crop_origin: Point,
}

impl SurfaceGeometry {
    /// Logical rectangle frames are drawn into.
    pub fn display_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.display)
    }

    /// `(backing_width, backing_height)`.
    pub fn backing_size(&self) -> (u32, u32) {
        (self.backing_width, self.backing_height)
    }
}

/// Cover-fit `first_frame` over `container`.
///
/// When the container is relatively wider than the image, width is fit and the image overflows
/// vertically; otherwise height is fit and it overflows horizontally. The aspect ratio of the
/// result always equals the frame's.
pub fn compute_geometry(container: Size, first_frame: Size, dpr: f64) -> AniResult<SurfaceGeometry> {
    if !is_positive(container) {
        return Err(AniError::validation(format!(
            "container size must be positive, got {}x{}",
            container.width, container.height
        )));
    }
    if !is_positive(first_frame) {
        return Err(AniError::validation(format!(
            "frame size must be positive, got {}x{}",
            first_frame.width, first_frame.height
        )));
    }

    let image_aspect = first_frame.width / first_frame.height;
    let container_aspect = container.width / container.height;

    let display = if container_aspect > image_aspect {
        Size::new(container.width, container.width / image_aspect)
    } else {
        Size::new(container.height * image_aspect, container.height)
    };

    let dpr = effective_dpr(dpr);
    let backing_width = backing_dim(display.width * dpr)?;
    let backing_height = backing_dim(display.height * dpr)?;

    Ok(SurfaceGeometry {
        display,
        backing_width,
        backing_height,
        dpr,
        crop_origin: Point::new(
            (container.width - display.width) / 2.0,
            (container.height - display.height) / 2.0,
        ),
    })
}

fn is_positive(s: Size) -> bool {
    s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0
}

fn backing_dim(v: f64) -> AniResult<u32> {
    if !v.is_finite() || v > f64::from(u32::MAX) {
        return Err(AniError::validation(format!(
            "backing store dimension {v} is out of range"
        )));
    }
    Ok((v.trunc() as u32).max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/geometry.rs"]
mod tests;
