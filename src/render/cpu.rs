use crate::{
    assets::frame_set::DecodedFrame,
    foundation::core::{Affine, Rect},
    foundation::error::{AniError, AniResult},
    render::surface::{FrameRGBA, RenderSettings, RenderSurface, Smoothing},
};

/// Counters for what a [`CpuSurface`] has done, mainly for tests and diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    /// `configure` calls that succeeded.
    pub configures: u64,
    /// `clear_rect` calls on a configured surface.
    pub clears: u64,
    /// `draw_image` calls that rasterized.
    pub draws: u64,
}

/// CPU raster surface powered by `vello_cpu`.
///
/// Each `draw_image` is rasterized into a scratch pixmap and composited source-over onto the
/// backing store, so the surface behaves like a canvas: pixels persist until cleared.
pub struct CpuSurface {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    target: Option<vello_cpu::Pixmap>,
    scratch: Option<vello_cpu::Pixmap>,
    scale: f64,
    smoothing: Smoothing,
    stats: SurfaceStats,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("settings", &self.settings)
            .field("backing_size", &self.backing_size())
            .field("scale", &self.scale)
            .field("smoothing", &self.smoothing)
            .field("stats", &self.stats)
            .finish()
    }
}

impl CpuSurface {
    /// Create an unconfigured surface.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ctx: None,
            target: None,
            scratch: None,
            scale: 1.0,
            smoothing: Smoothing::Low,
            stats: SurfaceStats::default(),
        }
    }

    /// Activity counters.
    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    /// Current logical-to-backing scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current smoothing mode.
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }
}

impl RenderSurface for CpuSurface {
    fn configure(&mut self, backing_width: u32, backing_height: u32, scale: f64) -> AniResult<()> {
        let w = to_u16_dim("width", backing_width)?;
        let h = to_u16_dim("height", backing_height)?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AniError::render(format!(
                "surface scale must be positive, got {scale}"
            )));
        }

        let same_size = self
            .target
            .as_ref()
            .is_some_and(|p| p.width() == w && p.height() == h);
        if same_size {
            if let Some(target) = self.target.as_mut() {
                // Resizing a canvas wipes it, even to the same size.
                target.data_as_u8_slice_mut().fill(0);
            }
        } else {
            self.target = Some(vello_cpu::Pixmap::new(w, h));
            self.scratch = Some(vello_cpu::Pixmap::new(w, h));
            self.ctx = Some(vello_cpu::RenderContext::new(w, h));
        }

        self.scale = scale;
        self.smoothing = Smoothing::Low;
        self.stats.configures = self.stats.configures.saturating_add(1);
        tracing::trace!(backing_width, backing_height, scale, "surface configured");
        Ok(())
    }

    fn backing_size(&self) -> (u32, u32) {
        self.target
            .as_ref()
            .map(|p| (u32::from(p.width()), u32::from(p.height())))
            .unwrap_or((0, 0))
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some(target) = self.target.as_mut() else {
            return;
        };
        let width = u32::from(target.width());
        let height = u32::from(target.height());
        let px = rect.scale_from_origin(self.scale).abs();
        let x0 = clamp_px(px.x0.floor(), width);
        let y0 = clamp_px(px.y0.floor(), height);
        let x1 = clamp_px(px.x1.ceil(), width);
        let y1 = clamp_px(px.y1.ceil(), height);

        let fill = self.settings.clear_rgba.map(premul_rgba8).unwrap_or([0; 4]);
        let data = target.data_as_u8_slice_mut();
        let stride = width as usize * 4;
        for y in y0..y1 {
            let row = &mut data[y as usize * stride..(y as usize + 1) * stride];
            for px in row[x0 as usize * 4..x1 as usize * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&fill);
            }
        }
        self.stats.clears = self.stats.clears.saturating_add(1);
    }

    fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.smoothing = smoothing;
    }

    fn draw_image(&mut self, frame: &DecodedFrame, dest: Rect) -> AniResult<()> {
        let Self {
            ctx,
            target,
            scratch,
            scale,
            smoothing,
            stats,
            ..
        } = self;
        let (Some(ctx), Some(target), Some(scratch)) =
            (ctx.as_mut(), target.as_mut(), scratch.as_mut())
        else {
            return Err(AniError::render("draw on an unconfigured surface"));
        };
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }

        let src = frame.size();
        let tr = Affine::scale(*scale)
            * Affine::translate((dest.x0, dest.y0))
            * Affine::scale_non_uniform(dest.width() / src.width, dest.height() / src.height);

        ctx.reset();
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(frame.paint(smoothing.quality()));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, src.width, src.height));
        ctx.flush();

        scratch.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(scratch);
        premul_over_in_place(target.data_as_u8_slice_mut(), scratch.data_as_u8_slice())?;

        stats.draws = stats.draws.saturating_add(1);
        Ok(())
    }

    fn snapshot(&self) -> FrameRGBA {
        let (width, height) = self.backing_size();
        FrameRGBA {
            width,
            height,
            data: self
                .target
                .as_ref()
                .map(|p| p.data_as_u8_slice().to_vec())
                .unwrap_or_default(),
            premultiplied: true,
        }
    }
}

fn to_u16_dim(name: &str, v: u32) -> AniResult<u16> {
    if v == 0 {
        return Err(AniError::render(format!("surface {name} must be >= 1")));
    }
    v.try_into()
        .map_err(|_| AniError::render(format!("surface {name} {v} exceeds u16")))
}

fn clamp_px(v: f64, max: u32) -> u32 {
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= f64::from(max) {
        max
    } else {
        v as u32
    }
}

fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> AniResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(AniError::render(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3] as u16;
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - sa;
        d[3] = (sa as u8).saturating_add(mul_div255_u8(d[3] as u16, inv));
        for c in 0..3 {
            let dc = mul_div255_u8(d[c] as u16, inv);
            d[c] = s[c].saturating_add(dc);
        }
    }
    Ok(())
}

fn mul_div255_u8(x: u16, y: u16) -> u8 {
    let p = u32::from(x) * u32::from(y);
    ((p + 128 + ((p + 128) >> 8)) >> 8) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
