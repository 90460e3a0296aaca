use crate::{
    assets::frame_set::FrameSet,
    foundation::core::{FrameIndex, Viewport},
    foundation::error::{AniError, AniResult},
    render::surface::{RenderSurface, Smoothing},
    scrub::{
        geometry::{SurfaceGeometry, compute_geometry},
        playback::PlaybackState,
    },
};

/// Counters for scrubber activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrubStats {
    /// Completed redraws.
    pub redraws: u64,
    /// Geometry recomputations triggered by resize.
    pub resizes: u64,
    /// Progress or resize events that arrived after teardown and were ignored.
    pub ignored_after_teardown: u64,
}

/// Renders the frame of a preloaded sequence that matches the current scroll progress.
///
/// The scrubber exclusively owns its surface and playback state. After [`FrameScrubber::teardown`]
/// every entry point is a no-op, so late callbacks are harmless.
pub struct FrameScrubber<S: RenderSurface> {
    frames: FrameSet,
    surface: Option<S>,
    playback: PlaybackState,
    geometry: SurfaceGeometry,
    viewport: Viewport,
    smoothing: Smoothing,
    stats: ScrubStats,
}

impl<S: RenderSurface> std::fmt::Debug for FrameScrubber<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScrubber")
            .field("frames", &self.frames.len())
            .field("attached", &self.surface.is_some())
            .field("playback", &self.playback)
            .field("geometry", &self.geometry)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<S: RenderSurface> FrameScrubber<S> {
    /// Size `surface` for `viewport` and draw frame 0.
    pub fn new(
        frames: FrameSet,
        mut surface: S,
        viewport: Viewport,
        smoothing: Smoothing,
    ) -> AniResult<Self> {
        let geometry = compute_geometry(viewport.size(), frames.first().size(), viewport.dpr)?;
        surface.configure(geometry.backing_width, geometry.backing_height, geometry.dpr)?;
        let playback = PlaybackState::new(0.0, frames.len());

        let mut out = Self {
            frames,
            surface: Some(surface),
            playback,
            geometry,
            viewport,
            smoothing,
            stats: ScrubStats::default(),
        };
        out.redraw()?;
        Ok(out)
    }

    /// Select the frame for `progress` and redraw.
    ///
    /// Called once per scroll tick; does no IO and no per-call allocation beyond the surface's
    /// own rasterizer state.
    pub fn on_progress(&mut self, progress: f64) -> AniResult<()> {
        if self.surface.is_none() {
            self.stats.ignored_after_teardown += 1;
            return Ok(());
        }
        self.playback = PlaybackState::new(progress, self.frames.len());
        self.redraw()
    }

    /// Record `progress`, redrawing only when it selects a different frame. Returns whether a
    /// redraw happened.
    pub fn sync_progress(&mut self, progress: f64) -> AniResult<bool> {
        if self.surface.is_none() {
            self.stats.ignored_after_teardown += 1;
            return Ok(false);
        }
        let next = PlaybackState::new(progress, self.frames.len());
        let changed = next.frame_index() != self.playback.frame_index();
        self.playback = next;
        if changed {
            self.redraw()?;
        }
        Ok(changed)
    }

    /// Recompute geometry for `viewport` and redraw the current frame once.
    #[tracing::instrument(level = "debug", skip(self), fields(frame = self.playback.frame_index().0))]
    pub fn on_resize(&mut self, viewport: Viewport) -> AniResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            self.stats.ignored_after_teardown += 1;
            return Ok(());
        };
        let geometry =
            compute_geometry(viewport.size(), self.frames.first().size(), viewport.dpr)?;
        surface.configure(geometry.backing_width, geometry.backing_height, geometry.dpr)?;
        self.geometry = geometry;
        self.viewport = viewport;
        self.stats.resizes += 1;
        self.redraw()
    }

    /// Clear the surface and draw the current frame at display size.
    ///
    /// Idempotent: the clear always precedes the draw.
    pub fn redraw(&mut self) -> AniResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let index = self.playback.frame_index();
        let frame = self.frames.get(index).ok_or_else(|| {
            AniError::render(format!(
                "frame index {} out of range for {} frames",
                index.0,
                self.frames.len()
            ))
        })?;

        let rect = self.geometry.display_rect();
        surface.clear_rect(rect);
        surface.set_smoothing(self.smoothing);
        surface.draw_image(frame, rect)?;
        self.stats.redraws += 1;
        Ok(())
    }

    /// Release the surface. Later calls draw nothing.
    pub fn teardown(&mut self) -> Option<S> {
        let surface = self.surface.take();
        if surface.is_some() {
            tracing::debug!(redraws = self.stats.redraws, "frame scrubber torn down");
        }
        surface
    }

    /// `true` after [`FrameScrubber::teardown`].
    pub fn is_torn_down(&self) -> bool {
        self.surface.is_none()
    }

    /// Current playback state.
    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Currently selected frame.
    pub fn frame_index(&self) -> FrameIndex {
        self.playback.frame_index()
    }

    /// Current geometry.
    pub fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    /// Viewport the geometry was computed for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The frame sequence.
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    /// The surface, while attached.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Activity counters.
    pub fn stats(&self) -> ScrubStats {
        self.stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/scrubber.rs"]
mod tests;
