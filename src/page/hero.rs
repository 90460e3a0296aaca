//! The pinned, scroll-scrubbed hero: wires a [`FrameScrubber`] to a [`ScrollDriver`].

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::assets::frame_set::FrameSet;
use crate::assets::loader::{FrameSource, LoadOpts, load_all};
use crate::assets::naming::sequence_urls;
use crate::config::HeroConfig;
use crate::foundation::error::{AniError, AniResult, LoadError};
use crate::page::preloader::Preloader;
use crate::render::cpu::CpuSurface;
use crate::render::surface::{RenderSettings, RenderSurface};
use crate::scroll::driver::ScrollDriver;
use crate::scroll::events::Subscription;
use crate::scroll::trigger::{Anchor, EndSpec, TriggerSpec};
use crate::scrub::scrubber::FrameScrubber;

/// Entry points for the hero section.
#[derive(Debug)]
pub struct HeroSequence;

impl HeroSequence {
    /// Pinned trigger over a one-viewport-tall hero at `element_top`: from `top top` for
    /// `span_viewports` viewport heights, scrubbed with the configured lag.
    pub fn trigger_spec(cfg: &HeroConfig, element_top: f64, viewport_height: f64) -> TriggerSpec {
        TriggerSpec::new(element_top, viewport_height)
            .start(Anchor::TOP_TOP)
            .end(EndSpec::Relative(cfg.pin.span_viewports))
            .pinned()
            .scrub(cfg.pin.scrub_lag_secs)
    }

    /// CPU surface configured from `cfg.render`.
    pub fn cpu_surface(cfg: &HeroConfig) -> CpuSurface {
        CpuSurface::new(RenderSettings {
            clear_rgba: cfg.render.clear_rgba,
        })
    }

    /// Run the preload barrier, reporting the outcome to `preloader`.
    ///
    /// Returns the frames on success. On failure the error is logged, the preloader stays in its
    /// loading phase, and `None` is returned; nothing is retried.
    pub fn preload(
        cfg: &HeroConfig,
        source: &dyn FrameSource,
        preloader: &mut Preloader,
        loaded_at: f64,
    ) -> Option<FrameSet> {
        let urls = sequence_urls(&cfg.sequence);
        let opts = LoadOpts {
            threads: cfg.loader.threads,
        };
        match load_all(&urls, source, opts) {
            Ok(frames) => {
                preloader.images_loaded(loaded_at);
                Some(frames)
            }
            Err(AniError::Load(err)) => {
                preloader.load_failed(&err);
                None
            }
            Err(other) => {
                let first = urls.first().map(String::as_str).unwrap_or_default();
                preloader.load_failed(&LoadError::new(0, first, other.to_string()));
                None
            }
        }
    }

    /// Draw the first frame, then follow `driver`'s scroll progress and viewport.
    #[tracing::instrument(level = "debug", skip_all, fields(frames = frames.len(), element_top = element_top))]
    pub fn mount<S: RenderSurface + 'static>(
        driver: &ScrollDriver,
        frames: FrameSet,
        surface: S,
        cfg: &HeroConfig,
        element_top: f64,
    ) -> AniResult<MountedHero<S>> {
        let viewport = driver.viewport();
        let scrubber = Rc::new(RefCell::new(FrameScrubber::new(
            frames,
            surface,
            viewport,
            cfg.render.smoothing,
        )?));

        let weak: Weak<RefCell<FrameScrubber<S>>> = Rc::downgrade(&scrubber);
        let resize = driver.on_resize(move |vp| {
            let Some(scrubber) = weak.upgrade() else {
                return;
            };
            let Ok(mut scrubber) = scrubber.try_borrow_mut() else {
                tracing::warn!("hero busy; resize dropped");
                return;
            };
            if let Err(e) = scrubber.on_resize(*vp) {
                tracing::warn!(error = %e, "hero resize failed");
            }
        });

        let weak: Weak<RefCell<FrameScrubber<S>>> = Rc::downgrade(&scrubber);
        let progress = driver.add_trigger(
            Self::trigger_spec(cfg, element_top, viewport.height),
            move |update| {
                let Some(scrubber) = weak.upgrade() else {
                    return;
                };
                let Ok(mut scrubber) = scrubber.try_borrow_mut() else {
                    tracing::warn!("hero busy; progress dropped");
                    return;
                };
                if let Err(e) = scrubber.sync_progress(update.scrubbed) {
                    tracing::warn!(error = %e, progress = update.scrubbed, "hero redraw failed");
                }
            },
        );

        Ok(MountedHero {
            scrubber,
            progress: Some(progress),
            resize: Some(resize),
        })
    }
}

/// A mounted hero. Dropping it unmounts.
pub struct MountedHero<S: RenderSurface + 'static> {
    scrubber: Rc<RefCell<FrameScrubber<S>>>,
    progress: Option<Subscription>,
    resize: Option<Subscription>,
}

impl<S: RenderSurface + 'static> std::fmt::Debug for MountedHero<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedHero")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl<S: RenderSurface + 'static> MountedHero<S> {
    pub fn is_mounted(&self) -> bool {
        self.progress.is_some()
    }

    /// Borrow the scrubber. Do not hold the guard across driver calls.
    pub fn scrubber(&self) -> Ref<'_, FrameScrubber<S>> {
        self.scrubber.borrow()
    }

    /// Detach from the driver and release the surface.
    pub fn unmount(mut self) -> Option<S> {
        self.detach()
    }

    fn detach(&mut self) -> Option<S> {
        if let Some(sub) = self.progress.take() {
            sub.cancel();
        }
        if let Some(sub) = self.resize.take() {
            sub.cancel();
        }
        match self.scrubber.try_borrow_mut() {
            Ok(mut s) => s.teardown(),
            Err(_) => {
                tracing::warn!("hero unmounted while borrowed; surface not released");
                None
            }
        }
    }
}

impl<S: RenderSurface + 'static> Drop for MountedHero<S> {
    fn drop(&mut self) {
        if self.is_mounted() {
            self.detach();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/hero.rs"]
mod tests;
