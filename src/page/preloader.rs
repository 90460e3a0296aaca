//! Loading screen: a counter that creeps to 100 while frames decode, a minimum hold once they
//! have, a fade, then the page content and its intro timeline.

use crate::animation::timeline::{Props, Timeline, hero_intro};
use crate::config::PreloaderConfig;
use crate::foundation::error::LoadError;

/// Circumference of the progress ring, in SVG user units.
pub const RING_CIRCUMFERENCE: f64 = 283.0;

const MAX_CATCH_UP_TICKS: u64 = 10_000;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub(crate) fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Percentage counter shown on the loading screen. Cosmetic: it is not tied to decode progress.
#[derive(Clone, Debug)]
pub struct LoadingCounter {
    count: f64,
    started_at: f64,
    ticks_run: u64,
    tick_secs: f64,
    max_step: f64,
    rng: Rng64,
}

impl LoadingCounter {
    pub fn new(cfg: &PreloaderConfig, started_at: f64) -> Self {
        Self {
            count: 0.0,
            started_at,
            ticks_run: 0,
            tick_secs: cfg.counter_tick_secs,
            max_step: cfg.counter_max_step,
            rng: Rng64::new(cfg.seed),
        }
    }

    /// Run every tick due by `now`. Stops at 100.
    ///
    /// Tick `n` falls at `started_at + n * tick_secs`. A long gap catches up at most 10 000
    /// ticks; the rest are dropped.
    pub fn advance_to(&mut self, now: f64) {
        if self.tick_secs.is_nan() || self.tick_secs <= 0.0 {
            return;
        }
        let elapsed = now - self.started_at;
        if elapsed.is_nan() || elapsed < self.tick_secs {
            return;
        }
        // `as` saturates, so an infinite quotient becomes u64::MAX.
        let due = (elapsed / self.tick_secs).floor() as u64;
        if due <= self.ticks_run {
            return;
        }
        let pending = (due - self.ticks_run).min(MAX_CATCH_UP_TICKS);
        for _ in 0..pending {
            if self.is_done() {
                break;
            }
            self.count = (self.count + self.rng.next_f64_01() * self.max_step).min(100.0);
        }
        self.ticks_run = due;
    }

    /// Exact count in `[0, 100]`.
    pub fn count(&self) -> f64 {
        self.count
    }

    /// Whole number displayed.
    pub fn display(&self) -> u32 {
        self.count.floor() as u32
    }

    /// Stroke dash offset of the ring: full circumference at 0, none at 100.
    pub fn dash_offset(&self) -> f64 {
        RING_CIRCUMFERENCE - (self.count / 100.0) * RING_CIRCUMFERENCE
    }

    pub fn is_done(&self) -> bool {
        self.count >= 100.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreloaderPhase {
    /// Frames are decoding, or failed to.
    Loading,
    /// Every frame decoded; holding the loading screen for its minimum time.
    Loaded,
    /// The loading screen is fading out.
    FadingOut,
    /// The loading screen is gone.
    Content,
}

#[derive(Clone, Debug)]
pub struct Preloader {
    cfg: PreloaderConfig,
    phase: PreloaderPhase,
    loaded_at: Option<f64>,
    failed: bool,
    counter: LoadingCounter,
    intro: Timeline,
}

impl Preloader {
    pub fn new(cfg: PreloaderConfig, now: f64) -> Self {
        let counter = LoadingCounter::new(&cfg, now);
        let intro = hero_intro(cfg.intro_delay_secs);
        Self {
            cfg,
            phase: PreloaderPhase::Loading,
            loaded_at: None,
            failed: false,
            counter,
            intro,
        }
    }

    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    pub fn counter(&self) -> &LoadingCounter {
        &self.counter
    }

    /// `true` after [`Preloader::load_failed`].
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Every frame decoded; start the minimum hold.
    pub fn images_loaded(&mut self, now: f64) {
        if self.failed || self.phase != PreloaderPhase::Loading {
            return;
        }
        tracing::info!(now, "frames loaded; holding loading screen");
        self.loaded_at = Some(now);
        self.phase = PreloaderPhase::Loaded;
    }

    /// The preload barrier failed. The loading screen stays up; nothing retries.
    pub fn load_failed(&mut self, err: &LoadError) {
        tracing::error!(index = err.index, url = %err.url, reason = %err.reason, "failed to load images");
        self.failed = true;
        self.phase = PreloaderPhase::Loading;
        self.loaded_at = None;
    }

    /// Time the content appears, once known.
    pub fn content_at(&self) -> Option<f64> {
        self.loaded_at
            .map(|t| t + self.cfg.min_hold_secs + self.cfg.fade_secs)
    }

    /// Advance the counter and the phase to `now`.
    pub fn tick(&mut self, now: f64) {
        if self.phase != PreloaderPhase::Content {
            self.counter.advance_to(now);
        }
        let Some(loaded_at) = self.loaded_at else {
            return;
        };
        let fade_at = loaded_at + self.cfg.min_hold_secs;
        let content_at = fade_at + self.cfg.fade_secs;
        let next = if now >= content_at {
            PreloaderPhase::Content
        } else if now >= fade_at {
            PreloaderPhase::FadingOut
        } else {
            PreloaderPhase::Loaded
        };
        if next != self.phase {
            tracing::debug!(from = ?self.phase, to = ?next, now, "preloader phase");
            self.phase = next;
        }
    }

    /// Opacity of the loading screen at `now`.
    pub fn overlay_opacity(&self, now: f64) -> f64 {
        match self.phase {
            PreloaderPhase::Loading | PreloaderPhase::Loaded => 1.0,
            PreloaderPhase::Content => 0.0,
            PreloaderPhase::FadingOut => match self.loaded_at {
                Some(t) if self.cfg.fade_secs > 0.0 => {
                    let k = (now - t - self.cfg.min_hold_secs) / self.cfg.fade_secs;
                    1.0 - k.clamp(0.0, 1.0)
                }
                _ => 0.0,
            },
        }
    }

    /// The intro timeline, started when the content appears.
    pub fn intro(&self) -> &Timeline {
        &self.intro
    }

    /// Intro props at `now`; `None` until the content has appeared.
    pub fn intro_props(&self, now: f64) -> Option<Vec<(&str, Props)>> {
        if self.phase != PreloaderPhase::Content {
            return None;
        }
        let started = self.content_at()?;
        Some(self.intro.sample(now - started))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/preloader.rs"]
mod tests;
