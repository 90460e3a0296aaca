//! Eased "smooth" scrolling layered over a [`ScrollDriver`].
//!
//! Input deltas move a target position; each animation frame eases the rendered position toward
//! it and forwards the result (and the frame clock) to the driver.

use crate::animation::ease::Ease;
use crate::scroll::driver::ScrollDriver;

/// Smooth-scroll tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmoothScrollOptions {
    /// Seconds an animated scroll takes.
    pub duration: f64,
    pub easing: Ease,
    pub smooth_wheel: bool,
    pub wheel_multiplier: f64,
    /// Touch input scrolls natively unless this is set.
    pub smooth_touch: bool,
    pub touch_multiplier: f64,
    /// Honour a reduced-motion preference: every scroll jumps.
    pub reduced_motion: bool,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            duration: 1.2,
            easing: Ease::Lenis,
            smooth_wheel: true,
            wheel_multiplier: 1.0,
            smooth_touch: false,
            touch_multiplier: 2.0,
            reduced_motion: false,
        }
    }
}

/// Per-call overrides for [`SmoothScroll::scroll_to`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollToOptions {
    /// Added to the destination, e.g. `-80.0` to stop below a fixed header.
    pub offset: f64,
    pub duration: Option<f64>,
    pub easing: Option<Ease>,
    pub immediate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Animation {
    from: f64,
    to: f64,
    duration: f64,
    easing: Ease,
    started_ms: Option<f64>,
}

#[derive(Debug)]
pub struct SmoothScroll {
    driver: ScrollDriver,
    opts: SmoothScrollOptions,
    animated: f64,
    target: f64,
    limit: f64,
    animation: Option<Animation>,
    last_raf_ms: Option<f64>,
}

impl SmoothScroll {
    pub fn new(driver: ScrollDriver, opts: SmoothScrollOptions) -> Self {
        let y = driver.scroll_y();
        Self {
            driver,
            opts,
            animated: y,
            target: y,
            limit: f64::INFINITY,
            animation: None,
            last_raf_ms: None,
        }
    }

    /// Largest reachable scroll position.
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.target = self.target.min(self.limit);
    }

    /// Position currently rendered.
    pub fn animated_scroll(&self) -> f64 {
        self.animated
    }

    /// Position being animated towards.
    pub fn target_scroll(&self) -> f64 {
        self.target
    }

    pub fn is_scrolling(&self) -> bool {
        self.animation.is_some()
    }

    pub fn driver(&self) -> &ScrollDriver {
        &self.driver
    }

    /// Mouse-wheel input.
    pub fn on_wheel(&mut self, delta_y: f64) {
        let delta = delta_y * self.opts.wheel_multiplier;
        self.nudge(delta, self.opts.smooth_wheel);
    }

    /// Touch-drag input.
    pub fn on_touch(&mut self, delta_y: f64) {
        if self.opts.smooth_touch {
            self.nudge(delta_y * self.opts.touch_multiplier, true);
        } else {
            self.nudge(delta_y, false);
        }
    }

    fn nudge(&mut self, delta: f64, smooth: bool) {
        if !delta.is_finite() {
            return;
        }
        let base = if self.animation.is_some() { self.target } else { self.animated };
        let dest = base + delta;
        self.scroll_to(
            dest,
            ScrollToOptions {
                immediate: !smooth,
                ..ScrollToOptions::default()
            },
        );
    }

    /// Scroll to `target + opts.offset`, clamped to `[0, limit]`.
    pub fn scroll_to(&mut self, target: f64, opts: ScrollToOptions) {
        if !target.is_finite() {
            tracing::warn!(target, "ignoring non-finite scroll target");
            return;
        }
        let dest = (target + opts.offset).clamp(0.0, self.limit);
        self.target = dest;

        if opts.immediate || self.opts.reduced_motion {
            self.animation = None;
            self.animated = dest;
            self.driver.scroll_to(dest);
            return;
        }
        self.animation = Some(Animation {
            from: self.animated,
            to: dest,
            duration: opts.duration.unwrap_or(self.opts.duration).max(0.0),
            easing: opts.easing.unwrap_or(self.opts.easing),
            started_ms: self.last_raf_ms,
        });
    }

    /// Advance one animation frame at `now_ms` and forward the frame to the driver.
    pub fn raf(&mut self, now_ms: f64) {
        if !now_ms.is_finite() {
            return;
        }
        self.last_raf_ms = Some(now_ms);
        if let Some(anim) = self.animation.as_mut() {
            let start = *anim.started_ms.get_or_insert(now_ms);
            let t = if anim.duration <= 0.0 {
                1.0
            } else {
                (now_ms - start) / 1000.0 / anim.duration
            };
            if t >= 1.0 {
                self.animated = anim.to;
                self.animation = None;
            } else {
                self.animated = anim.from + (anim.to - anim.from) * anim.easing.apply(t);
            }
            self.driver.scroll_to(self.animated);
        }
        self.driver.tick(now_ms / 1000.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smooth.rs"]
mod tests;
