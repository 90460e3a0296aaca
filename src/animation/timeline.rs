use crate::animation::ease::{Ease, lerp};

/// Animatable visual properties of one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Props {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal offset in logical pixels.
    pub x: f64,
    /// Vertical offset in logical pixels.
    pub y: f64,
    /// Uniform scale.
    pub scale: f64,
}

impl Props {
    /// Fully visible, untransformed.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Fully transparent, untransformed.
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        ..Self::IDENTITY
    };

    /// Component-wise interpolation.
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            opacity: lerp(self.opacity, to.opacity, t),
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            scale: lerp(self.scale, to.scale, t),
        }
    }
}

impl Default for Props {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One `from -> to` animation of a named target.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    /// Target selector, e.g. `.hero-line-1`.
    pub target: String,
    /// Starting props.
    pub from: Props,
    /// Final props.
    pub to: Props,
    /// Duration in seconds.
    pub duration: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl Tween {
    /// Build a tween.
    pub fn new(target: impl Into<String>, from: Props, to: Props, duration: f64, ease: Ease) -> Self {
        Self {
            target: target.into(),
            from,
            to,
            duration: duration.max(0.0),
            ease,
        }
    }

    /// Props `local` seconds after the tween's own start.
    pub fn sample(&self, local: f64) -> Props {
        let t = if self.duration <= 0.0 {
            if local >= 0.0 { 1.0 } else { 0.0 }
        } else {
            local / self.duration
        };
        self.from.lerp(self.to, self.ease.apply(t))
    }
}

/// Where a tween is placed on its timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the current end of the timeline.
    Sequential,
    /// Relative to the current end: `Offset(-0.6)` is `"-=0.6"`.
    Offset(f64),
    /// At an absolute time.
    At(f64),
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    start: f64,
    tween: Tween,
}

/// A sequence of tweens with relative placement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    delay: f64,
    end: f64,
    entries: Vec<Entry>,
}

impl Timeline {
    /// Empty timeline that starts playing `delay` seconds after it is started.
    pub fn new(delay: f64) -> Self {
        Self {
            delay: delay.max(0.0),
            end: 0.0,
            entries: Vec::new(),
        }
    }

    /// Append `tween` at `position`.
    pub fn push(&mut self, tween: Tween, position: Position) -> &mut Self {
        let start = match position {
            Position::Sequential => self.end,
            Position::Offset(d) => (self.end + d).max(0.0),
            Position::At(t) => t.max(0.0),
        };
        self.end = self.end.max(start + tween.duration);
        self.entries.push(Entry { start, tween });
        self
    }

    /// Start delay.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Length of the tweens, excluding the delay.
    pub fn duration(&self) -> f64 {
        self.end
    }

    /// Start time of each tween, excluding the delay, in insertion order.
    pub fn start_times(&self) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .map(|e| (e.tween.target.as_str(), e.start))
            .collect()
    }

    /// Props of every tween `elapsed` seconds after the timeline was started.
    pub fn sample(&self, elapsed: f64) -> Vec<(&str, Props)> {
        let t = elapsed - self.delay;
        self.entries
            .iter()
            .map(|e| (e.tween.target.as_str(), e.tween.sample(t - e.start)))
            .collect()
    }

    /// `true` once every tween has finished.
    pub fn is_complete(&self, elapsed: f64) -> bool {
        elapsed >= self.delay + self.end
    }
}

/// The hero's text intro, played once the loading screen is gone.
pub fn hero_intro(delay: f64) -> Timeline {
    let mut tl = Timeline::new(delay);
    tl.push(
        Tween::new(
            ".hero-line-1",
            Props {
                opacity: 0.0,
                x: -150.0,
                scale: 0.9,
                ..Props::IDENTITY
            },
            Props::IDENTITY,
            1.0,
            Ease::Power4Out,
        ),
        Position::Sequential,
    )
    .push(
        Tween::new(
            ".hero-line-2",
            Props {
                opacity: 0.0,
                x: 150.0,
                scale: 0.9,
                ..Props::IDENTITY
            },
            Props::IDENTITY,
            1.0,
            Ease::Power4Out,
        ),
        Position::Offset(-0.6),
    )
    .push(
        Tween::new(
            ".hero-line-3",
            Props::HIDDEN,
            Props::IDENTITY,
            0.5,
            Ease::Power2Out,
        ),
        Position::Offset(-0.3),
    )
    .push(
        Tween::new(
            ".hero-subtitle",
            Props {
                opacity: 0.0,
                y: 40.0,
                ..Props::IDENTITY
            },
            Props::IDENTITY,
            0.8,
            Ease::Power3Out,
        ),
        Position::Offset(-0.8),
    )
    .push(
        Tween::new(
            ".hero-cta",
            Props {
                opacity: 0.0,
                y: 20.0,
                scale: 0.95,
                ..Props::IDENTITY
            },
            Props::IDENTITY,
            0.6,
            Ease::BackOut(1.2),
        ),
        Position::Offset(-0.4),
    );
    tl
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
