use crate::animation::ease::Ease;
use crate::animation::timeline::{Props, Tween};
use crate::scroll::trigger::Toggle;

/// Which way a reveal's playhead is moving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    /// Not moving.
    #[default]
    Paused,
    /// Playing towards the end.
    Forward,
    /// Playing back towards the start.
    Reverse,
}

/// Fade-up reveal driven by `play none none reverse` toggle actions: plays on `Enter`,
/// reverses on `LeaveBack`, ignores everything else.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealState {
    tween: Tween,
    playhead: f64,
    direction: PlayDirection,
}

impl RevealState {
    /// Reveal for `target` with the page's standard fade-up tween.
    pub fn new(target: impl Into<String>) -> Self {
        let tween = Tween::new(
            target,
            Props {
                opacity: 0.0,
                y: 60.0,
                ..Props::IDENTITY
            },
            Props::IDENTITY,
            1.0,
            Ease::Power3Out,
        );
        Self {
            tween,
            playhead: 0.0,
            direction: PlayDirection::Paused,
        }
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// Playhead position in seconds.
    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    pub fn on_toggle(&mut self, toggle: Toggle) {
        match toggle {
            Toggle::Enter => self.direction = PlayDirection::Forward,
            Toggle::LeaveBack => self.direction = PlayDirection::Reverse,
            Toggle::Leave | Toggle::EnterBack => {}
        }
    }

    /// Advance the playhead by `dt` seconds, pausing at either end.
    pub fn tick(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        match self.direction {
            PlayDirection::Paused => {}
            PlayDirection::Forward => {
                self.playhead = (self.playhead + dt).min(self.tween.duration);
                if self.playhead >= self.tween.duration {
                    self.direction = PlayDirection::Paused;
                }
            }
            PlayDirection::Reverse => {
                self.playhead = (self.playhead - dt).max(0.0);
                if self.playhead <= 0.0 {
                    self.direction = PlayDirection::Paused;
                }
            }
        }
    }

    /// Current props of the revealed element.
    pub fn props(&self) -> Props {
        self.tween.sample(self.playhead)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/reveal.rs"]
mod tests;
