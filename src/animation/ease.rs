/// Easing curves used by the page's tweens and smooth scrolling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// `none`.
    Linear,
    /// `power1.out`: `1 - (1 - t)^2`.
    Power1Out,
    /// `power2.out`: `1 - (1 - t)^3`.
    Power2Out,
    /// `power3.out`: `1 - (1 - t)^4`.
    Power3Out,
    /// `power4.out`: `1 - (1 - t)^5`.
    Power4Out,
    /// `back.out(overshoot)`: overshoots past 1 before settling.
    BackOut(f64),
    /// The smooth-scroll curve `min(1, 1.001 - 2^(-10t))`.
    ///
    /// Starts at `0.001`, not `0`.
    Lenis,
}

impl Ease {
    /// Evaluate at `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::Power4Out => 1.0 - (1.0 - t).powi(5),
            Self::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
            Self::Lenis => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }
}

/// Linear interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
