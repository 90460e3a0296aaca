use crate::animation::ease::Ease;
use crate::foundation::error::{AniError, AniResult};
use crate::scroll::trigger::Toggle;

/// Seconds a stat takes to count up.
pub const COUNT_UP_SECS: f64 = 2.0;

/// A statistic like `"500+"` that counts up from zero once it scrolls into view.
#[derive(Clone, Debug, PartialEq)]
pub struct StatCounter {
    label: String,
    target: u64,
    percent: bool,
    started_at: Option<f64>,
}

impl StatCounter {
    /// Parse the label's digits as the target. A `%` anywhere makes it a percentage, otherwise
    /// the count is rendered with a `+`.
    pub fn parse(label: &str) -> AniResult<Self> {
        let digits: String = label.chars().filter(char::is_ascii_digit).collect();
        let target = digits.parse::<u64>().map_err(|_| {
            AniError::validation(format!("stat label '{label}' has no numeric value"))
        })?;
        Ok(Self {
            label: label.trim().to_owned(),
            target,
            percent: label.contains('%'),
            started_at: None,
        })
    }

    /// Parsed target value.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// `true` once the count-up has begun.
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Feed a trigger toggle. Only the first `Enter` does anything.
    pub fn on_toggle(&mut self, toggle: Toggle, now: f64) {
        if toggle == Toggle::Enter && self.started_at.is_none() {
            tracing::debug!(label = %self.label, now, "stat count-up started");
            self.started_at = Some(now);
        }
    }

    /// Text shown at time `now`; the untouched label until started.
    pub fn text_at(&self, now: f64) -> String {
        let Some(start) = self.started_at else {
            return self.label.clone();
        };
        let eased = Ease::Power2Out.apply((now - start) / COUNT_UP_SECS);
        let value = (self.target as f64 * eased).ceil() as u64;
        let suffix = if self.percent { '%' } else { '+' };
        format!("{value}{suffix}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/counter.rs"]
mod tests;
