//! JSON configuration for the hero sequence.
//!
//! Every field has a default matching the production page, so an empty object (`{}`) is a
//! valid configuration.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{AniError, AniResult};
use crate::render::surface::Smoothing;

/// Largest frame count representable by the zero-padded 3-digit naming convention.
pub const MAX_FRAME_COUNT: usize = 1000;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Where the frame images live and how they are named.
    pub sequence: SequenceConfig,
    /// Scroll pinning of the hero region.
    pub pin: PinConfig,
    /// Preload barrier settings.
    pub loader: LoaderConfig,
    /// Loading screen timings.
    pub preloader: PreloaderConfig,
    /// Drawing settings.
    pub render: RenderConfig,
}

/// Naming of the frame images: `<base_path>/<prefix>_<index:03>.<extension>`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceConfig {
    /// Directory-like URL prefix.
    pub base_path: String,
    /// File stem prefix. The shipped assets use the literal `protfolio`.
    pub prefix: String,
    /// File extension without the dot.
    pub extension: String,
    /// Number of frames `N`.
    pub frame_count: usize,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            base_path: "/hero".to_string(),
            prefix: "protfolio".to_string(),
            extension: "jpg".to_string(),
            frame_count: 80,
        }
    }
}

/// Pinned scroll span of the hero.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PinConfig {
    /// Length of the pinned span in viewport heights (`end: "+=300%"`).
    pub span_viewports: f64,
    /// Seconds the delivered progress takes to catch up with the scroll position (`scrub: 1`).
    pub scrub_lag_secs: f64,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            span_viewports: 3.0,
            scrub_lag_secs: 1.0,
        }
    }
}

/// Preload barrier settings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Decoder threads. `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// Loading screen timings, in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreloaderConfig {
    /// Minimum time the loading screen stays up after every frame decoded.
    pub min_hold_secs: f64,
    /// Fade-out duration.
    pub fade_secs: f64,
    /// Delay between the content appearing and the intro timeline starting.
    pub intro_delay_secs: f64,
    /// Counter tick interval.
    pub counter_tick_secs: f64,
    /// Upper bound of the random counter increment per tick.
    pub counter_max_step: f64,
    /// Seed of the counter's increments.
    pub seed: u64,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            min_hold_secs: 2.0,
            fade_secs: 0.8,
            intro_delay_secs: 0.5,
            counter_tick_secs: 0.05,
            counter_max_step: 5.0,
            seed: 1,
        }
    }
}

/// Drawing settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Straight-alpha RGBA fill applied after every clear. `None` leaves cleared pixels transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Image smoothing used when scaling frames.
    pub smoothing: Smoothing,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_rgba: Some([10, 10, 15, 255]),
            smoothing: Smoothing::High,
        }
    }
}

impl HeroConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> AniResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON configuration string.
    pub fn from_json(text: &str) -> AniResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| AniError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> AniResult<()> {
        let seq = &self.sequence;
        if seq.frame_count == 0 {
            return Err(AniError::config("sequence.frame_count must be >= 1"));
        }
        if seq.frame_count > MAX_FRAME_COUNT {
            return Err(AniError::config(format!(
                "sequence.frame_count must be <= {MAX_FRAME_COUNT} (3-digit frame names)"
            )));
        }
        if seq.prefix.is_empty() {
            return Err(AniError::config("sequence.prefix must be non-empty"));
        }
        if seq.extension.is_empty() || seq.extension.starts_with('.') {
            return Err(AniError::config(
                "sequence.extension must be non-empty and must not start with '.'",
            ));
        }

        let pin = &self.pin;
        if !pin.span_viewports.is_finite() || pin.span_viewports <= 0.0 {
            return Err(AniError::config("pin.span_viewports must be > 0"));
        }
        if !pin.scrub_lag_secs.is_finite() || pin.scrub_lag_secs < 0.0 {
            return Err(AniError::config("pin.scrub_lag_secs must be >= 0"));
        }

        if self.loader.threads == Some(0) {
            return Err(AniError::config("loader.threads must be >= 1 when set"));
        }

        let pre = &self.preloader;
        for (name, v) in [
            ("min_hold_secs", pre.min_hold_secs),
            ("fade_secs", pre.fade_secs),
            ("intro_delay_secs", pre.intro_delay_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(AniError::config(format!("preloader.{name} must be >= 0")));
            }
        }
        if !pre.counter_max_step.is_finite() || pre.counter_max_step <= 0.0 {
            return Err(AniError::config("preloader.counter_max_step must be > 0"));
        }
        if !pre.counter_tick_secs.is_finite() || pre.counter_tick_secs <= 0.0 {
            return Err(AniError::config("preloader.counter_tick_secs must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
